mod feed;

pub use feed::{DEFAULT_INTERVAL_MS, Feed, FileFeed, SyntheticFeed};
