use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::PLAYBACK;

use super::bounds::AxisBounds;

/// The part of a viewing session that survives a symbol switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub start_index: usize,
    pub window_size: usize,
    pub bounds: AxisBounds,
    pub auto_zoom: bool,
}

#[derive(Debug, Clone)]
struct Entry {
    state: ViewportState,
    touched: u64,
}

/// Per-symbol viewport memory, LRU-bounded.
///
/// The source material grew this map without bound; a screener session that
/// visits hundreds of symbols should not. Capacity comes from `PLAYBACK`.
#[derive(Debug)]
pub struct ViewportStateCache {
    entries: HashMap<String, Entry>,
    capacity: usize,
    clock: u64,
}

impl Default for ViewportStateCache {
    fn default() -> Self {
        Self::with_capacity(PLAYBACK.cache_capacity)
    }
}

impl ViewportStateCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            clock: 0,
        }
    }

    pub fn get(&mut self, symbol: &str) -> Option<ViewportState> {
        self.clock += 1;
        let clock = self.clock;
        self.entries.get_mut(symbol).map(|entry| {
            entry.touched = clock;
            entry.state.clone()
        })
    }

    pub fn insert(&mut self, symbol: &str, state: ViewportState) {
        self.clock += 1;
        let clock = self.clock;

        if let Some(entry) = self.entries.get_mut(symbol) {
            entry.state = state;
            entry.touched = clock;
            return;
        }

        if self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        self.entries
            .insert(symbol.to_string(), Entry { state, touched: clock });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.touched)
            .map(|(symbol, _)| symbol.clone());

        if let Some(symbol) = oldest {
            log::info!("viewport cache full, evicting {}", symbol);
            self.entries.remove(&symbol);
        }
    }
}
