/// Times a block and logs when it overruns its frame budget. Compiled to
/// just the block when `LOG_PERFORMANCE` is off.
#[macro_export]
macro_rules! trace_time {
    // $budget_micros: 1000 per millisecond of budget.
    ($name:expr, $budget_micros:expr, $block:block) => {{
        if $crate::config::LOG_PERFORMANCE {
            let start = $crate::utils::AppInstant::now();
            let result = $block;
            let micros = start.elapsed().as_micros();
            if micros > $budget_micros {
                log::warn!(
                    "slow frame path '{}': {:.3}ms, budget {:.3}ms",
                    $name,
                    micros as f64 / 1000.0,
                    $budget_micros as f64 / 1000.0
                );
            }
            result
        } else {
            $block
        }
    }};
}
