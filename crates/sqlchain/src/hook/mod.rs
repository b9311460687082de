//! Hooks for observing chain activity.
//!
//! A [`Chain`](crate::Chain) reports appends, removals, resets and
//! compilations to an optional [`ChainHook`]. Ready-made hooks cover stderr
//! logging, counters and (behind the `tracing` feature) structured events.
//!
//! # Example
//!
//! ```rust,ignore
//! use sqlchain::hook::{CompositeHook, LoggingHook, StatsHook};
//! use sqlchain::{BuilderConfig, Chain};
//! use std::sync::Arc;
//!
//! let stats = Arc::new(StatsHook::new());
//! let hook = CompositeHook::new()
//!     .add(LoggingHook::new().prefix("[builder]"))
//!     .add_arc(stats.clone());
//!
//! let mut chain = Chain::new(BuilderConfig::new())?.with_hook(hook);
//! chain.compile();
//! assert_eq!(stats.stats().compilations, 1);
//! ```

mod hooks;
mod types;

#[cfg(feature = "tracing")]
mod tracing_hook;

#[cfg(test)]
mod tests;

pub use hooks::{ChainStats, CompositeHook, LoggingHook, NoopHook, StatsHook};
pub use types::{AppendRejection, ChainHook, CompileReport};

#[cfg(feature = "tracing")]
pub use tracing_hook::TracingHook;

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
