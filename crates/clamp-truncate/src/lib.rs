//! Line-clamped text truncation.
//!
//! Clips the text of selected elements to a maximum number of rendered lines
//! and appends an ellipsis when content overflows. The crate never lays out
//! text itself: every height comes from a [`HeightOracle`], so the same code
//! runs against the headless host in `clamp-browser` or a fake in tests.
//!
//! # Pipeline
//!
//! ```text
//! Runtime ──ready/resize──▶ Debouncer ──due──▶ Truncator::apply
//!                                                 │
//!                                   scanner::scan ▼
//!                           ┌──── visible elements ────┐
//!                           ▼                          ▼
//!                  search::truncate_to_height ◀──▶ HeightOracle
//! ```
//!
//! - [`search`] - binary search over prefix lengths with word-boundary preference
//! - [`orchestrator`] - per-element budget, full-text cache, write-back
//! - [`scanner`] - selector matching and zero-size filtering
//! - [`debounce`] - resize coalescing state machine
//! - [`runtime`] - ready/resize/timer wiring and the console line
//! - [`config`] - JSON-backed configuration

pub mod config;
pub mod debounce;
pub mod oracle;
pub mod orchestrator;
pub mod runtime;
pub mod scanner;
pub mod search;

pub use config::{ConfigError, TruncateConfig};
pub use debounce::{DebounceState, Debouncer};
pub use oracle::{HeightOracle, LineMetrics, RenderHost};
pub use orchestrator::{ElementReport, PassReport, Truncator, line_budget};
pub use runtime::{ReadyState, Runtime};
pub use scanner::{Scan, scan};
pub use search::{SearchOptions, Truncation, TruncationKind, truncate_to_height};
