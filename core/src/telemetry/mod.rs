//! telemetry/mod.rs
//! Per-operation reporting: byte counters, phase timers, immutable snapshots.
//!
//! Notes:
//! - Purely informational; nothing here reaches the wire format.
//! - Counters and timers are owned by a single compress/decompress call and
//!   frozen into a `TelemetrySnapshot` when it succeeds.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
