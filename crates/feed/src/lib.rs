//! Sample production for the live window: the random telemetry source and a
//! Tokio-driven tick scheduler.

pub mod generator;
pub mod ticker;

pub use generator::{RandomSource, TIME_FORMAT};
pub use ticker::{TokioTickHandle, TokioTicker};
