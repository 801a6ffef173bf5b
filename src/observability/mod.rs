//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via `tracing`; the subscriber is installed in
//!   `main`, not here
//! - Metrics are cheap counter increments recorded at decision points
//! - Client addresses appear in telemetry only as their hash

pub mod metrics;
