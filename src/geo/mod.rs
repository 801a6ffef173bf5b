//! Country and language detection.
//!
//! # Data Flow
//! ```text
//! caller address
//!     → client.rs (bounded external lookup)
//!     → country code, if any
//!     → language mapping (anchor country → primary, rest → secondary)
//!     → fallback answer when anything goes wrong
//! ```
//!
//! # Design Decisions
//! - Language selection is a UX nicety: every failure path degrades to
//!   the default answer, never to an error
//! - One best-effort outbound call per invocation, no retry

pub mod client;

pub use client::{GeoAnswer, GeoClient};
