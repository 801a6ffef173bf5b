//! HTTP surface of the intake gateway.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, timeout/trace layers)
//!     → cors.rs (allow-list headers, preflight short-circuit)
//!     → handlers (country detection, submission intake, file upload)
//!     → admin router (authenticated review surface)
//! ```

pub mod cors;
pub mod server;

pub use server::{AppState, HttpServer};
