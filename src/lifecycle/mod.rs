//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:  load config → validate → wire stores → bind → serve
//! Shutdown: SIGTERM/SIGINT → broadcast → stop accepting → drain
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
