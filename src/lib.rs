//! Awards Submission Intake Gateway
//!
//! Boundary service for the awards program website: country/language
//! detection at page load, project submission validation and persistence,
//! and attachment upload validation with content-signature checks.

pub mod admin;
pub mod config;
pub mod error;
pub mod files;
pub mod geo;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod store;
pub mod submission;

pub use config::schema::IntakeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
