//! Project submission domain.
//!
//! # Data Flow
//! ```text
//! JSON body
//!     → validate.rs (per-field gates, trim/normalize)
//!     → NewSubmission (validated, normalized)
//!     → store (stamped with id, created_at, status = pending)
//!     → model.rs SubmissionRecord (reviewer-visible shape)
//! ```

pub mod model;
pub mod validate;

pub use model::{NewSubmission, SubmissionRecord, SubmissionStatus};
pub use validate::SubmissionPayload;
