//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → identity.rs (resolve client address, pseudonymize)
//!     → rate_limit.rs (count the attempt against its window)
//!     → Pass to the handler's validation gates
//! ```
//!
//! # Design Decisions
//! - Fail closed: a request that cannot be counted is not admitted
//! - Client addresses never reach logs or store keys un-hashed

pub mod identity;
pub mod rate_limit;

pub use identity::{client_ip, hash_ip};
pub use rate_limit::{RateDecision, RateLimiter, RatePolicy};
