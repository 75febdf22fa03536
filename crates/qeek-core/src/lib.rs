//! Shared types for the qeek API clients.
//!
//! Both the QTS bus client and the cloud account client report failures
//! through [`ApiError`], so callers can route on [`ErrorClass`] without
//! caring which transport produced the error.

pub mod error;

pub use error::{ApiError, BoxError, ErrorCause, ErrorClass, TransportError};
