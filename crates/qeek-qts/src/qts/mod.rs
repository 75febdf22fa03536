//! QTS integration: sub-modules.
//!
//! - Bus bridge for the `qbus` executable
//! - Envelope decoding and error mapping
//! - Session state machine
//! - One call builder per endpoint (login, verify, users, me, avatar)

pub mod types;
pub mod qbus;
pub mod envelope;
pub mod session;
pub mod calls;
pub mod service;

pub use types::*;
pub use qbus::{QbusCli, QbusRequest, Transport};
pub use session::SessionState;
pub use calls::*;
pub use service::QtsService;
