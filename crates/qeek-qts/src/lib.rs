//! # qeek – QTS client
//!
//! Talks to a QNAP QTS NAS through the local `qbus` bridge executable:
//!
//! - **Login**: account login, stores the returned session id
//! - **Verify**: session id verification with invalidate-on-failure
//! - **Users**: single user, user list, current user, user avatar
//!
//! Every endpoint is a call builder returned by [`QtsService`]; its
//! `execute()` runs one `qbus get` invocation and maps the outcome into
//! a [`qeek_core::ApiError`].

pub mod qts;

pub use qts::*;
