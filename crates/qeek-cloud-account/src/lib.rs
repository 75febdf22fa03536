//! # qeek – myQNAPcloud account client
//!
//! Thin blocking client for the cloud account API:
//!
//! - **Auth**: bearer tokens supplied through a [`auth::TokenSource`]
//! - **Client**: HTTP plumbing and status-to-error mapping
//! - **Account**: the `me` profile resource
//!
//! It shares no state with the QTS client; both report failures as
//! [`qeek_core::ApiError`].

pub mod types;
pub mod auth;
pub mod client;
pub mod account;
pub mod service;

pub use account::{MeGetCall, MeResource, OP_ME};
pub use auth::{StaticTokenSource, TokenSource};
pub use service::CloudAccountService;
pub use types::*;
