//! # qeek API client
//!
//! Aggregates the QTS session client ([`qts`]) and the myQNAPcloud
//! account client ([`cloud_account`]), and owns configuration loading
//! and logging setup for embedders.
//!
//! ```no_run
//! use qeek_api_client::config::ClientConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = ClientConfig::load("qeek.json")?;
//! config.apply_env()?;
//! qeek_api_client::logging::init(&config.log)?;
//!
//! let mut qts = config.qts_service()?;
//! let login = qts.login().username("admin").password("secret").execute()?;
//! if login.passed() {
//!     let me = qts.me().execute()?;
//!     println!("{} <{}>", me.name, me.email);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod logging;

pub use qeek_cloud_account as cloud_account;
pub use qeek_core::{ApiError, ErrorCause, ErrorClass, TransportError};
pub use qeek_qts as qts;
