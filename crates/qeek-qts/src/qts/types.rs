//! Core types for the QTS integration.
//!
//! Configuration, the generic qbus response envelope, and the result
//! payloads of every QTS endpoint.

use serde::{Deserialize, Serialize};

/// `code` value of a successful envelope.
pub const SUCCESS_CODE: i64 = 200;

/// Program name looked up in `PATH` when no explicit path is configured.
pub const DEFAULT_QBUS_PROGRAM: &str = "qbus";

/// Group every administrator account belongs to.
pub const ADMINISTRATORS_GROUP: &str = "administrators";

// ── Configuration ───────────────────────────────────────────────────

/// Configuration for a QTS session service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QtsConfig {
    /// Path to the `qbus` executable. If None, it is looked up in PATH.
    #[serde(default)]
    pub qbus_path: Option<String>,

    /// Bus namespace the calls are addressed to, e.g. `com.qnap.dj2`.
    #[serde(default)]
    pub namespace: String,

    /// Log every bus invocation at info level.
    #[serde(default)]
    pub debug: bool,
}

impl Default for QtsConfig {
    fn default() -> Self {
        Self {
            qbus_path: None,
            namespace: String::new(),
            debug: false,
        }
    }
}

impl QtsConfig {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            ..Default::default()
        }
    }

    /// The executable to spawn.
    pub fn qbus_program(&self) -> &str {
        self.qbus_path.as_deref().unwrap_or(DEFAULT_QBUS_PROGRAM)
    }
}

// ── Envelope ────────────────────────────────────────────────────────

/// Generic qbus response wrapper.
///
/// `result` is only meaningful when `code == 200`; failed responses
/// usually carry `null` there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<R> {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub error_msg: String,
    #[serde(default = "Option::default")]
    pub result: Option<R>,
}

impl<R> Default for Envelope<R> {
    fn default() -> Self {
        Self {
            code: 0,
            error_code: 0,
            error_msg: String::new(),
            result: None,
        }
    }
}

impl<R> Envelope<R> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

// ── Results ─────────────────────────────────────────────────────────

/// Result of `qts/account_login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginResult {
    pub auth_passed: i64,
    pub is_admin: i64,
    pub auth_sid: String,
}

impl LoginResult {
    pub fn passed(&self) -> bool {
        self.auth_passed != 0
    }

    pub fn admin(&self) -> bool {
        self.is_admin != 0
    }
}

/// A NAS user account as returned by `qts/user/<name>` and `qts/users`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserResult {
    pub email: String,
    pub enable: i64,
    pub group: Vec<String>,
    pub lang: String,
    pub name: String,
    /// Filesystem path of the avatar image on the NAS.
    pub avatar: String,
}

impl UserResult {
    pub fn is_enabled(&self) -> bool {
        self.enable != 0
    }

    pub fn is_member_of(&self, group: &str) -> bool {
        self.group.iter().any(|g| g == group)
    }

    pub fn is_administrator(&self) -> bool {
        self.is_member_of(ADMINISTRATORS_GROUP)
    }
}

/// Result of `qts/user/me`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeResult {
    pub user: String,
}

/// Result of `qts/user/<name>/avatar`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAvatarResult {
    pub path: String,
}
