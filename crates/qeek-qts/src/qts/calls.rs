//! One call builder per QTS endpoint.
//!
//! Setters chain by value; `execute()` validates the collected
//! parameters, runs a single bus request and maps the outcome. Calling
//! `execute()` again repeats the request.

use crate::qts::envelope::{invalid_argument, rejected};
use crate::qts::qbus::Transport;
use crate::qts::service::QtsService;
use crate::qts::types::*;
use log::{debug, info};
use qeek_core::ApiError;
use serde_json::{json, Value};

/// Operation labels prefixed to every error message.
pub const OP_LOGIN: &str = "Nas login fail";
pub const OP_VERIFY_SID: &str = "Verify Sid fail";
pub const OP_USER: &str = "Get Nas User fail";
pub const OP_USERS: &str = "Get Nas Users fail";
pub const OP_ME: &str = "Get Nas User Me fail";
pub const OP_USER_AVATAR: &str = "Get Nas User Avatar fail";

fn check_username(operation: &'static str, username: &str) -> Result<(), ApiError> {
    if username.is_empty() {
        return Err(invalid_argument(operation, "username is required"));
    }
    if username.contains('/') {
        return Err(invalid_argument(operation, "username must not contain '/'"));
    }
    Ok(())
}

// ── Login ───────────────────────────────────────────────────────────

/// `qts/account_login`. Stores the returned sid on success.
pub struct LoginCall<'a, T: Transport> {
    service: &'a mut QtsService<T>,
    username: String,
    password: String,
}

impl<'a, T: Transport> LoginCall<'a, T> {
    pub(crate) fn new(service: &'a mut QtsService<T>) -> Self {
        Self {
            service,
            username: String::new(),
            password: String::new(),
        }
    }

    pub fn username(mut self, username: &str) -> Self {
        self.username = username.to_string();
        self
    }

    pub fn password(mut self, password: &str) -> Self {
        self.password = password.to_string();
        self
    }

    pub fn execute(&mut self) -> Result<LoginResult, ApiError> {
        check_username(OP_LOGIN, &self.username)?;

        let body = json!({ "user": self.username, "pwd": self.password });
        let result: LoginResult = self.service.call(OP_LOGIN, "qts/account_login", body)?;

        if !result.passed() {
            return Err(rejected(OP_LOGIN, "authentication not passed"));
        }
        if result.auth_sid.is_empty() {
            return Err(rejected(OP_LOGIN, "login returned no session id"));
        }
        info!("QTS login succeeded for {}", self.username);
        self.service.session.logged_in(result.auth_sid.clone());
        Ok(result)
    }
}

// ── Verify ──────────────────────────────────────────────────────────

/// `qts/verify_sid`. Clears the session sid on any failure.
pub struct VerifySidCall<'a, T: Transport> {
    service: &'a mut QtsService<T>,
}

impl<'a, T: Transport> VerifySidCall<'a, T> {
    pub(crate) fn new(service: &'a mut QtsService<T>) -> Self {
        Self { service }
    }

    /// Replace the service sid right away; `execute()` then confirms or
    /// clears it. Without this call the current sid is verified.
    pub fn sid(mut self, sid: &str) -> Self {
        self.service.session.propose(sid.to_string());
        self
    }

    pub fn execute(&mut self) -> Result<(), ApiError> {
        let body = self.service.sid_body();
        match self.service.call::<Value>(OP_VERIFY_SID, "qts/verify_sid", body) {
            Ok(_) => {
                self.service.session.confirm();
                Ok(())
            }
            Err(e) => {
                self.service.session.invalidate();
                Err(e)
            }
        }
    }
}

// ── User ────────────────────────────────────────────────────────────

/// `qts/user/<username>`.
pub struct UserCall<'a, T: Transport> {
    service: &'a QtsService<T>,
    username: String,
}

impl<'a, T: Transport> UserCall<'a, T> {
    pub(crate) fn new(service: &'a QtsService<T>) -> Self {
        Self {
            service,
            username: String::new(),
        }
    }

    pub fn username(mut self, username: &str) -> Self {
        self.username = username.to_string();
        self
    }

    pub fn execute(&self) -> Result<UserResult, ApiError> {
        check_username(OP_USER, &self.username)?;
        let endpoint = format!("qts/user/{}", self.username);
        self.service.call(OP_USER, &endpoint, self.service.sid_body())
    }
}

// ── Users ───────────────────────────────────────────────────────────

/// `qts/users`. Records come back in server order.
pub struct UsersCall<'a, T: Transport> {
    service: &'a QtsService<T>,
}

impl<'a, T: Transport> UsersCall<'a, T> {
    pub(crate) fn new(service: &'a QtsService<T>) -> Self {
        Self { service }
    }

    pub fn execute(&self) -> Result<Vec<UserResult>, ApiError> {
        self.service.call(OP_USERS, "qts/users", self.service.sid_body())
    }
}

// ── Me ──────────────────────────────────────────────────────────────

/// Resolves the session's username through `qts/user/me`, then fetches
/// that user.
///
/// Errors from the first step carry [`OP_ME`]; errors from the user fetch
/// carry [`OP_USER`], so callers can tell them apart via
/// [`ApiError::operation`].
pub struct MeCall<'a, T: Transport> {
    service: &'a QtsService<T>,
}

impl<'a, T: Transport> MeCall<'a, T> {
    pub(crate) fn new(service: &'a QtsService<T>) -> Self {
        Self { service }
    }

    /// First step only: the username bound to the session.
    pub fn resolve(&self) -> Result<MeResult, ApiError> {
        self.service.call(OP_ME, "qts/user/me", self.service.sid_body())
    }

    pub fn execute(&self) -> Result<UserResult, ApiError> {
        let me = self.resolve()?;
        debug!("QTS session belongs to {}", me.user);
        self.service.user().username(&me.user).execute()
    }
}

// ── User avatar ─────────────────────────────────────────────────────

/// `qts/user/<username>/avatar`.
pub struct UserAvatarCall<'a, T: Transport> {
    service: &'a QtsService<T>,
    username: String,
}

impl<'a, T: Transport> UserAvatarCall<'a, T> {
    pub(crate) fn new(service: &'a QtsService<T>) -> Self {
        Self {
            service,
            username: String::new(),
        }
    }

    pub fn username(mut self, username: &str) -> Self {
        self.username = username.to_string();
        self
    }

    pub fn execute(&self) -> Result<UserAvatarResult, ApiError> {
        check_username(OP_USER_AVATAR, &self.username)?;
        let endpoint = format!("qts/user/{}/avatar", self.username);
        self.service.call(OP_USER_AVATAR, &endpoint, self.service.sid_body())
    }
}
