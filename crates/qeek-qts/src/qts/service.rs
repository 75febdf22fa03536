//! QTS session service.
//!
//! Provides the central `QtsService` that owns the bus transport and the
//! session id, and hands out one call builder per endpoint.

use crate::qts::calls::*;
use crate::qts::envelope::{decode_into, map_decode, map_envelope, map_transport};
use crate::qts::qbus::{QbusCli, QbusRequest, Transport};
use crate::qts::session::SessionState;
use crate::qts::types::*;
use log::{debug, info, warn};
use qeek_core::ApiError;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::fmt;

const OP_CONFIG: &str = "Qts service config fail";

/// Session context shared by every call builder.
///
/// Builders borrow the service: read-only calls take `&self`, login and
/// verify take `&mut self` because they move the session state.
pub struct QtsService<T: Transport = QbusCli> {
    transport: T,
    namespace: String,
    debug: bool,
    pub(crate) session: SessionState,
}

impl<T: Transport> fmt::Debug for QtsService<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QtsService")
            .field("namespace", &self.namespace)
            .field("debug", &self.debug)
            .field("sid", &mask(self.sid()))
            .finish()
    }
}

fn mask(sid: &str) -> String {
    match sid.get(..2) {
        Some(head) if sid.len() > 4 => format!("{head}…"),
        _ if sid.is_empty() => String::new(),
        _ => "****".into(),
    }
}

impl QtsService<QbusCli> {
    /// A service using `qbus` from PATH.
    pub fn new(namespace: &str) -> Self {
        Self::with_transport(namespace, QbusCli::new())
    }

    pub fn from_config(config: &QtsConfig) -> Result<Self, ApiError> {
        if config.namespace.trim().is_empty() {
            return Err(ApiError::invalid_argument(OP_CONFIG, "qbus namespace must not be empty"));
        }
        Ok(Self::with_transport(&config.namespace, QbusCli::from_config(config)).with_debug(config.debug))
    }
}

impl<T: Transport> QtsService<T> {
    pub fn with_transport(namespace: &str, transport: T) -> Self {
        if namespace.is_empty() {
            warn!("QTS service created with an empty qbus namespace");
        }
        Self {
            transport,
            namespace: namespace.to_string(),
            debug: false,
            session: SessionState::default(),
        }
    }

    /// Log every bus invocation at info level.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Current session id; empty when unauthenticated.
    pub fn sid(&self) -> &str {
        self.session.sid()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ── Call builders ───────────────────────────────────────────────

    pub fn login(&mut self) -> LoginCall<'_, T> {
        LoginCall::new(self)
    }

    pub fn verify(&mut self) -> VerifySidCall<'_, T> {
        VerifySidCall::new(self)
    }

    pub fn user(&self) -> UserCall<'_, T> {
        UserCall::new(self)
    }

    pub fn users(&self) -> UsersCall<'_, T> {
        UsersCall::new(self)
    }

    /// The user owning the current session.
    pub fn me(&self) -> MeCall<'_, T> {
        MeCall::new(self)
    }

    pub fn user_avatar(&self) -> UserAvatarCall<'_, T> {
        UserAvatarCall::new(self)
    }

    // ── Plumbing ────────────────────────────────────────────────────

    pub(crate) fn sid_body(&self) -> Value {
        json!({ "sid": self.sid() })
    }

    /// Run one bus request and map its outcome.
    pub(crate) fn call<R: DeserializeOwned + Default>(
        &self,
        operation: &'static str,
        endpoint: &str,
        body: Value,
    ) -> Result<R, ApiError> {
        let request = QbusRequest::get(&self.namespace, endpoint, body);
        self.trace(&request);

        let raw = self
            .transport
            .invoke(&request.args())
            .map_err(|e| map_transport(operation, e))?;

        let mut envelope = Envelope::<R>::default();
        decode_into(&raw, &mut envelope).map_err(|e| map_decode(operation, e))?;
        map_envelope(operation, envelope)
    }

    fn trace(&self, request: &QbusRequest) {
        if self.debug {
            info!("qbus {} {} {}", request.method, request.path, request.redacted_body());
        } else {
            debug!("qbus {} {} {}", request.method, request.path, request.redacted_body());
        }
    }
}
