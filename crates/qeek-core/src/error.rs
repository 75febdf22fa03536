//! Error types shared by every qeek client.
//!
//! Each call boundary produces exactly one [`ApiError`]. It records which
//! operation failed, a coarse [`ErrorClass`] for callers that only route on
//! bad-request vs internal, and the [`ErrorCause`] that triggered it.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Boxed error used for opaque low-level sources (HTTP stacks etc.).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ── Error class ─────────────────────────────────────────────────────

/// Coarse routing class of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorClass {
    /// The remote side understood the request and rejected it, or the
    /// caller supplied an unusable argument.
    BadRequest,
    /// The request never produced a usable answer (transport or decode).
    InternalError,
}

impl ErrorClass {
    /// Numeric QTS error code for this class.
    pub fn code(self) -> u32 {
        match self {
            Self::BadRequest => 40000,
            Self::InternalError => 50001,
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest => f.write_str("bad request"),
            Self::InternalError => f.write_str("internal error"),
        }
    }
}

// ── Transport errors ────────────────────────────────────────────────

/// Failure to obtain a raw response from the remote side.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The executable could not be located.
    #[error("exec: \"{program}\": executable file not found in $PATH")]
    NotFound { program: String },

    /// Spawning or talking to the process failed.
    #[error("exec: \"{program}\": {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but exited unsuccessfully.
    #[error("{}", exit_message(.code, .stderr))]
    Exit { code: Option<i32>, stderr: String },

    /// The HTTP request could not be completed.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The HTTP server answered with a 5xx status.
    #[error("server error {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

fn exit_message(code: &Option<i32>, stderr: &str) -> String {
    let status = match code {
        Some(c) => format!("exit status {c}"),
        None => "terminated by signal".to_string(),
    };
    let stderr = stderr.trim();
    if stderr.is_empty() {
        status
    } else {
        format!("{status}: {stderr}")
    }
}

// ── Causes ──────────────────────────────────────────────────────────

/// The low-level reason behind an [`ApiError`].
#[derive(Debug, thiserror::Error)]
pub enum ErrorCause {
    /// Programmer misuse detected before any I/O.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `label` names the transport step, e.g. `qbus command exec`.
    #[error("{label} fail: {source}")]
    Transport {
        label: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("{label} fail: {source}")]
    Decode {
        label: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A well-formed response signalling rejection.
    #[error("[{code}] {message}")]
    Status { code: i64, message: String },
}

// ── ApiError ────────────────────────────────────────────────────────

/// The single error type returned by every `execute()`.
#[derive(Debug, thiserror::Error)]
#[error("{operation}: {cause}")]
pub struct ApiError {
    operation: Cow<'static, str>,
    class: ErrorClass,
    #[source]
    cause: ErrorCause,
}

impl ApiError {
    /// Wrap a transport or decode failure.
    pub fn internal(operation: impl Into<Cow<'static, str>>, cause: ErrorCause) -> Self {
        Self {
            operation: operation.into(),
            class: ErrorClass::InternalError,
            cause,
        }
    }

    /// A well-formed rejection carrying the application error code/message.
    pub fn bad_request(
        operation: impl Into<Cow<'static, str>>,
        code: i64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation: operation.into(),
            class: ErrorClass::BadRequest,
            cause: ErrorCause::Status {
                code,
                message: message.into(),
            },
        }
    }

    pub fn invalid_argument(
        operation: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation: operation.into(),
            class: ErrorClass::BadRequest,
            cause: ErrorCause::InvalidArgument(message.into()),
        }
    }

    /// Label of the call that failed, e.g. `Nas login fail`.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn class(&self) -> ErrorClass {
        self.class
    }

    pub fn cause(&self) -> &ErrorCause {
        &self.cause
    }

    pub fn is_bad_request(&self) -> bool {
        self.class == ErrorClass::BadRequest
    }

    pub fn is_internal(&self) -> bool {
        self.class == ErrorClass::InternalError
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.cause, ErrorCause::InvalidArgument(_))
    }

    /// Application error code, only set for rejected responses.
    pub fn app_error_code(&self) -> Option<i64> {
        match &self.cause {
            ErrorCause::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Application error message, only set for rejected responses.
    pub fn app_error_message(&self) -> Option<&str> {
        match &self.cause {
            ErrorCause::Status { message, .. } => Some(message),
            _ => None,
        }
    }

    /// The transport failure, if this error wraps one.
    pub fn transport(&self) -> Option<&TransportError> {
        match &self.cause {
            ErrorCause::Transport { source, .. } => Some(source),
            _ => None,
        }
    }
}
