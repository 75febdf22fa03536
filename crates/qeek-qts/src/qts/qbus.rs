//! Bridge to the `qbus` command-line tool.
//!
//! Each request spawns one `qbus get <namespace>/<path> <json>` process
//! and returns its raw stdout. There is no retry and no timeout; a hung
//! bus process blocks the caller.

use crate::qts::types::*;
use log::debug;
use qeek_core::TransportError;
use serde_json::Value;
use std::process::{Command, Stdio};

/// Something that can run a bus command and hand back its stdout.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    fn invoke(&self, args: &[String]) -> Result<Vec<u8>, TransportError>;
}

// ── Request ─────────────────────────────────────────────────────────

/// A single bus request: method, address and JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct QbusRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Value,
}

impl QbusRequest {
    /// `get <namespace>/<endpoint>`.
    pub fn get(namespace: &str, endpoint: &str, body: Value) -> Self {
        Self {
            method: "get",
            path: format!("{}/{}", namespace, endpoint),
            body,
        }
    }

    /// Command-line arguments for the bus executable.
    pub fn args(&self) -> Vec<String> {
        vec![self.method.to_string(), self.path.clone(), self.body.to_string()]
    }

    /// The body with credentials masked, for logging.
    pub fn redacted_body(&self) -> String {
        let mut body = self.body.clone();
        if let Some(pwd) = body.get_mut("pwd") {
            *pwd = Value::String("****".into());
        }
        body.to_string()
    }
}

// ── Process transport ───────────────────────────────────────────────

/// Runs the real `qbus` executable.
#[derive(Debug, Clone)]
pub struct QbusCli {
    program: String,
}

impl Default for QbusCli {
    fn default() -> Self {
        Self {
            program: DEFAULT_QBUS_PROGRAM.to_string(),
        }
    }
}

impl QbusCli {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &QtsConfig) -> Self {
        Self {
            program: config.qbus_program().to_string(),
        }
    }

    /// Use an explicit executable instead of `qbus` from PATH.
    pub fn with_path(mut self, path: &str) -> Self {
        self.program = path.to_string();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Transport for QbusCli {
    fn invoke(&self, args: &[String]) -> Result<Vec<u8>, TransportError> {
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        match output {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(TransportError::NotFound {
                program: self.program.clone(),
            }),
            Err(e) => Err(TransportError::Io {
                program: self.program.clone(),
                source: e,
            }),
            Ok(output) if !output.status.success() => {
                let stderr = String::from_utf8_lossy(&output.stderr).to_string();
                debug!(
                    "{} exited with {:?}: stderr={}",
                    self.program,
                    output.status.code(),
                    stderr.trim()
                );
                Err(TransportError::Exit {
                    code: output.status.code(),
                    stderr,
                })
            }
            Ok(output) => Ok(output.stdout),
        }
    }
}
