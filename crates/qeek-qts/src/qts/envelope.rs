//! Response decoding and error mapping.
//!
//! A call ends in exactly one of three ways: the transport failed, the
//! payload could not be decoded, or the envelope was decoded. Only the
//! last one is inspected for its status code.

use crate::qts::types::Envelope;
use log::error;
use qeek_core::{ApiError, ErrorCause, ErrorClass, TransportError};
use serde::de::DeserializeOwned;

const TRANSPORT_LABEL: &str = "qbus command exec";
const DECODE_LABEL: &str = "qbus json unmarshal";

/// Decode `bytes` into the caller's slot.
pub fn decode_into<T: DeserializeOwned>(bytes: &[u8], out: &mut T) -> Result<(), serde_json::Error> {
    *out = serde_json::from_slice(bytes)?;
    Ok(())
}

fn log_error(err: ApiError) -> ApiError {
    error!("{}", err);
    err
}

/// Missing or unusable builder parameters, caught before any I/O.
pub fn invalid_argument(operation: &'static str, message: &str) -> ApiError {
    log_error(ApiError::invalid_argument(operation, message))
}

/// A success envelope whose payload the caller cannot accept.
pub fn rejected(operation: &'static str, message: &str) -> ApiError {
    log_error(ApiError::bad_request(
        operation,
        i64::from(ErrorClass::BadRequest.code()),
        message,
    ))
}

/// Transport failures are internal errors.
pub fn map_transport(operation: &'static str, source: TransportError) -> ApiError {
    log_error(ApiError::internal(
        operation,
        ErrorCause::Transport {
            label: TRANSPORT_LABEL,
            source,
        },
    ))
}

/// Malformed payloads are internal errors.
pub fn map_decode(operation: &'static str, source: serde_json::Error) -> ApiError {
    log_error(ApiError::internal(
        operation,
        ErrorCause::Decode {
            label: DECODE_LABEL,
            source,
        },
    ))
}

/// Turn a decoded envelope into its result, or a bad-request error
/// carrying `errorCode`/`errorMsg` verbatim.
///
/// A successful envelope without a result yields the default value.
pub fn map_envelope<R: Default>(operation: &'static str, envelope: Envelope<R>) -> Result<R, ApiError> {
    if envelope.is_success() {
        Ok(envelope.result.unwrap_or_default())
    } else {
        Err(log_error(ApiError::bad_request(
            operation,
            envelope.error_code,
            envelope.error_msg,
        )))
    }
}
