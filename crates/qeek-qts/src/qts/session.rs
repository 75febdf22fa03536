//! Session id state held by a [`QtsService`](crate::qts::QtsService).
//!
//! ```text
//! Unset | Tentative | Valid | Invalidated
//!     --login ok-------------> Valid(authSid)
//!     --verify.sid(s)--------> Tentative(s)
//! Tentative(s) | Valid(s)
//!     --verify ok------------> Valid(s)
//! any --verify fails---------> Invalidated
//! ```
//!
//! Only login and verify calls move the state; every other call reads
//! [`SessionState::sid`].

/// Session id lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unset,
    /// Set through `verify().sid(..)` and not yet confirmed.
    Tentative(String),
    Valid(String),
    /// A verification failed; the sid was cleared.
    Invalidated,
}

impl SessionState {
    /// The sid sent with requests; empty when unauthenticated.
    pub fn sid(&self) -> &str {
        match self {
            Self::Tentative(sid) | Self::Valid(sid) => sid,
            Self::Unset | Self::Invalidated => "",
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub(crate) fn logged_in(&mut self, sid: String) {
        *self = Self::Valid(sid);
    }

    pub(crate) fn propose(&mut self, sid: String) {
        *self = Self::Tentative(sid);
    }

    pub(crate) fn confirm(&mut self) {
        if let Self::Tentative(sid) = self {
            *self = Self::Valid(std::mem::take(sid));
        }
    }

    pub(crate) fn invalidate(&mut self) {
        *self = Self::Invalidated;
    }
}
