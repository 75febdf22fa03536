//! Access-token supply.
//!
//! Acquiring and refreshing tokens happens outside this crate; the client
//! only asks a [`TokenSource`] for the current bearer token.

use oauth2::AccessToken;

/// Hands out the bearer token for the next request.
pub trait TokenSource {
    /// `None` when no usable token is available.
    fn token(&self) -> Option<AccessToken>;
}

/// Always returns the same token.
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: AccessToken,
}

impl StaticTokenSource {
    pub fn new(token: &str) -> Self {
        Self {
            token: AccessToken::new(token.to_string()),
        }
    }
}

impl TokenSource for StaticTokenSource {
    fn token(&self) -> Option<AccessToken> {
        if self.token.secret().is_empty() {
            None
        } else {
            Some(self.token.clone())
        }
    }
}

impl<S: TokenSource + ?Sized> TokenSource for &S {
    fn token(&self) -> Option<AccessToken> {
        (**self).token()
    }
}

/// Show a masked version of the token for logging.
pub fn masked(token: &AccessToken) -> String {
    let secret = token.secret();
    match (secret.get(..4), secret.len().checked_sub(4).and_then(|i| secret.get(i..))) {
        (Some(head), Some(tail)) if secret.len() > 8 => format!("{head}…{tail}"),
        _ => "****".into(),
    }
}
