//! The `me` resource: profile of the account owning the access token.

use crate::auth::TokenSource;
use crate::service::CloudAccountService;
use crate::types::AccountProfile;
use log::error;
use qeek_core::ApiError;

pub const OP_ME: &str = "Get Account Me fail";
pub const ME_ROUTE: &str = "v1.1/me";

/// Entry point returned by [`CloudAccountService::me`].
pub struct MeResource<'a, S: TokenSource> {
    service: &'a CloudAccountService<S>,
}

impl<'a, S: TokenSource> MeResource<'a, S> {
    pub(crate) fn new(service: &'a CloudAccountService<S>) -> Self {
        Self { service }
    }

    pub fn get(&self) -> MeGetCall<'a, S> {
        MeGetCall { service: self.service }
    }
}

/// `GET /v1.1/me`.
pub struct MeGetCall<'a, S: TokenSource> {
    service: &'a CloudAccountService<S>,
}

impl<'a, S: TokenSource> MeGetCall<'a, S> {
    pub fn execute(&self) -> Result<AccountProfile, ApiError> {
        let token = self.service.token_source().token().ok_or_else(|| {
            let err = ApiError::invalid_argument(OP_ME, "access token is empty");
            error!("{}", err);
            err
        })?;
        self.service.client().get_json(OP_ME, ME_ROUTE, &token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenSource;
    use crate::types::CloudAccountConfig;

    #[test]
    fn empty_token_fails_before_io() {
        let config = CloudAccountConfig {
            base_url: "http://127.0.0.1:9".into(),
            use_system_proxy: false,
            ..Default::default()
        };
        let svc = CloudAccountService::new(&config, StaticTokenSource::new("")).unwrap();
        let err = svc.me().get().execute().unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(err.operation(), OP_ME);
        assert!(err.transport().is_none());
    }
}
