use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use corporate_auth_types::bearer::BearerToken;

use crate::domain::types::Account;
use crate::error::AdminServiceError;
use crate::state::AppState;
use crate::usecase::session::AuthenticateUseCase;

/// The admin behind a live bearer token. Rejects with 401 `UNAUTHENTICATED`.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub Account);

impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = AdminServiceError;

    // The repository handle is cloned out of `state` before the future is built.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let bearer = BearerToken::from_request_parts(parts, state);
        let uc = AuthenticateUseCase {
            tokens: state.token_repo(),
        };

        async move {
            let bearer = bearer.await?;
            let account = uc.execute(bearer.as_str()).await?;
            Ok(CurrentAdmin(account))
        }
    }
}
