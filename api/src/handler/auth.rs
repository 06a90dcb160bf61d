use axum::{extract::State, Form};
use axum_extra::{
    headers::{authorization::Basic, Authorization},
    TypedHeader,
};
use kernel::model::auth::event::CreateToken;
use registry::AppRegistry;

use crate::model::auth::{OAuthError, TokenRequest, TokenResponse, GRANT_TYPE_PASSWORD};

/// OAuth2 のパスワードグラントでアクセストークンを発行する。
///
/// クライアントは Basic 認証で、会員はフォームの `username` / `password` で認証する。
pub async fn issue_token(
    State(registry): State<AppRegistry>,
    client: Option<TypedHeader<Authorization<Basic>>>,
    Form(req): Form<TokenRequest>,
) -> Result<TokenResponse, OAuthError> {
    let Some(TypedHeader(Authorization(basic))) = client else {
        return Err(OAuthError::InvalidClient);
    };
    let auth_config = registry.auth_config();
    if !auth_config.is_valid_client(basic.username(), basic.password()) {
        tracing::debug!(client_id = basic.username(), "rejected client credentials");
        return Err(OAuthError::InvalidClient);
    }

    match req.grant_type.as_deref() {
        Some(GRANT_TYPE_PASSWORD) => {}
        Some(_) => return Err(OAuthError::UnsupportedGrantType),
        None => {
            return Err(OAuthError::InvalidRequest(
                "Missing grant type".into(),
            ))
        }
    }
    let (Some(username), Some(password)) = (req.username, req.password) else {
        return Err(OAuthError::InvalidRequest(
            "Missing username or password".into(),
        ));
    };

    let member_id = registry
        .auth_repository()
        .verify_member(&username, &password)
        .await?;
    let access_token = registry
        .auth_repository()
        .create_token(CreateToken::new(member_id))
        .await?;
    tracing::info!(member_id = %member_id, "access token issued");

    Ok(TokenResponse::new(access_token, auth_config.ttl))
}
