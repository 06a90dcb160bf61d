use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use kernel::model::auth::AccessToken;
use serde::{Deserialize, Serialize};
use shared::error::AppError;

pub const GRANT_TYPE_PASSWORD: &str = "password";
pub const TOKEN_TYPE: &str = "bearer";
pub const SCOPE: &str = "read write";

// フォーム（application/x-www-form-urlencoded）で受け取る。欠けている項目は後でエラーにする
#[derive(Debug, Default, Deserialize)]
pub struct TokenRequest {
    pub grant_type: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub scope: String,
}

impl TokenResponse {
    pub fn new(access_token: AccessToken, expires_in: u64) -> Self {
        Self {
            access_token: access_token.0,
            token_type: TOKEN_TYPE.into(),
            expires_in,
            scope: SCOPE.into(),
        }
    }
}

impl IntoResponse for TokenResponse {
    fn into_response(self) -> Response {
        (
            [
                (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
                (header::PRAGMA, HeaderValue::from_static("no-cache")),
            ],
            Json(self),
        )
            .into_response()
    }
}

/// トークンエンドポイントが返すエラー。ボディは `{"error", "error_description"}` の形になる。
#[derive(Debug)]
pub enum OAuthError {
    InvalidClient,
    InvalidRequest(String),
    UnsupportedGrantType,
    InvalidGrant,
    ServerError(AppError),
}

impl OAuthError {
    fn code(&self) -> &'static str {
        match self {
            OAuthError::InvalidClient => "invalid_client",
            OAuthError::InvalidRequest(_) => "invalid_request",
            OAuthError::UnsupportedGrantType => "unsupported_grant_type",
            OAuthError::InvalidGrant => "invalid_grant",
            OAuthError::ServerError(_) => "server_error",
        }
    }

    fn description(&self) -> String {
        match self {
            OAuthError::InvalidClient => "Bad client credentials".into(),
            OAuthError::InvalidRequest(message) => message.clone(),
            OAuthError::UnsupportedGrantType => "Unsupported grant type".into(),
            OAuthError::InvalidGrant => "Bad credentials".into(),
            OAuthError::ServerError(_) => "Internal server error".into(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            OAuthError::InvalidClient => StatusCode::UNAUTHORIZED,
            OAuthError::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

// 会員の照合に失敗した場合は、会員がいないのかパスワード違いなのかを区別しない
impl From<AppError> for OAuthError {
    fn from(value: AppError) -> Self {
        match value {
            AppError::UnauthenticatedError | AppError::EntityNotFound(_) => {
                OAuthError::InvalidGrant
            }
            other => OAuthError::ServerError(other),
        }
    }
}

#[derive(Serialize)]
struct OAuthErrorBody {
    error: &'static str,
    error_description: String,
}

impl IntoResponse for OAuthError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let body = Json(OAuthErrorBody {
            error: self.code(),
            error_description: self.description(),
        });

        match self {
            OAuthError::InvalidClient => (
                status_code,
                [(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static(r#"Basic realm="oauth2/client""#),
                )],
                body,
            )
                .into_response(),
            OAuthError::ServerError(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Failed to issue an access token"
                );
                (status_code, body).into_response()
            }
            _ => (status_code, body).into_response(),
        }
    }
}
