use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::validation::Errors;

pub const HAL_JSON: &str = "application/hal+json";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("リクエストの値が不正です: {0:?}")]
    InvalidRequest(Errors),
    #[error("リクエストボディを読み取れません: {0}")]
    UnreadableRequest(String),
    #[error("パスまたはクエリの値が不正です: {0}")]
    InvalidParameter(String),
    #[error("トランザクションを実行できませんでした。")]
    TransactionError(#[source] sqlx::Error),
    #[error("データベース処理実行中にエラーが発生しました。")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("No rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("{0}")]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error("{0}")]
    ConvertToUuidError(#[from] uuid::Error),
    #[error("ログインに失敗しました")]
    UnauthenticatedError,
    #[error("認証情報が誤っています。")]
    UnauthorizedError,
    #[error("{0}")]
    ConversionEntityError(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::UnreadableRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidParameter(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidParameter(rejection.body_text())
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_)
            | AppError::InvalidRequest(_)
            | AppError::UnreadableRequest(_)
            | AppError::InvalidParameter(_)
            | AppError::ConvertToUuidError(_) => StatusCode::BAD_REQUEST,
            AppError::UnauthenticatedError | AppError::UnauthorizedError => {
                StatusCode::UNAUTHORIZED
            }
            AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::BcryptError(_)
            | AppError::ConversionEntityError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // 400 のときにレスポンスボディへ埋め込むエラー一覧
    fn errors(&self) -> Option<Errors> {
        match self {
            AppError::InvalidRequest(errors) => Some(errors.clone()),
            AppError::ValidationError(report) => {
                let mut errors = Errors::new("request");
                errors.extend_from_report(report);
                Some(errors)
            }
            AppError::UnreadableRequest(message) => {
                let mut errors = Errors::new("request");
                errors.reject("unreadable", message);
                Some(errors)
            }
            AppError::InvalidParameter(message) => {
                let mut errors = Errors::new("request");
                errors.reject("typeMismatch", message);
                Some(errors)
            }
            AppError::ConvertToUuidError(e) => {
                let mut errors = Errors::new("request");
                errors.reject("typeMismatch", &e.to_string());
                Some(errors)
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
        }

        match self.errors() {
            Some(errors) => {
                let body = json!({
                    "errors": errors.to_json(),
                    "_links": { "index": { "href": "/api" } },
                });
                (status_code, [(header::CONTENT_TYPE, HAL_JSON)], Json(body)).into_response()
            }
            None => status_code.into_response(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
