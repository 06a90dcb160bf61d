use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
    RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use kernel::model::{auth::AccessToken, id::MemberId, member::Member};
use registry::AppRegistry;
use shared::error::AppError;

// リクエストの前処理を実行後、handler に渡す構造体を定義
pub struct AuthorizedUser {
    pub access_token: AccessToken,
    pub member: Member,
}

impl AuthorizedUser {
    pub fn id(&self) -> MemberId {
        self.member.id
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    // handler メソッドの引数に AuthorizedUser を追加したときはこのメソッドが呼ばれる
    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        // HTTP ヘッダからアクセストークンを取り出す
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::UnauthorizedError)?;
        let access_token = AccessToken(bearer.token().to_string());

        // アクセストークンが紐づく会員 ID を抽出する
        let member_id = registry
            .auth_repository()
            .fetch_member_id_from_token(&access_token)
            .await?
            .ok_or(AppError::UnauthorizedError)?;

        // 会員 ID でデータベースから会員のレコードを引く
        let member = registry
            .member_repository()
            .find_by_id(member_id)
            .await?
            .ok_or(AppError::UnauthorizedError)?;

        Ok(Self {
            access_token,
            member,
        })
    }
}

/// JSON ボディを読み取れない場合も 400 とエラー一覧で返す。
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// パスパラメータを解釈できない場合も 400 とエラー一覧で返す。
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);

/// クエリ文字列を解釈できない場合も 400 とエラー一覧で返す。
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);
