use std::sync::Arc;

use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    auth::{event::CreateToken, AccessToken},
    id::MemberId,
};
use kernel::repository::{auth::AuthRepository, member::MemberRepository};
use shared::error::{AppError, AppResult};

use crate::redis::{
    model::{AuthorizationKey, AuthorizedMemberId},
    RedisClient,
};

#[derive(new)]
pub struct AuthRepositoryImpl {
    members: Arc<dyn MemberRepository>,
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_member_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<MemberId>> {
        let key: AuthorizationKey = access_token.into();
        self.kv
            .get(&key)
            .await
            .map(|x| x.map(AuthorizedMemberId::into_inner))
    }

    async fn verify_member(&self, email: &str, password: &str) -> AppResult<MemberId> {
        // 会員がいない場合もパスワード違いと同じ扱いにする
        let member = match self.members.find_by_email(email).await {
            Ok(member) => member,
            Err(AppError::EntityNotFound(_)) => return Err(AppError::UnauthenticatedError),
            Err(e) => return Err(e),
        };

        let valid = bcrypt::verify(password, &member.password_hash)?;
        if !valid {
            return Err(AppError::UnauthenticatedError);
        }

        Ok(member.id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let key = AuthorizationKey::from(AccessToken(event.access_token));
        let value = AuthorizedMemberId::from(event.member_id);
        self.kv.set_ex(&key, &value, self.ttl).await?;
        Ok(key.into())
    }
}
