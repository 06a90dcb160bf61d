use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::MemberId,
    member::{event::CreateMember, Member},
};

#[async_trait]
pub trait MemberRepository: Send + Sync {
    // パスワードをハッシュ化して保存する
    async fn create(&self, event: CreateMember) -> AppResult<Member>;
    // 同じメールアドレスの会員がいなければ保存する
    async fn ensure(&self, event: CreateMember) -> AppResult<()>;
    // 見つからない場合はメールアドレスを含む EntityNotFound を返す
    async fn find_by_email(&self, email: &str) -> AppResult<Member>;
    async fn find_by_id(&self, member_id: MemberId) -> AppResult<Option<Member>>;
}
