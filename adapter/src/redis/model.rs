use kernel::model::{auth::AccessToken, id::MemberId};
use shared::error::{AppError, AppResult};

pub trait RedisKey {
    type Value: RedisValue + TryFrom<String, Error = AppError>;
    fn inner(&self) -> String;
}

pub trait RedisValue {
    fn inner(&self) -> String;
}

// アクセストークンをキーとして会員 ID を保存する
pub struct AuthorizationKey(String);
pub struct AuthorizedMemberId(MemberId);

impl From<AccessToken> for AuthorizationKey {
    fn from(token: AccessToken) -> Self {
        Self(token.0)
    }
}

impl From<&AccessToken> for AuthorizationKey {
    fn from(token: &AccessToken) -> Self {
        Self(token.0.to_string())
    }
}

impl From<AuthorizationKey> for AccessToken {
    fn from(key: AuthorizationKey) -> Self {
        Self(key.0)
    }
}

impl RedisKey for AuthorizationKey {
    type Value = AuthorizedMemberId;

    fn inner(&self) -> String {
        format!("auth:{}", self.0)
    }
}

impl From<MemberId> for AuthorizedMemberId {
    fn from(member_id: MemberId) -> Self {
        Self(member_id)
    }
}

impl AuthorizedMemberId {
    pub fn into_inner(self) -> MemberId {
        self.0
    }
}

impl RedisValue for AuthorizedMemberId {
    fn inner(&self) -> String {
        self.0.to_string()
    }
}

impl TryFrom<String> for AuthorizedMemberId {
    type Error = AppError;

    // 保存済みの値が壊れているのはサーバー側の不整合
    fn try_from(s: String) -> AppResult<Self> {
        s.parse::<MemberId>().map(Self).map_err(|_| {
            AppError::ConversionEntityError(format!("invalid member id in token store: {s}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced() {
        let key = AuthorizationKey::from(AccessToken("abc".into()));
        assert_eq!(key.inner(), "auth:abc");
        assert_eq!(AccessToken::from(key), AccessToken("abc".into()));
    }

    #[test]
    fn stored_member_id_is_read_back() {
        let member_id = MemberId::new();
        let value = AuthorizedMemberId::from(member_id);
        let restored = AuthorizedMemberId::try_from(value.inner()).unwrap();
        assert_eq!(restored.into_inner(), member_id);
    }

    #[test]
    fn garbage_value_is_a_server_side_conversion_error() {
        let err = AuthorizedMemberId::try_from("garbage".to_string())
            .err()
            .unwrap();
        assert!(matches!(err, AppError::ConversionEntityError(_)));
        assert!(err.status_code().is_server_error());
    }
}
