use std::collections::BTreeSet;

use kernel::model::{id::MemberId, member::Member, role::Role};
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct MemberRow {
    pub member_id: MemberId,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<String>,
}

impl TryFrom<MemberRow> for Member {
    type Error = AppError;

    fn try_from(value: MemberRow) -> Result<Self, Self::Error> {
        let MemberRow {
            member_id,
            email,
            password_hash,
            roles,
        } = value;
        let roles = roles
            .iter()
            .map(|r| {
                r.parse::<Role>()
                    .map_err(|_| AppError::ConversionEntityError(format!("unknown role: {r}")))
            })
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Member {
            id: member_id,
            email,
            password_hash,
            roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_roles_are_parsed() {
        let row = MemberRow {
            member_id: MemberId::new(),
            email: "admin@email.com".into(),
            password_hash: "hash".into(),
            roles: vec!["ADMIN".into(), "USER".into()],
        };
        let member = Member::try_from(row).unwrap();
        assert!(member.has_role(Role::Admin));
        assert!(member.has_role(Role::User));
    }

    #[test]
    fn unknown_role_fails_conversion() {
        let row = MemberRow {
            member_id: MemberId::new(),
            email: "admin@email.com".into(),
            password_hash: "hash".into(),
            roles: vec!["ROOT".into()],
        };
        assert!(matches!(
            Member::try_from(row),
            Err(AppError::ConversionEntityError(_))
        ));
    }
}
