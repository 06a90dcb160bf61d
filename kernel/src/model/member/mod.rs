use std::collections::BTreeSet;

use crate::model::{id::MemberId, role::Role};

pub mod event;

/// 認証の主体となる会員。`password_hash` は bcrypt でハッシュ化済みの値。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub email: String,
    pub password_hash: String,
    pub roles: BTreeSet<Role>,
}

impl Member {
    pub fn authorities(&self) -> Vec<String> {
        self.roles.iter().map(Role::authority).collect()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorities_are_prefixed_role_names() {
        let member = Member {
            id: MemberId::new(),
            email: "admin@email.com".into(),
            password_hash: String::new(),
            roles: BTreeSet::from([Role::User, Role::Admin]),
        };
        assert_eq!(member.authorities(), vec!["ROLE_ADMIN", "ROLE_USER"]);
        assert!(member.has_role(Role::Admin));
    }
}
