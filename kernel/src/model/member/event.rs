use std::collections::BTreeSet;

use derive_new::new;

use crate::model::role::Role;

// password は平文。保存時にハッシュ化される
#[derive(new)]
pub struct CreateMember {
    pub email: String,
    pub password: String,
    pub roles: BTreeSet<Role>,
}
