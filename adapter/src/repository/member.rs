use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::MemberId,
    member::{event::CreateMember, Member},
    role::Role,
};
use kernel::repository::member::MemberRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::member::MemberRow, ConnectionPool};

#[derive(new)]
pub struct MemberRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl MemberRepository for MemberRepositoryImpl {
    async fn create(&self, event: CreateMember) -> AppResult<Member> {
        let member_id = MemberId::new();
        let password_hash = hash_password(&event.password)?;
        let roles = role_names(&event);

        let res = sqlx::query(
            r#"
                INSERT INTO members (member_id, email, password_hash, roles)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(member_id)
        .bind(&event.email)
        .bind(&password_hash)
        .bind(&roles)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No member has been created".into(),
            ));
        }

        Ok(Member {
            id: member_id,
            email: event.email,
            password_hash,
            roles: event.roles,
        })
    }

    async fn ensure(&self, event: CreateMember) -> AppResult<()> {
        let password_hash = hash_password(&event.password)?;
        let roles = role_names(&event);

        // 既に同じメールアドレスの会員がいる場合は何もしない
        let res = sqlx::query(
            r#"
                INSERT INTO members (member_id, email, password_hash, roles)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(MemberId::new())
        .bind(&event.email)
        .bind(&password_hash)
        .bind(&roles)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() > 0 {
            tracing::info!(email = %event.email, "member registered");
        }

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Member> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
                SELECT member_id, email, password_hash, roles
                FROM members
                WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        match row {
            Some(row) => Member::try_from(row),
            None => Err(AppError::EntityNotFound(email.to_string())),
        }
    }

    async fn find_by_id(&self, member_id: MemberId) -> AppResult<Option<Member>> {
        sqlx::query_as::<_, MemberRow>(
            r#"
                SELECT member_id, email, password_hash, roles
                FROM members
                WHERE member_id = $1
            "#,
        )
        .bind(member_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(Member::try_from)
        .transpose()
    }
}

fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(AppError::from)
}

fn role_names(event: &CreateMember) -> Vec<String> {
    event.roles.iter().map(Role::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
    async fn test_save_member_hashes_password(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = MemberRepositoryImpl::new(ConnectionPool::new(pool));
        let password = "sangwoo123";

        repo.create(CreateMember::new(
            "sangwoo@email.com".into(),
            password.into(),
            BTreeSet::from([Role::Admin, Role::User]),
        ))
        .await?;

        let member = repo.find_by_email("sangwoo@email.com").await?;
        assert_ne!(member.password_hash, password);
        assert!(bcrypt::verify(password, &member.password_hash)?);
        assert!(member.has_role(Role::Admin));
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
    async fn test_find_by_email_fail(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = MemberRepositoryImpl::new(ConnectionPool::new(pool));
        let email = "random@email.com";

        match repo.find_by_email(email).await {
            Err(AppError::EntityNotFound(message)) => assert!(message.contains(email)),
            other => panic!("supposed to be failed: {other:?}"),
        }
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
    async fn test_ensure_is_idempotent(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = MemberRepositoryImpl::new(ConnectionPool::new(pool));
        let roles = BTreeSet::from([Role::User]);

        repo.ensure(CreateMember::new("user@email.com".into(), "user".into(), roles.clone()))
            .await?;
        let first = repo.find_by_email("user@email.com").await?;

        repo.ensure(CreateMember::new("user@email.com".into(), "other".into(), roles))
            .await?;
        let second = repo.find_by_email("user@email.com").await?;

        assert_eq!(first, second);
        Ok(())
    }
}
