use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::UserQuery;
use kernel::interface::update::UserModifier;
use kernel::prelude::entity::{CreatedAt, CredentialHash, Role, User, UserId, UserName};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresUserRepository;

#[async_trait::async_trait]
impl UserQuery for PostgresUserRepository {
    type Transaction = PostgresTransaction;
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        PgUserInternal::find_by_id(con, id).await
    }

    async fn find_by_name(
        &self,
        con: &mut PostgresTransaction,
        name: &UserName,
    ) -> error_stack::Result<Option<User>, KernelError> {
        PgUserInternal::find_by_name(con, name).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<User>, KernelError> {
        PgUserInternal::find_all(con).await
    }

    async fn count_for_update(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<i64, KernelError> {
        PgUserInternal::count_for_update(con).await
    }
}

#[async_trait::async_trait]
impl UserModifier for PostgresUserRepository {
    type Transaction = PostgresTransaction;
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        PgUserInternal::create(con, user).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        PgUserInternal::update(con, user).await
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    credential: String,
    role: String,
    created_at: OffsetDateTime,
}

impl TryFrom<UserRow> for User {
    type Error = error_stack::Report<KernelError>;
    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User::new(
            UserId::new(row.id),
            UserName::new(row.name),
            CredentialHash::new(row.credential),
            row.role.parse::<Role>()?,
            CreatedAt::new(row.created_at),
        ))
    }
}

pub(in crate::database) struct PgUserInternal;

impl PgUserInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let row = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT id, name, credential, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_name(
        con: &mut PgConnection,
        name: &UserName,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let name: &String = name.as_ref();
        let row = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT id, name, credential, role, created_at
            FROM users
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(User::try_from).transpose()
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<User>, KernelError> {
        let rows = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT id, name, credential, role, created_at
            FROM users
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(User::try_from).collect()
    }

    async fn count_for_update(con: &mut PgConnection) -> error_stack::Result<i64, KernelError> {
        // Conflicts with itself and with inserts, but not with plain reads.
        sqlx::query(
            // language=postgresql
            r#"
            LOCK TABLE users IN SHARE ROW EXCLUSIVE MODE
            "#,
        )
        .execute(&mut *con)
        .await
        .convert_error()?;
        let (count,) = sqlx::query_as::<_, (i64,)>(
            // language=postgresql
            r#"
            SELECT COUNT(*) FROM users
            "#,
        )
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(count)
    }

    async fn create(con: &mut PgConnection, user: &User) -> error_stack::Result<(), KernelError> {
        let name: &String = user.name().as_ref();
        let credential: &String = user.credential().as_ref();
        let created_at: &OffsetDateTime = user.created_at().as_ref();
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO users (id, name, credential, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id().as_ref())
        .bind(name)
        .bind(credential)
        .bind(user.role().as_str())
        .bind(created_at)
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, user: &User) -> error_stack::Result<(), KernelError> {
        let name: &String = user.name().as_ref();
        let credential: &String = user.credential().as_ref();
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE users
            SET name = $2, credential = $3, role = $4
            WHERE id = $1
            "#,
        )
        .bind(user.id().as_ref())
        .bind(name)
        .bind(credential)
        .bind(user.role().as_str())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
