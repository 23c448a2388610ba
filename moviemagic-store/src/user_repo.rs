use async_trait::async_trait;
use moviemagic_core::{StoreError, User, UserDirectory};
use sqlx::PgPool;

use crate::database::unavailable;

pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    username: String,
    password_hash: String,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(row.username, row.password_hash, row.email)
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn get_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT username, password_hash, email FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(row.map(User::from))
    }

    async fn create_user(&self, user: &User) -> Result<(), StoreError> {
        // Check-and-insert in one statement so concurrent registrations cannot both win
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, email)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.email.expose())
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::AlreadyExists(user.username.clone()));
        }
        Ok(())
    }
}
