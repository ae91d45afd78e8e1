use super::map_user_row;
use crate::{
    abstract_trait::user::repository::command::UserCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::user::{CreateUserRequest, UpdateUserRequest},
    errors::{RepositoryError, USERNAME_EXISTS},
    model::{role::RoleName, user::UserModel},
};
use async_trait::async_trait;
use tracing::error;

pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create(&self, req: &CreateUserRequest) -> Result<UserModel, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::Sqlx)?;

        let sql = r#"
            INSERT INTO users (username, email, password_hash, full_name,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            RETURNING user_id, username, email, password_hash, full_name,
                      created_at, updated_at
        "#;

        let row = sqlx::query(sql)
            .bind(&req.username)
            .bind(&req.email)
            .bind(&req.password_hash)
            .bind(&req.full_name)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to create user {}: {e:?}", req.username);
                RepositoryError::from_unique(e, USERNAME_EXISTS)
            })?;

        let user = map_user_row(&row).map_err(RepositoryError::Sqlx)?;

        // New accounts always start with the default User role.
        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role_id)
            SELECT $1, role_id FROM roles WHERE role_name = $2
            "#,
        )
        .bind(user.user_id)
        .bind(RoleName::User.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to assign default role to user {}: {e:?}", user.user_id);
            RepositoryError::Sqlx(e)
        })?;

        tx.commit().await.map_err(RepositoryError::Sqlx)?;

        Ok(user)
    }

    async fn update(&self, req: &UpdateUserRequest) -> Result<UserModel, RepositoryError> {
        let user_id = req
            .user_id
            .ok_or_else(|| RepositoryError::Custom("user_id is required".into()))?;

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {e:?}");
            RepositoryError::from(e)
        })?;

        let sql = r#"
            UPDATE users
            SET email = COALESCE($2, email),
                full_name = COALESCE($3, full_name),
                password_hash = COALESCE($4, password_hash),
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING user_id, username, email, password_hash, full_name,
                      created_at, updated_at
        "#;

        let row = sqlx::query(sql)
            .bind(user_id)
            .bind(req.email.as_deref())
            .bind(req.full_name.as_deref())
            .bind(req.password_hash.as_deref())
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to update user {user_id}: {e:?}");
                RepositoryError::Sqlx(e)
            })?
            .ok_or(RepositoryError::NotFound)?;

        map_user_row(&row).map_err(RepositoryError::Sqlx)
    }

    async fn delete(&self, user_id: i32) -> Result<bool, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::Sqlx)?;

        sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to clear roles for user {user_id}: {e:?}");
                RepositoryError::Sqlx(e)
            })?;

        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete user {user_id}: {e:?}");
                RepositoryError::Sqlx(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await.map_err(RepositoryError::Sqlx)?;

        Ok(true)
    }
}
