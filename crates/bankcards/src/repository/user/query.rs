use super::map_user_row;
use crate::{
    abstract_trait::user::repository::query::UserQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::user::FindAllUsers,
    errors::RepositoryError,
    model::{role::RoleModel, user::UserModel},
};
use async_trait::async_trait;
use sqlx::Row;
use tracing::error;

pub struct UserQueryRepository {
    db: ConnectionPool,
}

impl UserQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn get_conn(
        &self,
    ) -> Result<sqlx::pool::PoolConnection<sqlx::Postgres>, RepositoryError> {
        self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {e:?}");
            RepositoryError::from(e)
        })
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for UserQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllUsers,
    ) -> Result<(Vec<UserModel>, i64), RepositoryError> {
        let mut conn = self.get_conn().await?;

        let limit = req.page_size.clamp(1, 100);
        let offset = (req.page - 1).max(0) * limit;

        let search_pattern = if req.search.trim().is_empty() {
            None
        } else {
            Some(req.search.as_str())
        };

        let sql = r#"
            SELECT user_id, username, email, password_hash, full_name,
                   created_at, updated_at,
                   COUNT(*) OVER() AS total_count
            FROM users
            WHERE ($1::TEXT IS NULL
                   OR username ILIKE '%' || $1 || '%'
                   OR email ILIKE '%' || $1 || '%'
                   OR full_name ILIKE '%' || $1 || '%')
            ORDER BY user_id
            LIMIT $2 OFFSET $3
        "#;

        let rows = sqlx::query(sql)
            .bind(search_pattern)
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Database error in find_all users: {e:?}");
                RepositoryError::Sqlx(e)
            })?;

        let total = rows
            .first()
            .and_then(|r| r.try_get::<i64, _>("total_count").ok())
            .unwrap_or(0);

        let users = rows
            .iter()
            .map(map_user_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(|e| {
                error!("❌ Failed to map user rows: {e:?}");
                RepositoryError::Sqlx(e)
            })?;

        Ok((users, total))
    }

    async fn find_by_id(&self, user_id: i32) -> Result<UserModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let sql = r#"
            SELECT user_id, username, email, password_hash, full_name,
                   created_at, updated_at
            FROM users
            WHERE user_id = $1
        "#;

        let row = sqlx::query(sql)
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch user {user_id}: {e:?}");
                RepositoryError::Sqlx(e)
            })?
            .ok_or(RepositoryError::NotFound)?;

        map_user_row(&row).map_err(RepositoryError::Sqlx)
    }

    async fn find_roles(&self, user_id: i32) -> Result<Vec<RoleModel>, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let sql = r#"
            SELECT r.role_id, r.role_name
            FROM roles r
            JOIN user_roles ur ON ur.role_id = r.role_id
            WHERE ur.user_id = $1
            ORDER BY r.role_id
        "#;

        let rows = sqlx::query(sql)
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch roles for user {user_id}: {e:?}");
                RepositoryError::Sqlx(e)
            })?;

        let roles = rows
            .iter()
            .map(|row| {
                Ok(RoleModel {
                    role_id: row.try_get("role_id")?,
                    role_name: row.try_get("role_name")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(RepositoryError::Sqlx)?;

        Ok(roles)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to check username uniqueness: {e:?}");
            RepositoryError::Sqlx(e)
        })?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&mut *conn)
                .await
                .map_err(|e| {
                    error!("❌ Failed to check email uniqueness: {e:?}");
                    RepositoryError::Sqlx(e)
                })?;

        Ok(exists)
    }
}
