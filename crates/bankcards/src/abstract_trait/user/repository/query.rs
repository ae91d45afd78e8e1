use crate::{
    domain::requests::user::FindAllUsers,
    errors::RepositoryError,
    model::{role::RoleModel, user::UserModel},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserQueryRepository = Arc<dyn UserQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserQueryRepositoryTrait {
    async fn find_all(&self, req: &FindAllUsers)
    -> Result<(Vec<UserModel>, i64), RepositoryError>;

    async fn find_by_id(&self, user_id: i32) -> Result<UserModel, RepositoryError>;

    async fn find_roles(&self, user_id: i32) -> Result<Vec<RoleModel>, RepositoryError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, RepositoryError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError>;
}
