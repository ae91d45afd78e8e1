use crate::{
    domain::requests::user::{CreateUserRequest, UpdateUserRequest},
    errors::RepositoryError,
    model::user::UserModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserCommandRepository = Arc<dyn UserCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserCommandRepositoryTrait {
    /// Inserts the user and assigns the default User role in one unit.
    async fn create(&self, req: &CreateUserRequest) -> Result<UserModel, RepositoryError>;

    async fn update(&self, req: &UpdateUserRequest) -> Result<UserModel, RepositoryError>;

    async fn delete(&self, user_id: i32) -> Result<bool, RepositoryError>;
}
