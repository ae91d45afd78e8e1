mod command;
mod query;

pub use self::command::UserCommandService;
pub use self::query::UserQueryService;

use crate::{
    abstract_trait::user::repository::query::{DynUserQueryRepository, UserQueryRepositoryTrait},
    domain::responses::UserResponse,
    errors::ServiceError,
    model::user::UserModel,
};

pub(crate) async fn user_to_response(
    user_query: &DynUserQueryRepository,
    user: UserModel,
) -> Result<UserResponse, ServiceError> {
    let roles = user_query
        .find_roles(user.user_id)
        .await?
        .into_iter()
        .map(|r| r.role_name)
        .collect();

    Ok(UserResponse::from_model(user, roles))
}
