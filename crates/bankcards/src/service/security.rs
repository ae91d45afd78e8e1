use crate::{
    abstract_trait::{
        security::{AuthContext, SecurityServiceTrait},
        user::repository::query::{DynUserQueryRepository, UserQueryRepositoryTrait},
    },
    errors::{ADMIN_ONLY, CURRENT_USER_NOT_FOUND, RepositoryError, ServiceError,
             UNAUTHORIZED_CARD_ACTION},
    model::{card::CardModel, role::RoleName, user::UserModel},
};
use async_trait::async_trait;

pub struct SecurityService {
    user_query: DynUserQueryRepository,
}

impl SecurityService {
    pub fn new(user_query: DynUserQueryRepository) -> Self {
        Self { user_query }
    }
}

#[async_trait]
impl SecurityServiceTrait for SecurityService {
    fn is_admin(&self, auth: &AuthContext) -> bool {
        auth.roles.contains(&RoleName::Admin)
    }

    async fn current_user(&self, auth: &AuthContext) -> Result<UserModel, ServiceError> {
        match self.user_query.find_by_id(auth.user_id).await {
            Ok(user) => Ok(user),
            Err(RepositoryError::NotFound) => {
                Err(ServiceError::NotFound(CURRENT_USER_NOT_FOUND.to_string()))
            }
            Err(e) => Err(ServiceError::Repo(e)),
        }
    }

    fn assert_user_access(
        &self,
        auth: &AuthContext,
        target_user_id: i32,
    ) -> Result<(), ServiceError> {
        if self.is_admin(auth) || auth.user_id == target_user_id {
            Ok(())
        } else {
            Err(ServiceError::Forbidden(ADMIN_ONLY.to_string()))
        }
    }

    fn assert_card_ownership(
        &self,
        card: &CardModel,
        user: &UserModel,
    ) -> Result<(), ServiceError> {
        if card.user_id == user.user_id {
            Ok(())
        } else {
            Err(ServiceError::Forbidden(UNAUTHORIZED_CARD_ACTION.to_string()))
        }
    }
}
