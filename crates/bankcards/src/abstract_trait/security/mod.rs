use crate::{
    errors::ServiceError,
    model::{card::CardModel, role::RoleName, user::UserModel},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Resolved caller identity, supplied by the (out-of-scope) token layer.
/// The core never parses tokens itself.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i32,
    pub roles: Vec<RoleName>,
}

impl AuthContext {
    pub fn new(user_id: i32, roles: Vec<RoleName>) -> Self {
        Self { user_id, roles }
    }
}

pub type DynSecurityService = Arc<dyn SecurityServiceTrait + Send + Sync>;

/// Single source of truth for "who may act on what". Every mutating or
/// disclosing operation passes through exactly one of these checks before
/// touching data.
#[async_trait]
pub trait SecurityServiceTrait {
    fn is_admin(&self, auth: &AuthContext) -> bool;

    /// Resolves the caller to a live user record; fails with not-found if
    /// the account has been deleted since the token was issued.
    async fn current_user(&self, auth: &AuthContext) -> Result<UserModel, ServiceError>;

    /// Admin, or the caller acting on their own user id.
    fn assert_user_access(&self, auth: &AuthContext, target_user_id: i32)
    -> Result<(), ServiceError>;

    fn assert_card_ownership(&self, card: &CardModel, user: &UserModel)
    -> Result<(), ServiceError>;
}
