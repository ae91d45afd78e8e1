use crate::model::user::UserModel;
use serde::{Deserialize, Serialize};

/// The password hash stays out of every response.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub roles: Vec<String>,
    pub created_at: Option<String>,
}

impl UserResponse {
    pub fn from_model(model: UserModel, roles: Vec<String>) -> Self {
        Self {
            id: model.user_id,
            username: model.username,
            email: model.email,
            full_name: model.full_name,
            roles,
            created_at: model.created_at.map(|t| t.to_string()),
        }
    }
}
