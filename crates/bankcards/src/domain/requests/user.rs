use super::{default_page, default_page_size};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, Clone)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    #[validate(email(message = "Email must be valid"))]
    pub email: String,

    /// Already hashed by the (out-of-scope) auth layer; stored opaque.
    #[validate(length(min = 1, message = "Password hash is required"))]
    pub password_hash: String,

    #[validate(length(max = 100, message = "Full name must not exceed 100 characters"))]
    pub full_name: String,
}

#[derive(Debug, Deserialize, Validate, Clone)]
pub struct UpdateUserRequest {
    pub user_id: Option<i32>,

    #[validate(email(message = "Email must be valid"))]
    pub email: Option<String>,

    #[validate(length(max = 100, message = "Full name must not exceed 100 characters"))]
    pub full_name: Option<String>,

    pub password_hash: Option<String>,
}

#[derive(Debug, Deserialize, Validate, Clone)]
pub struct FindAllUsers {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    #[serde(default)]
    pub search: String,
}
