//! Authentication-related models

use serde::Deserialize;
use validator::Validate;

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100, message = "username is required"))]
    pub username: String,
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    #[validate(length(min = 1, max = 1024, message = "password is required"))]
    pub password: String,
}

/// Signin request
#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl SignupRequest {
    /// Trim surrounding whitespace from the identity fields; the password is left untouched.
    pub fn normalized(self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password,
        }
    }
}
