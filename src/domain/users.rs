use serde::Serialize;

use super::validation::{validate_email, validate_password};
use super::Chirpy;
use crate::auth::TokenKind;
use crate::database::User;
use crate::error::AppError;

/// User as shown to clients (no password hash)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: u64,
    pub email: String,
    pub is_chirpy_red: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_chirpy_red: user.is_chirpy_red,
        }
    }
}

/// Successful login: the user plus a fresh token pair
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
    pub refresh_token: String,
}

impl Chirpy {
    pub fn signup(&self, email: &str, password: &str) -> Result<UserResponse, AppError> {
        let email = validate_email(email)?;
        validate_password(password)?;

        Ok(self.db.create_user(&email, password)?.into())
    }

    pub fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let user = self.db.login(email.trim(), password)?;

        let token = self.tokens.issue(user.id, TokenKind::Access)?;
        let refresh_token = self.tokens.issue(user.id, TokenKind::Refresh)?;

        tracing::info!(user_id = user.id, "User logged in");
        Ok(LoginResponse {
            user: user.into(),
            token,
            refresh_token,
        })
    }

    /// Change the email and/or password of the token's owner.
    /// Empty or missing fields are left unchanged.
    pub fn update_profile(
        &self,
        access_token: &str,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<UserResponse, AppError> {
        let user_id = self.authenticate(access_token)?;

        let email = match email.filter(|e| !e.is_empty()) {
            Some(email) => Some(validate_email(email)?),
            None => None,
        };
        let password = password.filter(|p| !p.is_empty());
        if let Some(password) = password {
            validate_password(password)?;
        }

        let user = self
            .db
            .update_user(user_id, email.as_deref(), password)?;
        tracing::info!(user_id = user_id, "Profile updated");
        Ok(user.into())
    }
}
