use super::{Collection, Database, User};
use crate::auth::{hash_password, verify_password};
use crate::error::{AppError, AuthError};

impl Database {
    /// Create an account. The password is hashed before the lock is taken.
    pub fn create_user(&self, email: &str, password: &str) -> Result<User, AppError> {
        let password_hash = hash_password(password)?;

        let user = self.update(|doc| {
            if doc.find_user_by_email(email).is_some() {
                return Err(AppError::Conflict("email already registered".to_string()));
            }
            let id = doc.claim_id(Collection::Users);
            let user = User {
                id,
                email: email.to_string(),
                password_hash,
                is_chirpy_red: false,
            };
            doc.users.insert(id, user.clone());
            Ok(user)
        })?;

        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    pub fn get_user_by_id(&self, id: u64) -> Result<User, AppError> {
        self.load()?
            .users
            .remove(&id)
            .ok_or_else(|| AppError::NotFound("User".to_string()))
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<User, AppError> {
        self.load()?
            .find_user_by_email(email)
            .cloned()
            .ok_or_else(|| AppError::NotFound("User".to_string()))
    }

    /// Replace the email and/or password of a user.
    /// `None` and empty strings leave the field untouched.
    pub fn update_user(
        &self,
        id: u64,
        new_email: Option<&str>,
        new_password: Option<&str>,
    ) -> Result<User, AppError> {
        let new_email = new_email.filter(|email| !email.is_empty());
        let new_hash = match new_password.filter(|password| !password.is_empty()) {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        self.update(|doc| {
            if let Some(email) = new_email {
                let taken = doc
                    .find_user_by_email(email)
                    .map_or(false, |other| other.id != id);
                if taken {
                    return Err(AppError::Conflict("email already registered".to_string()));
                }
            }

            let user = doc
                .users
                .get_mut(&id)
                .ok_or_else(|| AppError::NotFound("User".to_string()))?;
            if let Some(email) = new_email {
                user.email = email.to_string();
            }
            if let Some(hash) = new_hash {
                user.password_hash = hash;
            }
            Ok(user.clone())
        })
    }

    /// Check credentials. Unknown email and wrong password produce the same error.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .load()?
            .find_user_by_email(email)
            .cloned()
            .ok_or(AppError::Auth(AuthError::InvalidCredentials))?;

        verify_password(password, &user.password_hash).map_err(|e| match e {
            AppError::Auth(AuthError::PasswordMismatch) => {
                AppError::Auth(AuthError::InvalidCredentials)
            }
            other => other,
        })?;

        Ok(user)
    }

    /// Mark a user as a paying member
    pub fn upgrade_user(&self, id: u64) -> Result<User, AppError> {
        self.update(|doc| {
            let user = doc
                .users
                .get_mut(&id)
                .ok_or_else(|| AppError::NotFound("User".to_string()))?;
            user.is_chirpy_red = true;
            Ok(user.clone())
        })
    }
}
