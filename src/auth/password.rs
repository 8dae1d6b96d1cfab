/// Password Hashing and Verification
///
/// bcrypt with a fixed work factor. The stored string embeds the algorithm,
/// cost and salt, so verification only needs the hash itself.

use bcrypt::{hash, verify};

use crate::error::{AppError, AuthError};

/// bcrypt cost used for every stored password
pub const HASH_COST: u32 = 10;

/// Hash a password using bcrypt
///
/// # Errors
/// Returns `AppError::Hashing` if bcrypt fails (it does not for ordinary input)
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, HASH_COST).map_err(|e| AppError::Hashing(e.to_string()))
}

/// Verify a password against its stored hash
///
/// # Errors
/// Returns `AuthError::PasswordMismatch` when the password does not match,
/// including when the stored hash cannot be parsed
pub fn verify_password(password: &str, password_hash: &str) -> Result<(), AppError> {
    match verify(password, password_hash) {
        Ok(true) => Ok(()),
        Ok(false) => Err(AuthError::PasswordMismatch.into()),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be verified");
            Err(AuthError::PasswordMismatch.into())
        }
    }
}
