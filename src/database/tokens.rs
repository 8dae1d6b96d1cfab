use chrono::Utc;
use serde::Serialize;

use super::Database;
use crate::auth::{Claims, TokenKind, TokenService};
use crate::error::{AppError, AuthError};

/// Tokens handed out by a refresh
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    /// New access token
    pub token: String,
    /// Replacement for the refresh token that was just revoked
    pub refresh_token: String,
}

impl Database {
    /// Record a token as revoked. Revoking twice keeps the first timestamp.
    pub fn revoke_token(&self, token: &str) -> Result<(), AppError> {
        self.update(|doc| {
            doc.revoked_tokens
                .entry(token.to_string())
                .or_insert_with(Utc::now);
            Ok(())
        })
    }

    pub fn is_revoked(&self, token: &str) -> Result<bool, AppError> {
        Ok(self.load()?.revoked_tokens.contains_key(token))
    }

    /// Exchange a validated refresh token for a new session.
    ///
    /// The presented token is revoked in the same write as the check, so
    /// two concurrent refreshes with one token cannot both succeed.
    pub fn refresh_access_token(
        &self,
        refresh_token: &str,
        claims: &Claims,
        tokens: &TokenService,
    ) -> Result<Session, AppError> {
        let user_id = claims.user_id()?;

        self.update(|doc| {
            if doc.revoked_tokens.contains_key(refresh_token) {
                tracing::warn!(user_id = user_id, "Attempt to use revoked refresh token");
                return Err(AuthError::TokenRevoked.into());
            }
            if !doc.users.contains_key(&user_id) {
                return Err(AuthError::UserNotFound.into());
            }

            let session = Session {
                token: tokens.issue(user_id, TokenKind::Access)?,
                refresh_token: tokens.issue(user_id, TokenKind::Refresh)?,
            };
            doc.revoked_tokens
                .insert(refresh_token.to_string(), Utc::now());

            tracing::info!(user_id = user_id, "Refresh token rotated");
            Ok(session)
        })
    }
}
