use super::Chirpy;
use crate::auth::{Claims, TokenKind};
use crate::database::Session;
use crate::error::{AppError, ValidationError};

impl Chirpy {
    /// Trade a refresh token for a new access token; the refresh token is rotated
    pub fn refresh_session(&self, refresh_token: &str) -> Result<Session, AppError> {
        let claims = self.refresh_claims(refresh_token)?;
        self.db
            .refresh_access_token(refresh_token, &claims, &self.tokens)
    }

    /// Revoke a refresh token (logout)
    pub fn revoke_session(&self, refresh_token: &str) -> Result<(), AppError> {
        let claims = self.refresh_claims(refresh_token)?;
        self.db.revoke_token(refresh_token)?;
        tracing::info!(user_id = %claims.sub, "Refresh token revoked");
        Ok(())
    }

    /// An access token here is a malformed request rather than an auth failure
    fn refresh_claims(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.tokens.validate(token)?;
        if claims.kind()? != TokenKind::Refresh {
            return Err(ValidationError::WrongTokenKind(
                "Access token used as refresh token".to_string(),
            )
            .into());
        }
        Ok(claims)
    }
}
