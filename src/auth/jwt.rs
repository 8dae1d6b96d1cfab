/// JWT Token Generation and Validation
///
/// Signs and checks HS256 tokens. Revocation is not tracked here; see
/// `Database::is_revoked`.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::{Claims, TokenKind};
use crate::configuration::JwtSettings;
use crate::error::{AppError, AuthError};

/// Issues and validates tokens with one shared secret
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: &JwtSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&TokenKind::ISSUERS);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Generate a new token of the given kind for a user
    ///
    /// # Errors
    /// Returns `AppError::Signing` if encoding fails
    pub fn issue(&self, user_id: u64, kind: TokenKind) -> Result<String, AppError> {
        self.sign(&Claims::new(user_id, kind))
    }

    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::Signing(e.to_string()))
    }

    /// Validate a token and extract its claims
    ///
    /// # Errors
    /// - `AuthError::InvalidSignature` if the signature does not verify
    /// - `AuthError::TokenExpired` once `exp` has passed
    /// - `AuthError::MalformedToken` for anything that does not parse
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("JWT validation error: {}", e);
                let auth_error = match e.kind() {
                    ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::MalformedToken,
                };
                AppError::Auth(auth_error)
            })?;

        claims.user_id()?;
        claims.kind()?;
        Ok(claims)
    }

    /// Kind of a valid token
    pub fn issuer(&self, token: &str) -> Result<TokenKind, AppError> {
        self.validate(token)?.kind()
    }

    /// Validate a token and require it to be of `expected` kind
    pub fn validate_kind(&self, token: &str, expected: TokenKind) -> Result<Claims, AppError> {
        let claims = self.validate(token)?;
        if claims.kind()? != expected {
            tracing::warn!(expected = %expected, user_id = %claims.sub, "Token of the wrong kind presented");
            return Err(AuthError::WrongTokenKind.into());
        }
        Ok(claims)
    }
}
