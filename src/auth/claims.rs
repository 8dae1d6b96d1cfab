/// JWT Claims structure
///
/// Payload of every token the service signs: the user id, the token kind
/// (carried in `iss`) and the standard time claims (RFC 7519).

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{AppError, AuthError};

const ACCESS_ISSUER: &str = "chirpy-access";
const REFRESH_ISSUER: &str = "chirpy-refresh";

/// Purpose of a token. Each kind has a fixed lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    /// Every issuer string the service signs
    pub const ISSUERS: [&'static str; 2] = [ACCESS_ISSUER, REFRESH_ISSUER];

    pub fn issuer(self) -> &'static str {
        match self {
            TokenKind::Access => ACCESS_ISSUER,
            TokenKind::Refresh => REFRESH_ISSUER,
        }
    }

    pub fn from_issuer(issuer: &str) -> Option<Self> {
        match issuer {
            ACCESS_ISSUER => Some(TokenKind::Access),
            REFRESH_ISSUER => Some(TokenKind::Refresh),
            _ => None,
        }
    }

    /// Access tokens live one hour, refresh tokens sixty days
    pub fn lifetime(self) -> Duration {
        match self {
            TokenKind::Access => Duration::hours(1),
            TokenKind::Refresh => Duration::days(60),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject (user id as a decimal string)
    pub sub: String,
    /// Issuer, one of `TokenKind::ISSUERS`
    pub iss: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token id, keeps two tokens minted in the same second distinct
    pub jti: String,
}

impl Claims {
    pub fn new(user_id: u64, kind: TokenKind) -> Self {
        let now = chrono::Utc::now();
        Self {
            sub: user_id.to_string(),
            iss: kind.issuer().to_string(),
            iat: now.timestamp(),
            exp: (now + kind.lifetime()).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Extract user id from the subject claim
    pub fn user_id(&self) -> Result<u64, AppError> {
        self.sub
            .parse::<u64>()
            .map_err(|_| AuthError::MalformedToken.into())
    }

    pub fn kind(&self) -> Result<TokenKind, AppError> {
        TokenKind::from_issuer(&self.iss).ok_or_else(|| AuthError::MalformedToken.into())
    }
}
