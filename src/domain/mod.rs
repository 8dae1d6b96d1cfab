/// Domain operations
///
/// Each operation authenticates the caller with the token service when it
/// needs to, validates its input, then runs one data store operation.

mod chirps;
mod membership;
mod sessions;
mod users;
pub mod validation;

pub use membership::{PolkaData, PolkaEvent, UPGRADE_EVENT};
pub use users::{LoginResponse, UserResponse};

use crate::auth::{TokenKind, TokenService};
use crate::database::Database;
use crate::error::AppError;

pub struct Chirpy {
    db: Database,
    tokens: TokenService,
    polka_api_key: String,
}

impl Chirpy {
    pub fn new(db: Database, tokens: TokenService, polka_api_key: impl Into<String>) -> Self {
        Self {
            db,
            tokens,
            polka_api_key: polka_api_key.into(),
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// User id behind a valid access token
    fn authenticate(&self, access_token: &str) -> Result<u64, AppError> {
        self.tokens
            .validate_kind(access_token, TokenKind::Access)?
            .user_id()
    }
}
