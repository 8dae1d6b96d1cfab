use serde::Deserialize;

use super::Chirpy;
use crate::error::{AppError, AuthError, ValidationError};

/// The only Polka event that changes anything
pub const UPGRADE_EVENT: &str = "user.upgraded";

/// Webhook payload sent by Polka
#[derive(Debug, Clone, Deserialize)]
pub struct PolkaEvent {
    pub event: String,
    #[serde(default)]
    pub data: PolkaData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolkaData {
    pub user_id: Option<u64>,
}

impl Chirpy {
    /// Handle a payment webhook. Events other than `user.upgraded` are acknowledged and ignored.
    pub fn handle_polka_event(
        &self,
        api_key: Option<&str>,
        event: &PolkaEvent,
    ) -> Result<(), AppError> {
        if api_key != Some(self.polka_api_key.as_str()) {
            return Err(AuthError::InvalidApiKey.into());
        }

        if event.event != UPGRADE_EVENT {
            tracing::debug!(event = %event.event, "Ignoring Polka event");
            return Ok(());
        }

        let user_id = event
            .data
            .user_id
            .ok_or_else(|| ValidationError::EmptyField("data.user_id".to_string()))?;
        self.db.upgrade_user(user_id)?;
        tracing::info!(user_id = user_id, "User upgraded to Chirpy Red");
        Ok(())
    }
}
