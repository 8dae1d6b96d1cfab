use super::validation::validate_chirp;
use super::Chirpy;
use crate::database::{Chirp, SortOrder};
use crate::error::AppError;

impl Chirpy {
    /// Publish a chirp as the owner of `access_token`
    pub fn post_chirp(&self, access_token: &str, body: &str) -> Result<Chirp, AppError> {
        let author_id = self.authenticate(access_token)?;
        let cleaned = validate_chirp(body)?;

        let chirp = self.db.create_chirp(&cleaned, author_id)?;
        tracing::info!(chirp_id = chirp.id, author_id = author_id, "Chirp posted");
        Ok(chirp)
    }

    pub fn list_chirps(
        &self,
        author_id: Option<u64>,
        order: SortOrder,
    ) -> Result<Vec<Chirp>, AppError> {
        self.db.list_chirps(author_id, order)
    }

    pub fn get_chirp(&self, id: u64) -> Result<Chirp, AppError> {
        self.db.get_chirp(id)
    }

    /// Delete a chirp; only its author may
    pub fn delete_chirp(&self, access_token: &str, id: u64) -> Result<(), AppError> {
        let requester_id = self.authenticate(access_token)?;
        self.db.delete_chirp(id, requester_id)?;
        tracing::info!(chirp_id = id, author_id = requester_id, "Chirp deleted");
        Ok(())
    }
}
