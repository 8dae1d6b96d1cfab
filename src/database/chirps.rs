use super::{Chirp, Collection, Database, SortOrder};
use crate::error::AppError;

impl Database {
    /// Persist a new chirp. The author must exist.
    pub fn create_chirp(&self, body: &str, author_id: u64) -> Result<Chirp, AppError> {
        let chirp = self.update(|doc| {
            if !doc.users.contains_key(&author_id) {
                return Err(AppError::NotFound("User".to_string()));
            }
            let id = doc.claim_id(Collection::Chirps);
            let chirp = Chirp {
                id,
                body: body.to_string(),
                author_id,
            };
            doc.chirps.insert(id, chirp.clone());
            Ok(chirp)
        })?;

        tracing::debug!(chirp_id = chirp.id, author_id = author_id, "Chirp stored");
        Ok(chirp)
    }

    pub fn get_chirp(&self, id: u64) -> Result<Chirp, AppError> {
        self.load()?
            .chirps
            .remove(&id)
            .ok_or_else(|| AppError::NotFound("Chirp".to_string()))
    }

    /// All chirps, optionally only those of one author, ordered by id
    pub fn list_chirps(
        &self,
        author_id: Option<u64>,
        order: SortOrder,
    ) -> Result<Vec<Chirp>, AppError> {
        let mut chirps: Vec<Chirp> = self
            .load()?
            .chirps
            .into_values()
            .filter(|chirp| author_id.map_or(true, |author| chirp.author_id == author))
            .collect();

        chirps.sort_by_key(|chirp| chirp.id);
        if order == SortOrder::Desc {
            chirps.reverse();
        }
        Ok(chirps)
    }

    /// Remove a chirp on behalf of `requester_id`, who must be its author
    pub fn delete_chirp(&self, id: u64, requester_id: u64) -> Result<(), AppError> {
        self.update(|doc| {
            let chirp = doc
                .chirps
                .get(&id)
                .ok_or_else(|| AppError::NotFound("Chirp".to_string()))?;
            if chirp.author_id != requester_id {
                tracing::warn!(
                    chirp_id = id,
                    requester_id = requester_id,
                    "Delete attempted by non-author"
                );
                return Err(AppError::Forbidden(
                    "only the author can delete a chirp".to_string(),
                ));
            }
            doc.chirps.remove(&id);
            Ok(())
        })
    }
}
