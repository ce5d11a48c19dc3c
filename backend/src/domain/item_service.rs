//! Item catalogue service.
//!
//! Drives a write request from a bound candidate to either a rejected
//! submission or a stored item. Reads pass straight through to the store.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::{ItemRepository, ItemRepositoryError};
use crate::domain::validation::{ErrorCollection, RuleSet, validate_into};
use crate::domain::{Error, Item, ItemCandidate, ItemDetails, ItemId};

/// Result of a write request that reached validation.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    /// Binding or validation failed; nothing was written.
    Rejected(ErrorCollection),
    /// The item was stored.
    Persisted(Item),
}

/// Catalogue operations over an [`ItemRepository`].
#[derive(Clone)]
pub struct ItemService {
    repository: Arc<dyn ItemRepository>,
}

impl ItemService {
    /// Create a service backed by `repository`.
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self { repository }
    }

    fn map_repository_error(error: ItemRepositoryError) -> Error {
        match error {
            ItemRepositoryError::NotFound { id } => Error::not_found(format!("item {id} not found")),
            ItemRepositoryError::Storage { message } => {
                Error::internal(format!("item store error: {message}"))
            }
        }
    }

    /// Every item ordered by identifier.
    pub async fn list(&self) -> Result<Vec<Item>, Error> {
        self.repository
            .list_all()
            .await
            .map_err(Self::map_repository_error)
    }

    /// One item, or [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound).
    pub async fn get(&self, id: ItemId) -> Result<Item, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("item {id} not found")))
    }

    /// Validate `candidate` with the save rules and store it when clean.
    ///
    /// `errors` carries any binding failures recorded before validation.
    pub async fn create(
        &self,
        candidate: &ItemCandidate,
        mut errors: ErrorCollection,
    ) -> Result<WriteOutcome, Error> {
        validate_into(candidate, RuleSet::Save, &mut errors);
        if errors.has_errors() {
            info!(error_count = errors.error_count(), "item submission rejected");
            return Ok(WriteOutcome::Rejected(errors));
        }

        let details = Self::details_of(candidate)?;
        let item = self
            .repository
            .insert(details)
            .await
            .map_err(Self::map_repository_error)?;
        info!(item_id = %item.id(), "item saved");
        Ok(WriteOutcome::Persisted(item))
    }

    /// Validate `candidate` with the update rules and overwrite item `id`.
    ///
    /// An unknown `id` is reported as not found before validation runs.
    pub async fn update(
        &self,
        id: ItemId,
        candidate: &ItemCandidate,
        mut errors: ErrorCollection,
    ) -> Result<WriteOutcome, Error> {
        self.get(id).await?;

        validate_into(candidate, RuleSet::Update, &mut errors);
        if errors.has_errors() {
            info!(item_id = %id, error_count = errors.error_count(), "item update rejected");
            return Ok(WriteOutcome::Rejected(errors));
        }

        let details = Self::details_of(candidate)?;
        let item = self
            .repository
            .update(id, details)
            .await
            .map_err(Self::map_repository_error)?;
        info!(item_id = %item.id(), "item updated");
        Ok(WriteOutcome::Persisted(item))
    }

    fn details_of(candidate: &ItemCandidate) -> Result<ItemDetails, Error> {
        candidate.to_details().ok_or_else(|| {
            warn!("validated candidate is incomplete");
            Error::internal("validated item is incomplete")
        })
    }
}

#[cfg(test)]
#[path = "item_service_tests.rs"]
mod tests;
