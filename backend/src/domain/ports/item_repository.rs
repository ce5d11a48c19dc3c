//! Port abstraction for item storage adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Item, ItemDetails, ItemId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by item repository adapters.
    pub enum ItemRepositoryError {
        /// No item is stored under the identifier.
        NotFound { id: ItemId } => "item {id} not found",
        /// The backing store failed.
        Storage { message: String } => "item store failed: {message}",
    }
}

/// Port for reading and writing catalogue items.
///
/// Identifiers are assigned by the adapter on insert and never reused.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Store a new item and return it with its assigned identifier.
    async fn insert(&self, details: ItemDetails) -> Result<Item, ItemRepositoryError>;

    /// Fetch one item.
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemRepositoryError>;

    /// Every stored item ordered by identifier.
    async fn list_all(&self) -> Result<Vec<Item>, ItemRepositoryError>;

    /// Replace the name, price and quantity of an existing item.
    async fn update(&self, id: ItemId, details: ItemDetails) -> Result<Item, ItemRepositoryError>;
}
