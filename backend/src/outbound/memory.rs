//! In-memory item store.
//!
//! The id sequence and the item map live under one `RwLock`, so an insert
//! reserves its id and publishes the item atomically. Nothing survives a
//! restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::ports::{ItemRepository, ItemRepositoryError};
use crate::domain::{Item, ItemDetails, ItemId};

#[derive(Debug)]
struct StoreState {
    next_id: u64,
    items: BTreeMap<ItemId, Item>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            next_id: 1,
            items: BTreeMap::new(),
        }
    }
}

/// Item store keeping every record in process memory.
///
/// Identifiers start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryItemRepository {
    state: RwLock<StoreState>,
}

impl InMemoryItemRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every item and restart the id sequence.
    pub fn clear(&self) {
        *self.state.write() = StoreState::default();
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.state.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn insert(&self, details: ItemDetails) -> Result<Item, ItemRepositoryError> {
        let mut state = self.state.write();
        let id = ItemId::new(state.next_id);
        state.next_id = state
            .next_id
            .checked_add(1)
            .ok_or_else(|| ItemRepositoryError::storage("item id sequence exhausted"))?;
        let item = Item::new(id, details);
        state.items.insert(id, item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemRepositoryError> {
        Ok(self.state.read().items.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Item>, ItemRepositoryError> {
        Ok(self.state.read().items.values().cloned().collect())
    }

    async fn update(&self, id: ItemId, details: ItemDetails) -> Result<Item, ItemRepositoryError> {
        let mut state = self.state.write();
        let slot = state
            .items
            .get_mut(&id)
            .ok_or_else(|| ItemRepositoryError::not_found(id))?;
        *slot = Item::new(id, details);
        Ok(slot.clone())
    }
}
