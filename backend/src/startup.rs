//! Start-up seeding of the item store.

use tracing::info;

use crate::domain::ports::{ItemRepository, ItemRepositoryError};
use crate::domain::{Item, ItemDetails};

/// Sample items inserted at start-up.
///
/// They bypass validation; `item1` is below the minimum total on purpose.
pub fn sample_items() -> [ItemDetails; 2] {
    [
        ItemDetails::new("item1", 100, 10),
        ItemDetails::new("item2", 2000, 45),
    ]
}

/// Insert [`sample_items`] when `enabled`.
///
/// # Examples
///
/// ```rust
/// use item_catalogue::outbound::memory::InMemoryItemRepository;
/// use item_catalogue::startup::seed_catalogue_on_startup;
///
/// # futures::executor::block_on(async {
/// let repo = InMemoryItemRepository::new();
/// let seeded = seed_catalogue_on_startup(&repo, true).await.expect("seed");
/// assert_eq!(seeded.len(), 2);
/// # });
/// ```
pub async fn seed_catalogue_on_startup(
    repository: &dyn ItemRepository,
    enabled: bool,
) -> Result<Vec<Item>, ItemRepositoryError> {
    if !enabled {
        info!(reason = "disabled", "item seeding skipped");
        return Ok(Vec::new());
    }

    let mut seeded = Vec::with_capacity(2);
    for details in sample_items() {
        seeded.push(repository.insert(details).await?);
    }
    info!(item_count = seeded.len(), "item seeding applied");
    Ok(seeded)
}
