//! Catalogue items and the candidate shape bound from requests.
//!
//! Three shapes exist:
//! - [`ItemCandidate`]: whatever the client sent, every field optional.
//! - [`ItemDetails`]: a complete, validated payload ready for the store.
//! - [`Item`]: a stored record with its store-assigned [`ItemId`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Object name used for error codes and message lookup.
pub const ITEM_OBJECT: &str = "item";

/// Wire names of the item fields, shared by binding and validation.
pub mod fields {
    /// Item identifier (update form only).
    pub const ID: &str = "id";
    /// Display name.
    pub const NAME: &str = "itemName";
    /// Unit price.
    pub const PRICE: &str = "price";
    /// Stock quantity.
    pub const QUANTITY: &str = "quantity";
}

/// Store-assigned identifier. Unique and immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Validated item payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetails {
    pub name: String,
    pub price: i32,
    pub quantity: i32,
}

impl ItemDetails {
    /// Bundle item fields.
    pub fn new(name: impl Into<String>, price: i32, quantity: i32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }
}

/// Stored catalogue item.
///
/// The total-price business rule is not a storage invariant: the start-up
/// seed deliberately contains an item whose total is below the minimum.
///
/// # Examples
/// ```
/// use item_catalogue::domain::{Item, ItemDetails, ItemId};
///
/// let item = Item::new(ItemId::new(1), ItemDetails::new("item1", 1000, 10));
/// assert_eq!(item.name(), "item1");
/// assert_eq!(item.id().get(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    details: ItemDetails,
}

impl Item {
    /// Attach an identifier to item details.
    pub fn new(id: ItemId, details: ItemDetails) -> Self {
        Self { id, details }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn price(&self) -> i32 {
        self.details.price
    }

    pub fn quantity(&self) -> i32 {
        self.details.quantity
    }

    pub fn details(&self) -> &ItemDetails {
        &self.details
    }

    /// Replace every mutable field, keeping the identifier.
    #[must_use]
    pub fn with_details(self, details: ItemDetails) -> Self {
        Self { id: self.id, details }
    }
}

/// Item as bound from a request, before validation.
///
/// `None` means the field was missing, empty, or could not be converted; the
/// binder records a `typeMismatch` error for the latter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemCandidate {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub price: Option<i32>,
    pub quantity: Option<i32>,
}

impl ItemCandidate {
    /// Candidate pre-filled from a stored item, used by edit forms.
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: Some(item.id().get()),
            name: Some(item.name().to_owned()),
            price: Some(item.price()),
            quantity: Some(item.quantity()),
        }
    }

    /// Convert into store details when every payload field is present.
    pub fn to_details(&self) -> Option<ItemDetails> {
        let name = self.name.as_deref()?;
        if name.trim().is_empty() {
            return None;
        }
        Some(ItemDetails::new(name, self.price?, self.quantity?))
    }
}
