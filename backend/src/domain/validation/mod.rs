//! Item validation.
//!
//! Validation never fails: every problem is recorded in an
//! [`ErrorCollection`] so the caller can report all of them at once. Binding
//! errors recorded before validation starts are respected, and a field that
//! failed to bind is not checked again.

mod collection;
mod rules;

pub use collection::{ErrorCollection, FieldError, ObjectError, ValidationError};
pub use rules::{RuleSet, validate, validate_into};

/// Semantic error codes raised by the binder and the item rules.
pub mod codes {
    /// Missing or blank value.
    pub const REQUIRED: &str = "required";
    /// Number outside an inclusive range.
    pub const RANGE: &str = "range";
    /// Number at or above the upper limit.
    pub const MAX: &str = "max";
    /// `price * quantity` below the minimum order value.
    pub const TOTAL_PRICE_MIN: &str = "totalPriceMin";
    /// Value could not be converted to the field's type.
    pub const TYPE_MISMATCH: &str = "typeMismatch";
}

/// Numeric limits enforced by the item rules.
pub mod limits {
    /// Lowest accepted unit price.
    pub const PRICE_MIN: i32 = 1_000;
    /// Highest accepted unit price.
    pub const PRICE_MAX: i32 = 1_000_000;
    /// Quantities must stay strictly below this on save.
    pub const QUANTITY_MAX: i32 = 9_999;
    /// Lowest accepted `price * quantity`.
    pub const TOTAL_PRICE_MIN: i64 = 10_000;
}
