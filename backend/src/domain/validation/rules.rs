//! Save and update rules for items.

use serde_json::{Value, json};

use crate::domain::item::{ITEM_OBJECT, ItemCandidate, fields};
use crate::domain::message_codes::FieldType;

use super::{ErrorCollection, codes, limits};

/// Which checks apply to a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSet {
    /// New items: quantity must stay below the maximum.
    Save,
    /// Existing items: the id is required and quantity has no upper bound.
    Update,
}

/// Validate `candidate` into a fresh collection.
///
/// # Examples
/// ```
/// use item_catalogue::domain::ItemCandidate;
/// use item_catalogue::domain::validation::{RuleSet, validate};
///
/// let candidate = ItemCandidate {
///     id: None,
///     name: Some("item1".into()),
///     price: Some(1000),
///     quantity: Some(10),
/// };
/// assert!(!validate(&candidate, RuleSet::Save).has_errors());
/// ```
pub fn validate(candidate: &ItemCandidate, rules: RuleSet) -> ErrorCollection {
    let mut errors = ErrorCollection::new(ITEM_OBJECT);
    validate_into(candidate, rules, &mut errors);
    errors
}

/// Validate `candidate`, appending to `errors`.
///
/// Fields that already carry an error in `errors` (typically a binding
/// failure) are not checked again.
pub fn validate_into(candidate: &ItemCandidate, rules: RuleSet, errors: &mut ErrorCollection) {
    let bound = BoundFields::snapshot(errors);

    if rules == RuleSet::Update && bound.id && candidate.id.is_none() {
        errors.reject_value(
            fields::ID,
            Some(&FieldType::U64),
            Value::Null,
            codes::REQUIRED,
            Vec::new(),
        );
    }

    if bound.name && candidate.name.as_deref().is_none_or(|name| name.trim().is_empty()) {
        errors.reject_value(
            fields::NAME,
            Some(&FieldType::STRING),
            json!(candidate.name),
            codes::REQUIRED,
            Vec::new(),
        );
    }

    if bound.price
        && candidate
            .price
            .is_none_or(|price| !(limits::PRICE_MIN..=limits::PRICE_MAX).contains(&price))
    {
        errors.reject_value(
            fields::PRICE,
            Some(&FieldType::I32),
            json!(candidate.price),
            codes::RANGE,
            vec![json!(limits::PRICE_MIN), json!(limits::PRICE_MAX)],
        );
    }

    if bound.quantity {
        match rules {
            RuleSet::Save => {
                if candidate
                    .quantity
                    .is_none_or(|quantity| quantity >= limits::QUANTITY_MAX)
                {
                    errors.reject_value(
                        fields::QUANTITY,
                        Some(&FieldType::I32),
                        json!(candidate.quantity),
                        codes::MAX,
                        vec![json!(limits::QUANTITY_MAX)],
                    );
                }
            }
            RuleSet::Update => {
                if candidate.quantity.is_none() {
                    errors.reject_value(
                        fields::QUANTITY,
                        Some(&FieldType::I32),
                        Value::Null,
                        codes::REQUIRED,
                        Vec::new(),
                    );
                }
            }
        }
    }

    if let (Some(price), Some(quantity)) = (candidate.price, candidate.quantity) {
        let total = i64::from(price) * i64::from(quantity);
        if total < limits::TOTAL_PRICE_MIN {
            errors.reject(
                codes::TOTAL_PRICE_MIN,
                vec![json!(limits::TOTAL_PRICE_MIN), json!(total)],
            );
        }
    }
}

/// Which fields are still eligible for the field rules.
struct BoundFields {
    id: bool,
    name: bool,
    price: bool,
    quantity: bool,
}

impl BoundFields {
    fn snapshot(errors: &ErrorCollection) -> Self {
        Self {
            id: !errors.has_field_errors(fields::ID),
            name: !errors.has_field_errors(fields::NAME),
            price: !errors.has_field_errors(fields::PRICE),
            quantity: !errors.has_field_errors(fields::QUANTITY),
        }
    }
}
