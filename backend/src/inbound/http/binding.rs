//! Conversion of raw request fields into an [`ItemCandidate`].
//!
//! Form posts and JSON bodies follow one policy. Every field is optional.
//! The `id` field is only read for [`RuleSet::Update`]; creates ignore it.
//! Empty values bind as absent. A value that cannot be converted to the
//! field's type leaves the field absent and records a `typeMismatch` error
//! carrying the raw input, and binding carries on with the next field.

use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::item::{ITEM_OBJECT, fields};
use crate::domain::message_codes::FieldType;
use crate::domain::validation::{ErrorCollection, RuleSet};
use crate::domain::ItemCandidate;

/// A bound candidate together with the binding errors it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub candidate: ItemCandidate,
    pub errors: ErrorCollection,
}

impl Binding {
    fn empty() -> Self {
        Self {
            candidate: ItemCandidate::default(),
            errors: ErrorCollection::new(ITEM_OBJECT),
        }
    }
}

/// Form-encoded item fields exactly as posted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemForm {
    pub id: Option<String>,
    #[serde(rename = "itemName")]
    pub item_name: Option<String>,
    pub price: Option<String>,
    pub quantity: Option<String>,
}

impl ItemForm {
    /// Bind the form into a candidate for `rules`.
    pub fn bind(&self, rules: RuleSet) -> Binding {
        let mut binding = Binding::empty();
        let errors = &mut binding.errors;
        let id = match rules {
            RuleSet::Save => None,
            RuleSet::Update => bind_text(errors, fields::ID, &FieldType::U64, self.id.as_deref()),
        };
        binding.candidate = ItemCandidate {
            id,
            name: self.item_name.clone(),
            price: bind_text(errors, fields::PRICE, &FieldType::I32, self.price.as_deref()),
            quantity: bind_text(
                errors,
                fields::QUANTITY,
                &FieldType::I32,
                self.quantity.as_deref(),
            ),
        };
        binding
    }
}

/// JSON item fields before type conversion.
///
/// Example JSON: `{"itemName":"item1","price":1000,"quantity":10}`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ItemPayload {
    /// Not read by the create endpoint; any value is accepted and dropped.
    #[schema(value_type = Option<u64>)]
    pub id: Option<Value>,
    #[serde(rename = "itemName")]
    #[schema(value_type = Option<String>, example = "item1")]
    pub item_name: Option<Value>,
    #[schema(value_type = Option<i32>, example = 1000)]
    pub price: Option<Value>,
    #[schema(value_type = Option<i32>, example = 10)]
    pub quantity: Option<Value>,
}

impl ItemPayload {
    /// Bind the payload into a candidate for `rules`.
    pub fn bind(&self, rules: RuleSet) -> Binding {
        let mut binding = Binding::empty();
        let errors = &mut binding.errors;
        let id = match rules {
            RuleSet::Save => None,
            RuleSet::Update => bind_json(errors, fields::ID, &FieldType::U64, self.id.as_ref()),
        };
        binding.candidate = ItemCandidate {
            id,
            name: bind_json_text(errors, self.item_name.as_ref()),
            price: bind_json(errors, fields::PRICE, &FieldType::I32, self.price.as_ref()),
            quantity: bind_json(
                errors,
                fields::QUANTITY,
                &FieldType::I32,
                self.quantity.as_ref(),
            ),
        };
        binding
    }
}

fn bind_text<T: std::str::FromStr>(
    errors: &mut ErrorCollection,
    field: &str,
    field_type: &FieldType,
    raw: Option<&str>,
) -> Option<T> {
    let raw = raw?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.reject_type_mismatch(field, field_type, Value::String(raw.to_owned()));
            None
        }
    }
}

fn bind_json<T>(
    errors: &mut ErrorCollection,
    field: &str,
    field_type: &FieldType,
    raw: Option<&Value>,
) -> Option<T>
where
    T: std::str::FromStr + TryFrom<i64> + TryFrom<u64>,
{
    match raw? {
        Value::Null => None,
        Value::String(text) => bind_text(errors, field, field_type, Some(text)),
        Value::Number(number) => {
            let converted = match (number.as_i64(), number.as_u64()) {
                (Some(signed), _) => T::try_from(signed).ok(),
                (None, Some(unsigned)) => T::try_from(unsigned).ok(),
                (None, None) => None,
            };
            if converted.is_none() {
                errors.reject_type_mismatch(field, field_type, Value::Number(number.clone()));
            }
            converted
        }
        other => {
            errors.reject_type_mismatch(field, field_type, other.clone());
            None
        }
    }
}

fn bind_json_text(errors: &mut ErrorCollection, raw: Option<&Value>) -> Option<String> {
    match raw? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        scalar @ (Value::Bool(_) | Value::Number(_)) => Some(scalar.to_string()),
        other => {
            errors.reject_type_mismatch(fields::NAME, &FieldType::STRING, other.clone());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::codes;
    use rstest::rstest;
    use serde_json::json;

    fn form(price: &str, quantity: &str) -> ItemForm {
        ItemForm {
            id: None,
            item_name: Some("item1".into()),
            price: Some(price.into()),
            quantity: Some(quantity.into()),
        }
    }

    #[rstest]
    fn form_numbers_bind_from_text() {
        let binding = form(" 1000 ", "10").bind(RuleSet::Save);
        assert!(!binding.errors.has_errors());
        assert_eq!(binding.candidate.price, Some(1000));
        assert_eq!(binding.candidate.quantity, Some(10));
        assert_eq!(binding.candidate.name.as_deref(), Some("item1"));
    }

    #[rstest]
    #[case("", "")]
    #[case("   ", "\t")]
    fn empty_form_numbers_bind_as_absent(#[case] price: &str, #[case] quantity: &str) {
        let binding = form(price, quantity).bind(RuleSet::Save);
        assert!(!binding.errors.has_errors());
        assert_eq!(binding.candidate.price, None);
        assert_eq!(binding.candidate.quantity, None);
    }

    #[rstest]
    fn non_numeric_form_values_are_type_mismatches() {
        let binding = form("abc", "10").bind(RuleSet::Save);

        let errors: Vec<_> = binding.errors.field_errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, fields::PRICE);
        assert_eq!(errors[0].code, codes::TYPE_MISMATCH);
        assert_eq!(errors[0].rejected_value, json!("abc"));
        assert!(errors[0].binding_failure);
        assert_eq!(binding.candidate.price, None);
        assert_eq!(binding.candidate.quantity, Some(10));
    }

    #[rstest]
    fn out_of_range_form_number_is_a_type_mismatch() {
        let binding = form("1000", "99999999999").bind(RuleSet::Save);
        assert!(binding.errors.has_field_errors(fields::QUANTITY));
    }

    #[rstest]
    fn form_id_binds_as_unsigned() {
        let with_id = ItemForm {
            id: Some("7".into()),
            ..form("1000", "10")
        };
        assert_eq!(with_id.bind(RuleSet::Update).candidate.id, Some(7));

        let negative = ItemForm {
            id: Some("-1".into()),
            ..form("1000", "10")
        };
        let binding = negative.bind(RuleSet::Update);
        let error = binding
            .errors
            .field_errors_for(fields::ID)
            .next()
            .expect("id mismatch");
        assert_eq!(error.codes.get(2).map(String::as_str), Some("typeMismatch.u64"));
    }

    #[rstest]
    fn save_binding_ignores_the_id() {
        let form_binding = ItemForm {
            id: Some("-1".into()),
            ..form("1000", "10")
        }
        .bind(RuleSet::Save);
        assert!(!form_binding.errors.has_errors());
        assert_eq!(form_binding.candidate.id, None);

        let payload_binding = ItemPayload {
            id: Some(json!("x")),
            price: Some(json!(1000)),
            ..ItemPayload::default()
        }
        .bind(RuleSet::Save);
        assert!(!payload_binding.errors.has_field_errors(fields::ID));
        assert_eq!(payload_binding.candidate.id, None);
    }

    #[rstest]
    #[case(json!(1000), Some(1000))]
    #[case(json!("1000"), Some(1000))]
    #[case(json!(null), None)]
    #[case(json!(""), None)]
    fn json_numbers_and_numeric_strings_bind(#[case] price: Value, #[case] expected: Option<i32>) {
        let payload = ItemPayload {
            price: Some(price),
            ..ItemPayload::default()
        };
        let binding = payload.bind(RuleSet::Save);
        assert!(!binding.errors.has_errors());
        assert_eq!(binding.candidate.price, expected);
    }

    #[rstest]
    #[case(json!(true))]
    #[case(json!([1]))]
    #[case(json!({"amount": 1}))]
    #[case(json!("ten"))]
    #[case(json!(10.5))]
    #[case(json!(3_000_000_000_i64))]
    fn other_json_values_are_type_mismatches(#[case] quantity: Value) {
        let payload = ItemPayload {
            quantity: Some(quantity.clone()),
            ..ItemPayload::default()
        };
        let binding = payload.bind(RuleSet::Save);

        let error = binding
            .errors
            .field_errors_for(fields::QUANTITY)
            .next()
            .expect("quantity mismatch");
        assert_eq!(error.code, codes::TYPE_MISMATCH);
        assert_eq!(error.rejected_value, quantity);
        assert_eq!(binding.candidate.quantity, None);
    }

    #[rstest]
    fn json_name_accepts_scalars_and_rejects_structures() {
        let numeric = ItemPayload {
            item_name: Some(json!(42)),
            ..ItemPayload::default()
        };
        assert_eq!(numeric.bind(RuleSet::Save).candidate.name.as_deref(), Some("42"));

        let nested = ItemPayload {
            item_name: Some(json!({"first": "a"})),
            ..ItemPayload::default()
        };
        assert!(nested.bind(RuleSet::Save).errors.has_field_errors(fields::NAME));
    }

    #[rstest]
    fn json_binding_continues_after_a_mismatch() {
        let payload: ItemPayload = serde_json::from_value(json!({
            "itemName": "item1",
            "price": "cheap",
            "quantity": 10
        }))
        .expect("payload deserialises");
        let binding = payload.bind(RuleSet::Save);

        assert_eq!(binding.errors.error_count(), 1);
        assert_eq!(binding.candidate.name.as_deref(), Some("item1"));
        assert_eq!(binding.candidate.quantity, Some(10));
    }
}
