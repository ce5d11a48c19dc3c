//! Errors gathered while binding and validating one submission.

use serde_json::Value;

use crate::domain::message_codes::{FieldType, MessageCodesResolver};

use super::codes;

/// Failure attributable to one named field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub object: String,
    pub field: String,
    /// Value the client sent; the raw text for type mismatches.
    pub rejected_value: Value,
    /// Semantic code the error was raised with.
    pub code: String,
    /// Lookup keys, most specific first.
    pub codes: Vec<String>,
    pub arguments: Vec<Value>,
    pub default_message: Option<String>,
    /// True when the value could not be converted to the field's type.
    pub binding_failure: bool,
}

/// Failure attributable to the combination of fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectError {
    pub object: String,
    pub code: String,
    pub codes: Vec<String>,
    pub arguments: Vec<Value>,
    pub default_message: Option<String>,
}

/// One entry of an [`ErrorCollection`].
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Field(FieldError),
    Object(ObjectError),
}

impl ValidationError {
    pub fn code(&self) -> &str {
        match self {
            Self::Field(error) => &error.code,
            Self::Object(error) => &error.code,
        }
    }

    pub fn codes(&self) -> &[String] {
        match self {
            Self::Field(error) => &error.codes,
            Self::Object(error) => &error.codes,
        }
    }

    pub fn arguments(&self) -> &[Value] {
        match self {
            Self::Field(error) => &error.arguments,
            Self::Object(error) => &error.arguments,
        }
    }

    pub fn default_message(&self) -> Option<&str> {
        match self {
            Self::Field(error) => error.default_message.as_deref(),
            Self::Object(error) => error.default_message.as_deref(),
        }
    }

    /// Field name for field errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Field(error) => Some(&error.field),
            Self::Object(_) => None,
        }
    }
}

/// Ordered errors for one object, created fresh for every request.
///
/// Insertion order is display order. Codes are expanded through the
/// collection's [`MessageCodesResolver`] as errors are recorded.
///
/// # Examples
/// ```
/// use item_catalogue::domain::message_codes::FieldType;
/// use item_catalogue::domain::validation::ErrorCollection;
/// use serde_json::json;
///
/// let mut errors = ErrorCollection::new("item");
/// errors.reject_value("price", Some(&FieldType::I32), json!(10), "range", vec![json!(1000), json!(1000000)]);
/// errors.reject("totalPriceMin", vec![json!(10000), json!(100)]);
/// assert!(errors.has_errors());
/// assert_eq!(errors.field_errors().count(), 1);
/// assert_eq!(errors.global_errors().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorCollection {
    object: String,
    resolver: MessageCodesResolver,
    errors: Vec<ValidationError>,
}

impl ErrorCollection {
    /// Empty collection using the default resolver.
    pub fn new(object: impl Into<String>) -> Self {
        Self::with_resolver(object, MessageCodesResolver::default())
    }

    /// Empty collection using a custom resolver.
    pub fn with_resolver(object: impl Into<String>, resolver: MessageCodesResolver) -> Self {
        Self {
            object: object.into(),
            resolver,
            errors: Vec::new(),
        }
    }

    /// Name of the object being validated.
    pub fn object(&self) -> &str {
        &self.object
    }

    /// Record an object-level error.
    pub fn reject(&mut self, code: &str, arguments: Vec<Value>) {
        let codes = self.resolver.resolve_codes(code, &self.object);
        self.errors.push(ValidationError::Object(ObjectError {
            object: self.object.clone(),
            code: code.to_owned(),
            codes,
            arguments,
            default_message: None,
        }));
    }

    /// Record a field-level error for a value that bound successfully.
    pub fn reject_value(
        &mut self,
        field: &str,
        field_type: Option<&FieldType>,
        rejected_value: Value,
        code: &str,
        arguments: Vec<Value>,
    ) {
        let error = self.field_error(field, field_type, rejected_value, code, arguments, false);
        self.errors.push(ValidationError::Field(error));
    }

    /// Record that `raw` could not be converted to `field_type`.
    pub fn reject_type_mismatch(&mut self, field: &str, field_type: &FieldType, raw: Value) {
        let error = self.field_error(
            field,
            Some(field_type),
            raw,
            codes::TYPE_MISMATCH,
            vec![Value::String(field.to_owned())],
            true,
        );
        self.errors.push(ValidationError::Field(error));
    }

    /// Append a fully built error.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    fn field_error(
        &self,
        field: &str,
        field_type: Option<&FieldType>,
        rejected_value: Value,
        code: &str,
        arguments: Vec<Value>,
        binding_failure: bool,
    ) -> FieldError {
        FieldError {
            object: self.object.clone(),
            field: field.to_owned(),
            rejected_value,
            code: code.to_owned(),
            codes: self
                .resolver
                .resolve_field_codes(code, &self.object, field, field_type),
            arguments,
            default_message: None,
            binding_failure,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Field errors in insertion order.
    pub fn field_errors(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter_map(|error| match error {
            ValidationError::Field(field) => Some(field),
            ValidationError::Object(_) => None,
        })
    }

    /// Field errors for one field.
    pub fn field_errors_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> {
        self.field_errors().filter(move |error| error.field == field)
    }

    pub fn has_field_errors(&self, field: &str) -> bool {
        self.field_errors_for(field).next().is_some()
    }

    /// Object-level errors in insertion order.
    pub fn global_errors(&self) -> impl Iterator<Item = &ObjectError> {
        self.errors.iter().filter_map(|error| match error {
            ValidationError::Object(object) => Some(object),
            ValidationError::Field(_) => None,
        })
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl<'a> IntoIterator for &'a ErrorCollection {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
