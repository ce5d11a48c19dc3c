//! Expansion of short error codes into message lookup keys.
//!
//! A rejection is recorded with a semantic code such as `required`. Before a
//! message is looked up, the code is expanded into an ordered list of keys,
//! most specific first, so a catalogue can override the text for one object,
//! one field, one field type, or fall back to the bare code.
//!
//! | call | codes |
//! |------|-------|
//! | object `item` | `required.item`, `required` |
//! | field `itemName: String` | `required.item.itemName`, `required.itemName`, `required.String`, `required` |

use std::borrow::Cow;

/// Declared type of a bound field, used for `{code}.{type}` keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// A scalar type with a catalogue-facing name.
    Named(Cow<'static, str>),
    /// A sequence of another type.
    Array(Box<FieldType>),
}

impl FieldType {
    /// Text fields.
    pub const STRING: Self = Self::Named(Cow::Borrowed("String"));
    /// 32-bit signed integer fields.
    pub const I32: Self = Self::Named(Cow::Borrowed("i32"));
    /// Unsigned identifier fields.
    pub const U64: Self = Self::Named(Cow::Borrowed("u64"));

    /// Scalar type with an arbitrary name, e.g. a fully qualified one.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Named(name.into())
    }

    /// Array whose elements have type `element`.
    pub fn array_of(element: Self) -> Self {
        Self::Array(Box::new(element))
    }

    /// Name used in lookup keys; arrays render as `element[]`.
    pub fn type_name(&self) -> String {
        match self {
            Self::Named(name) => name.clone().into_owned(),
            Self::Array(element) => format!("{}[]", element.type_name()),
        }
    }

    fn lookup_names(&self) -> Vec<String> {
        let mut names = vec![self.type_name()];
        let mut current = self;
        while let Self::Array(element) = current {
            names.push(element.type_name());
            current = element.as_ref();
        }
        names
    }
}

/// Where the error code sits in a generated key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CodeFormat {
    /// `code.object.field`
    #[default]
    PrefixErrorCode,
    /// `object.field.code`
    PostfixErrorCode,
}

impl CodeFormat {
    fn format(self, code: &str, object: Option<&str>, field: Option<&str>) -> String {
        let parts: [Option<&str>; 3] = match self {
            Self::PrefixErrorCode => [Some(code), object, field],
            Self::PostfixErrorCode => [object, field, Some(code)],
        };
        parts
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Builds the ordered lookup keys for object and field errors.
///
/// # Examples
/// ```
/// use item_catalogue::domain::message_codes::{FieldType, MessageCodesResolver};
///
/// let resolver = MessageCodesResolver::default();
/// assert_eq!(
///     resolver.resolve_field_codes("max", "item", "quantity", Some(&FieldType::I32)),
///     ["max.item.quantity", "max.quantity", "max.i32", "max"],
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCodesResolver {
    prefix: String,
    format: CodeFormat,
}

impl MessageCodesResolver {
    /// Prepend `prefix` to every generated key.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Choose where the error code is placed.
    #[must_use]
    pub fn with_format(mut self, format: CodeFormat) -> Self {
        self.format = format;
        self
    }

    /// Keys for an error that concerns the whole object.
    pub fn resolve_codes(&self, code: &str, object: &str) -> Vec<String> {
        let mut codes = CodeList::default();
        codes.push(self.key(code, Some(object), None));
        codes.push(self.key(code, None, None));
        codes.into_inner()
    }

    /// Keys for an error on `field` of `object`.
    ///
    /// Indexed paths (`lines[0].sku`) also produce their index-free form, and
    /// nested paths (`address.city`) also produce keys for the last segment.
    pub fn resolve_field_codes(
        &self,
        code: &str,
        object: &str,
        field: &str,
        field_type: Option<&FieldType>,
    ) -> Vec<String> {
        let mut codes = CodeList::default();
        let mut paths = field_paths(field);
        for path in &paths {
            codes.push(self.key(code, Some(object), Some(path)));
        }
        if let Some((_, last)) = field.rsplit_once('.') {
            paths.extend(field_paths(last));
        }
        for path in &paths {
            codes.push(self.key(code, None, Some(path)));
        }
        for name in field_type.map(FieldType::lookup_names).unwrap_or_default() {
            codes.push(self.key(code, None, Some(&name)));
        }
        codes.push(self.key(code, None, None));
        codes.into_inner()
    }

    fn key(&self, code: &str, object: Option<&str>, field: Option<&str>) -> String {
        format!("{}{}", self.prefix, self.format.format(code, object, field))
    }
}

/// Insertion-ordered list without duplicates.
#[derive(Default)]
struct CodeList(Vec<String>);

impl CodeList {
    fn push(&mut self, code: String) {
        if !self.0.contains(&code) {
            self.0.push(code);
        }
    }

    fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// `field` followed by each variant with one more `[...]` key stripped,
/// innermost-last first.
fn field_paths(field: &str) -> Vec<String> {
    let mut paths = vec![field.to_owned()];
    let mut plain = field.to_owned();
    while let Some(open) = plain.rfind('[') {
        let Some(close) = plain[open..].find(']').map(|offset| open + offset) else {
            break;
        };
        plain = format!("{}{}", &plain[..open], &plain[close + 1..]);
        paths.push(plain.clone());
    }
    paths
}
