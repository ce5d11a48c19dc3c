//! Localised validation messages.
//!
//! Bundles map lookup keys to message patterns per locale. Patterns use
//! positional `{n}` placeholders filled from the error's arguments; integer
//! arguments are rendered with thousands separators (`10,000`).

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use super::validation::ValidationError;

/// Locale tag such as `en` or `ko-KR`.
pub type LocaleCode = String;

/// Source of message patterns keyed by code and locale.
#[cfg_attr(test, mockall::automock)]
pub trait MessageCatalog: Send + Sync {
    /// Formatted message for `code` in exactly `locale`, if one is defined.
    fn lookup(&self, code: &str, locale: &str, args: &[Value]) -> Option<String>;
}

/// Problems found while loading message bundles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageBundleError {
    #[error("message catalogue must contain at least one locale")]
    EmptyCatalog,
    #[error("locale code '{locale}' must not be empty or padded")]
    InvalidLocale { locale: String },
    #[error("message '{code}' for locale '{locale}' must not be empty")]
    EmptyMessage { locale: String, code: String },
    #[error("message bundle for locale '{locale}' is not valid JSON: {message}")]
    Malformed { locale: String, message: String },
}

const EMBEDDED_BUNDLES: [(&str, &str); 2] = [
    ("en", include_str!("../../resources/messages/en.json")),
    ("ko", include_str!("../../resources/messages/ko.json")),
];

/// In-memory catalogue of per-locale bundles.
///
/// A lookup for `ko-KR` falls back to the `ko` bundle when no exact bundle
/// exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBundles(BTreeMap<LocaleCode, BTreeMap<String, String>>);

impl MessageBundles {
    /// Validate and wrap bundles.
    pub fn new(
        bundles: BTreeMap<LocaleCode, BTreeMap<String, String>>,
    ) -> Result<Self, MessageBundleError> {
        if bundles.is_empty() {
            return Err(MessageBundleError::EmptyCatalog);
        }
        for (locale, messages) in &bundles {
            if locale.trim().is_empty() || locale.trim() != locale {
                return Err(MessageBundleError::InvalidLocale {
                    locale: locale.clone(),
                });
            }
            if let Some((code, _)) = messages.iter().find(|(_, text)| text.trim().is_empty()) {
                return Err(MessageBundleError::EmptyMessage {
                    locale: locale.clone(),
                    code: code.clone(),
                });
            }
        }
        Ok(Self(bundles))
    }

    /// Parse one JSON object of `code -> pattern` per locale.
    pub fn from_json<'a>(
        sources: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, MessageBundleError> {
        let mut bundles = BTreeMap::new();
        for (locale, text) in sources {
            let messages: BTreeMap<String, String> =
                serde_json::from_str(text).map_err(|err| MessageBundleError::Malformed {
                    locale: locale.to_owned(),
                    message: err.to_string(),
                })?;
            bundles.insert(locale.to_owned(), messages);
        }
        Self::new(bundles)
    }

    /// Bundles compiled into the binary (`en`, `ko`).
    pub fn embedded() -> Result<Self, MessageBundleError> {
        Self::from_json(EMBEDDED_BUNDLES)
    }

    /// Locales with a bundle.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn bundle_for(&self, locale: &str) -> Option<&BTreeMap<String, String>> {
        self.0.get(locale).or_else(|| {
            let language = language_of(locale);
            self.0
                .iter()
                .find(|(tag, _)| tag.eq_ignore_ascii_case(language))
                .map(|(_, bundle)| bundle)
        })
    }
}

impl MessageCatalog for MessageBundles {
    fn lookup(&self, code: &str, locale: &str, args: &[Value]) -> Option<String> {
        self.bundle_for(locale)?
            .get(code)
            .map(|pattern| format_message(pattern, args))
    }
}

fn language_of(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale)
}

/// Substitute `{n}` placeholders with `args[n]`.
///
/// Unknown or malformed placeholders are kept verbatim.
///
/// # Examples
/// ```
/// use item_catalogue::domain::messages::format_message;
/// use serde_json::json;
///
/// let text = format_message("at least {0}, got {1}", &[json!(10000), json!(9000)]);
/// assert_eq!(text, "at least 10,000, got 9,000");
/// ```
pub fn format_message(pattern: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let argument = tail.find('}').and_then(|close| {
            let index: usize = tail[1..close].parse().ok()?;
            Some((close, args.get(index)?))
        });
        match argument {
            Some((close, value)) => {
                out.push_str(&render_argument(value));
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn render_argument(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number
            .as_i64()
            .map(group_thousands)
            .unwrap_or_else(|| number.to_string()),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Resolves validation errors to display text.
///
/// Each code is tried in order against the requested locale, then the
/// default locale, and finally the error's default message.
#[derive(Clone)]
pub struct MessageSource {
    catalog: Arc<dyn MessageCatalog>,
    default_locale: LocaleCode,
}

impl MessageSource {
    pub fn new(catalog: Arc<dyn MessageCatalog>, default_locale: impl Into<LocaleCode>) -> Self {
        Self {
            catalog,
            default_locale: default_locale.into(),
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// First message found for `codes`, or the formatted default message.
    pub fn resolve(
        &self,
        codes: &[String],
        args: &[Value],
        default_message: Option<&str>,
        locale: Option<&str>,
    ) -> Option<String> {
        let mut locales = Vec::with_capacity(2);
        if let Some(requested) = locale.filter(|tag| !tag.trim().is_empty()) {
            locales.push(requested);
        }
        if !locales.contains(&self.default_locale.as_str()) {
            locales.push(&self.default_locale);
        }
        locales
            .into_iter()
            .find_map(|tag| {
                codes
                    .iter()
                    .find_map(|code| self.catalog.lookup(code, tag, args))
            })
            .or_else(|| default_message.map(|text| format_message(text, args)))
    }

    /// Display text for `error`; the bare code when nothing matches.
    pub fn message_for(&self, error: &ValidationError, locale: Option<&str>) -> String {
        self.resolve(
            error.codes(),
            error.arguments(),
            error.default_message(),
            locale,
        )
        .unwrap_or_else(|| error.code().to_owned())
    }
}

impl std::fmt::Debug for MessageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageSource")
            .field("default_locale", &self.default_locale)
            .finish_non_exhaustive()
    }
}
