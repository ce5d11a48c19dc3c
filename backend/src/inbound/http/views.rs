//! Server-rendered HTML pages for the item screens.
//!
//! Pages are plain strings built with `format!`. Every interpolated value
//! goes through [`escape`].

use serde_json::Value;

use crate::domain::item::fields;
use crate::domain::messages::MessageSource;
use crate::domain::validation::{ErrorCollection, ValidationError};
use crate::domain::{Item, ItemCandidate, ItemId};

/// Escape text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>.field-error{{border-color:#dc3545;color:#dc3545}}\
         .global-error{{border-color:#dc3545;color:#dc3545}}</style>\n\
         </head>\n<body>\n<div class=\"container\">\n{body}</div>\n</body>\n</html>\n",
        title = escape(title),
    )
}

/// Catalogue overview.
pub fn item_list(items: &[Item]) -> String {
    let mut rows = String::new();
    for item in items {
        rows.push_str(&format!(
            "<tr><td><a href=\"/validation/items/{id}\">{id}</a></td>\
             <td><a href=\"/validation/items/{id}\">{name}</a></td>\
             <td>{price}</td><td>{quantity}</td></tr>\n",
            id = item.id(),
            name = escape(item.name()),
            price = item.price(),
            quantity = item.quantity(),
        ));
    }
    let body = format!(
        "<h2>Items</h2>\n\
         <a href=\"/validation/items/add\">Add item</a>\n\
         <table>\n<thead><tr><th>ID</th><th>Name</th><th>Price</th><th>Quantity</th></tr></thead>\n\
         <tbody>\n{rows}</tbody>\n</table>\n"
    );
    layout("Items", &body)
}

/// Read-only view of one item, with a banner after a save.
pub fn item_detail(item: &Item, saved: bool) -> String {
    let banner = if saved {
        "<p class=\"status\">Saved</p>\n"
    } else {
        ""
    };
    let body = format!(
        "<h2>Item</h2>\n{banner}\
         <dl>\n<dt>ID</dt><dd id=\"itemId\">{id}</dd>\n\
         <dt>Name</dt><dd id=\"itemName\">{name}</dd>\n\
         <dt>Price</dt><dd id=\"price\">{price}</dd>\n\
         <dt>Quantity</dt><dd id=\"quantity\">{quantity}</dd>\n</dl>\n\
         <a href=\"/validation/items/{id}/edit\">Edit</a>\n\
         <a href=\"/validation/items\">Back to list</a>\n",
        id = item.id(),
        name = escape(item.name()),
        price = item.price(),
        quantity = item.quantity(),
    );
    layout("Item", &body)
}

/// Which input form is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(ItemId),
}

/// Text echoed back into the form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub id: String,
    pub item_name: String,
    pub price: String,
    pub quantity: String,
}

impl FormValues {
    /// Values from a bound candidate; fields that failed to bind show the
    /// raw text the user typed.
    pub fn from_binding(candidate: &ItemCandidate, errors: &ErrorCollection) -> Self {
        let raw = |field: &str, bound: Option<String>| {
            errors
                .field_errors_for(field)
                .find(|error| error.binding_failure)
                .map(|error| value_text(&error.rejected_value))
                .or(bound)
                .unwrap_or_default()
        };
        Self {
            id: raw(fields::ID, candidate.id.map(|id| id.to_string())),
            item_name: raw(fields::NAME, candidate.name.clone()),
            price: raw(fields::PRICE, candidate.price.map(|price| price.to_string())),
            quantity: raw(
                fields::QUANTITY,
                candidate.quantity.map(|quantity| quantity.to_string()),
            ),
        }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Error messages resolved for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    global: Vec<String>,
    fields: Vec<(String, String)>,
}

impl FormErrors {
    /// Resolve every error in `errors` for `locale`.
    pub fn resolve(errors: &ErrorCollection, messages: &MessageSource, locale: Option<&str>) -> Self {
        let mut resolved = Self::default();
        for error in errors {
            let text = messages.message_for(error, locale);
            match error {
                ValidationError::Field(field) => resolved.fields.push((field.field.clone(), text)),
                ValidationError::Object(_) => resolved.global.push(text),
            }
        }
        resolved
    }

    fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> {
        self.fields
            .iter()
            .filter(move |(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }

    fn has_field(&self, field: &str) -> bool {
        self.for_field(field).next().is_some()
    }
}

/// Add or edit form, optionally showing errors from a rejected submission.
pub fn item_form(mode: FormMode, values: &FormValues, errors: &FormErrors) -> String {
    let (title, action) = match mode {
        FormMode::Add => ("Add item".to_owned(), "/validation/items/add".to_owned()),
        FormMode::Edit(id) => ("Edit item".to_owned(), format!("/validation/items/{id}/edit")),
    };

    let mut body = format!("<h2>{}</h2>\n<form action=\"{}\" method=\"post\">\n", escape(&title), action);
    for message in &errors.global {
        body.push_str(&format!(
            "<div><p class=\"global-error\">{}</p></div>\n",
            escape(message)
        ));
    }
    if let FormMode::Edit(_) = mode {
        body.push_str(&format!(
            "<div><label for=\"id\">ID</label>\
             <input type=\"text\" id=\"id\" name=\"id\" value=\"{}\" readonly></div>\n",
            escape(&values.id)
        ));
    }
    for (field, label, value) in [
        (fields::NAME, "Name", &values.item_name),
        (fields::PRICE, "Price", &values.price),
        (fields::QUANTITY, "Quantity", &values.quantity),
    ] {
        body.push_str(&input(field, label, value, errors));
    }
    let cancel = match mode {
        FormMode::Add => "/validation/items".to_owned(),
        FormMode::Edit(id) => format!("/validation/items/{id}"),
    };
    body.push_str(&format!(
        "<button type=\"submit\">Save</button>\n<a href=\"{cancel}\">Cancel</a>\n</form>\n"
    ));
    layout(&title, &body)
}

fn input(field: &str, label: &str, value: &str, errors: &FormErrors) -> String {
    let class = if errors.has_field(field) {
        " class=\"field-error\""
    } else {
        ""
    };
    let mut html = format!(
        "<div><label for=\"{field}\">{label}</label>\
         <input type=\"text\" id=\"{field}\" name=\"{field}\" value=\"{value}\"{class}>",
        value = escape(value),
    );
    for message in errors.for_field(field) {
        html.push_str(&format!("<div class=\"field-error\">{}</div>", escape(message)));
    }
    html.push_str("</div>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemDetails;
    use crate::domain::message_codes::FieldType;
    use crate::domain::messages::MessageBundles;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use std::sync::Arc;

    #[fixture]
    fn messages() -> MessageSource {
        let bundles = MessageBundles::embedded().expect("embedded bundles are valid");
        MessageSource::new(Arc::new(bundles), "en")
    }

    #[rstest]
    fn escape_neutralises_markup() {
        assert_eq!(
            escape("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[rstest]
    fn list_links_every_item() {
        let items = [
            Item::new(ItemId::new(1), ItemDetails::new("item1", 100, 10)),
            Item::new(ItemId::new(2), ItemDetails::new("<script>", 2000, 45)),
        ];
        let html = item_list(&items);
        assert!(html.contains("href=\"/validation/items/1\""));
        assert!(html.contains("href=\"/validation/items/2\""));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[rstest]
    #[case(true, true)]
    #[case(false, false)]
    fn detail_banner_follows_status(#[case] saved: bool, #[case] shown: bool) {
        let item = Item::new(ItemId::new(4), ItemDetails::new("lamp", 1500, 7));
        let html = item_detail(&item, saved);
        assert_eq!(html.contains("Saved"), shown);
        assert!(html.contains("/validation/items/4/edit"));
    }

    #[rstest]
    fn rejected_form_echoes_raw_input_and_messages(messages: MessageSource) {
        let mut errors = ErrorCollection::new("item");
        errors.reject_type_mismatch(fields::PRICE, &FieldType::I32, json!("abc"));
        errors.reject_value(fields::NAME, Some(&FieldType::STRING), json!(""), "required", Vec::new());
        errors.reject("totalPriceMin", vec![json!(10_000), json!(900)]);
        let candidate = ItemCandidate {
            id: None,
            name: Some(String::new()),
            price: None,
            quantity: Some(9),
        };

        let values = FormValues::from_binding(&candidate, &errors);
        let resolved = FormErrors::resolve(&errors, &messages, None);
        let html = item_form(FormMode::Add, &values, &resolved);

        assert_eq!(values.price, "abc");
        assert_eq!(values.quantity, "9");
        assert!(html.contains("value=\"abc\" class=\"field-error\""));
        assert!(html.contains("Please enter a number."));
        assert!(html.contains("Item name is required."));
        assert!(html.contains("Price * quantity must be at least 10,000. Current value = 900"));
        assert!(html.contains("action=\"/validation/items/add\""));
    }

    #[rstest]
    fn edit_form_posts_to_the_item_and_carries_the_id() {
        let item = Item::new(ItemId::new(3), ItemDetails::new("desk", 5000, 2));
        let values = FormValues::from_binding(&ItemCandidate::from_item(&item), &ErrorCollection::new("item"));
        let html = item_form(FormMode::Edit(item.id()), &values, &FormErrors::default());

        assert!(html.contains("action=\"/validation/items/3/edit\""));
        assert!(html.contains("name=\"id\" value=\"3\""));
        assert!(html.contains("name=\"itemName\" value=\"desk\""));
        assert!(!html.contains("field-error\">"));
    }
}
