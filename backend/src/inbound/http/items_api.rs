//! JSON item API.
//!
//! ```text
//! GET  /validation/api/items
//! GET  /validation/api/items/{item_id}
//! POST /validation/api/items/add {"itemName":"item1","price":1000,"quantity":10}
//! ```
//!
//! A rejected submission is not an HTTP error: the endpoint answers 200 with
//! the list of validation errors. Only a body that cannot be read as JSON is
//! answered with 400.

use actix_web::{HttpRequest, HttpResponse, error::JsonPayloadError, get, post, web};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{error, info};
use utoipa::ToSchema;

use crate::domain::messages::MessageSource;
use crate::domain::validation::{ErrorCollection, RuleSet, ValidationError};
use crate::domain::{ApiResult, Error, Item, ItemId, WriteOutcome};
use crate::inbound::http::binding::{Binding, ItemPayload};
use crate::inbound::http::locale::RequestLocale;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Item as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "item1")]
    pub item_name: String,
    #[schema(example = 1000)]
    pub price: i32,
    #[schema(example = 10)]
    pub quantity: i32,
}

impl From<&Item> for ItemDto {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id().get(),
            item_name: item.name().to_owned(),
            price: item.price(),
            quantity: item.quantity(),
        }
    }
}

/// One validation error with its resolved message.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrorDto {
    #[schema(example = "item")]
    pub object_name: String,
    /// Absent for errors about the whole item.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "price")]
    pub field: Option<String>,
    /// Value the client sent; absent for object errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub rejected_value: Option<Value>,
    /// True when the value could not be converted; absent for object errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding_failure: Option<bool>,
    #[schema(example = "range")]
    pub code: String,
    /// Lookup keys, most specific first.
    pub codes: Vec<String>,
    #[schema(value_type = Vec<Object>)]
    pub arguments: Vec<Value>,
    pub default_message: Option<String>,
    /// Message resolved for the request locale.
    #[schema(example = "Price must be between 1,000 and 1,000,000.")]
    pub message: String,
}

impl ValidationErrorDto {
    fn from_error(error: &ValidationError, messages: &MessageSource, locale: Option<&str>) -> Self {
        let message = messages.message_for(error, locale);
        match error {
            ValidationError::Field(field) => Self {
                object_name: field.object.clone(),
                field: Some(field.field.clone()),
                rejected_value: Some(field.rejected_value.clone()),
                binding_failure: Some(field.binding_failure),
                code: field.code.clone(),
                codes: field.codes.clone(),
                arguments: field.arguments.clone(),
                default_message: field.default_message.clone(),
                message,
            },
            ValidationError::Object(object) => Self {
                object_name: object.object.clone(),
                field: None,
                rejected_value: None,
                binding_failure: None,
                code: object.code.clone(),
                codes: object.codes.clone(),
                arguments: object.arguments.clone(),
                default_message: object.default_message.clone(),
                message,
            },
        }
    }

    /// Convert a whole collection in order.
    pub fn from_collection(
        errors: &ErrorCollection,
        messages: &MessageSource,
        locale: Option<&str>,
    ) -> Vec<Self> {
        errors
            .iter()
            .map(|error| Self::from_error(error, messages, locale))
            .collect()
    }
}

/// Body of `POST /validation/api/items/add`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AddItemResponse {
    /// The stored item.
    Saved(ItemDto),
    /// Every binding and validation error, in order.
    Rejected(Vec<ValidationErrorDto>),
}

/// JSON extractor settings for the API scope.
///
/// Unreadable bodies become a 400 carrying the domain error envelope. When
/// the body fails to parse, `details` holds the line and column.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    info!(error = %err, "unreadable item payload");
    let error = Error::invalid_request(format!("request body is not valid JSON: {err}"));
    match &err {
        JsonPayloadError::Deserialize(parse) => error
            .with_details(json!({"line": parse.line(), "column": parse.column()}))
            .into(),
        _ => error.into(),
    }
}

/// List every item.
#[utoipa::path(
    get,
    path = "/validation/api/items",
    responses(
        (status = 200, description = "Every item ordered by id", body = [ItemDto]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "listItems"
)]
#[get("/items")]
pub async fn list_items(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<ItemDto>>> {
    let items = state.items.list().await?;
    Ok(web::Json(items.iter().map(ItemDto::from).collect()))
}

/// Fetch one item.
#[utoipa::path(
    get,
    path = "/validation/api/items/{item_id}",
    params(("item_id" = u64, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "The item", body = ItemDto),
        (status = 404, description = "No such item", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "getItem"
)]
#[get("/items/{item_id}")]
pub async fn get_item(
    state: web::Data<HttpState>,
    path: web::Path<ItemId>,
) -> ApiResult<web::Json<ItemDto>> {
    let item = state.items.get(path.into_inner()).await?;
    Ok(web::Json(ItemDto::from(&item)))
}

/// Create an item.
///
/// Validation failures are reported in the body with status 200.
#[utoipa::path(
    post,
    path = "/validation/api/items/add",
    request_body = ItemPayload,
    responses(
        (status = 200, description = "The stored item, or the validation errors", body = AddItemResponse),
        (status = 400, description = "Body is not valid JSON", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["items"],
    operation_id = "addItem"
)]
#[post("/items/add")]
pub async fn add_item(
    state: web::Data<HttpState>,
    locale: RequestLocale,
    payload: web::Json<ItemPayload>,
) -> ApiResult<HttpResponse> {
    info!("api item submission received");
    let Binding { candidate, errors } = payload.bind(RuleSet::Save);
    let response = match state.items.create(&candidate, errors).await? {
        WriteOutcome::Persisted(item) => AddItemResponse::Saved(ItemDto::from(&item)),
        WriteOutcome::Rejected(errors) => {
            error!(error_count = errors.error_count(), "api item submission rejected");
            AddItemResponse::Rejected(ValidationErrorDto::from_collection(
                &errors,
                &state.messages,
                locale.as_deref(),
            ))
        }
    };
    Ok(HttpResponse::Ok().json(response))
}
