//! Domain types and services for the item catalogue.
//!
//! Purpose: hold the catalogue model, validation rules, message resolution
//! and the service that ties them to the storage port. Nothing here knows
//! about HTTP.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Item, ItemDetails, ItemId, ItemCandidate: catalogue model.
//! - ItemService / WriteOutcome: create, update, list and fetch items.
//! - TraceId: per-request correlation identifier.

pub mod error;
pub mod item;
pub mod item_service;
pub mod message_codes;
pub mod messages;
pub mod ports;
pub mod trace_id;
pub mod validation;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::item::{ITEM_OBJECT, Item, ItemCandidate, ItemDetails, ItemId};
pub use self::item_service::{ItemService, WriteOutcome};
pub use self::trace_id::TraceId;

/// Convenient result alias for request handlers.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use item_catalogue::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such item"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
