//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the item service and the message source.

use std::sync::Arc;

use crate::domain::ItemService;
use crate::domain::messages::MessageSource;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub items: ItemService,
    pub messages: Arc<MessageSource>,
}

impl HttpState {
    /// Bundle the item service with the message source used for rendering
    /// validation errors.
    pub fn new(items: ItemService, messages: Arc<MessageSource>) -> Self {
        Self { items, messages }
    }
}
