//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use item_catalogue::domain::messages::MessageSource;
use item_catalogue::domain::ports::ItemRepository;

/// Everything needed to start the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) repository: Arc<dyn ItemRepository>,
    pub(crate) messages: Arc<MessageSource>,
}

impl ServerConfig {
    /// Construct a server configuration.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        repository: Arc<dyn ItemRepository>,
        messages: Arc<MessageSource>,
    ) -> Self {
        Self {
            bind_addr,
            repository,
            messages,
        }
    }
}
