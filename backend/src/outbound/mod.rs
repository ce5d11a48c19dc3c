//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local item store behind the `ItemRepository` port.
//!
//! Adapters translate between domain types and their storage representation
//! and contain no business rules.

pub mod memory;
