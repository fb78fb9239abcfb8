//! Service layer for the mock items API.
//! - `items`: the open item record, create-time validation and id parsing.
//! - `store`: the `ItemRepository` seam and its in-memory implementation.
//! - `errors`: the two failure kinds surfaced to HTTP clients.

pub mod errors;
pub mod items;
pub mod store;
