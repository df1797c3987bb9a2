//! snipbin: paste sharing over a small HTTP API.
//!
//! This facade re-exports the server crate, which in turn re-exports the
//! core domain types (`Config`, `Database`, `PasteRepository`, models).

pub use snipbin_server::*;
