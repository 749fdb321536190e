//! Infrastructure adapters: in-memory stores and the gateway clients.

pub mod gateway;
pub mod in_memory;
