//! Domain layer: value objects, wire types and the ports implemented by
//! the infrastructure adapters.

pub mod gateway;
pub mod order;
pub mod payment;
pub mod ports;
