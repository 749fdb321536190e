//! Application layer containing the core payment orchestration.
//!
//! This module defines the `PaymentOrchestrator`, which drives a single
//! payment attempt through its lifecycle as a spawned task feeding a status
//! stream, and the `CheckoutCoordinator`, which maps those statuses to
//! presentation state and persists the order once payment succeeds.

pub mod checkout;
pub mod orchestrator;
