#![allow(dead_code)]

use async_trait::async_trait;
use shelfpay::application::orchestrator::PaymentOrchestrator;
use shelfpay::config::PaymentConfig;
use shelfpay::domain::gateway::{Confirmation, PaymentRequest, PaymentResponse};
use shelfpay::domain::payment::PayStatus;
use shelfpay::domain::ports::{GatewayClient, GatewayRef, LedgerRef};
use shelfpay::error::{PaymentError, Result};
use shelfpay::infrastructure::in_memory::InMemoryLedger;
use std::sync::Arc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;

/// Orchestrator over a fresh ledger, with a short confirmation timeout so
/// tests never hang on a stalled gateway.
pub fn orchestrator_with(gateway: GatewayRef) -> (PaymentOrchestrator, LedgerRef) {
    let ledger: LedgerRef = Arc::new(InMemoryLedger::new());
    let config = PaymentConfig {
        confirmation_timeout: std::time::Duration::from_millis(200),
        ..PaymentConfig::default()
    };
    let orchestrator = PaymentOrchestrator::new(gateway, Arc::clone(&ledger), config);
    (orchestrator, ledger)
}

/// Drains a status stream to completion.
pub async fn collect(mut stream: ReceiverStream<PayStatus>) -> Vec<PayStatus> {
    let mut statuses = Vec::new();
    while let Some(status) = stream.next().await {
        statuses.push(status);
    }
    statuses
}

/// Gateway whose transport always fails, for fault-normalization tests.
pub struct FailingGateway;

#[async_trait]
impl GatewayClient for FailingGateway {
    async fn initiate(&self, _request: PaymentRequest) -> Result<PaymentResponse> {
        Err(PaymentError::Gateway("connection reset by peer".into()))
    }

    async fn await_confirmation(&self, _reference: &str) -> Result<Confirmation> {
        Err(PaymentError::Gateway("connection reset by peer".into()))
    }
}
