use super::gateway::{Confirmation, PaymentRequest, PaymentResponse};
use super::order::Order;
use super::payment::TransactionRecord;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Store of completed transaction records.
///
/// Lookups on missing ids return `None`, never an error. Implementations must
/// be safe under concurrent writes from independent checkout attempts.
#[async_trait]
pub trait TransactionLedger: Send + Sync {
    async fn put(&self, record: TransactionRecord) -> Result<()>;
    async fn get(&self, transaction_id: &str) -> Result<Option<TransactionRecord>>;
}

/// Client for the remote mobile-money gateway.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    /// Sends exactly one initiation request. Rejections come back as
    /// `success = false`; transport failures propagate as errors.
    async fn initiate(&self, request: PaymentRequest) -> Result<PaymentResponse>;

    /// Waits for the payer to approve or decline the charge on their phone.
    /// Callers are expected to bound this wait with a timeout.
    async fn await_confirmation(&self, reference: &str) -> Result<Confirmation>;
}

/// External storage collaborator for marketplace orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn add_order(&self, order: Order) -> Result<()>;
    async fn get_orders(&self) -> Result<Vec<Order>>;
    async fn get_order_by_id(&self, order_id: &str) -> Result<Option<Order>>;
    async fn get_purchases(&self, buyer_id: &str) -> Result<Vec<Order>>;
    async fn get_sales(&self, seller_id: &str) -> Result<Vec<Order>>;
}

pub type LedgerRef = Arc<dyn TransactionLedger>;
pub type GatewayRef = Arc<dyn GatewayClient>;
pub type OrderStoreRef = Arc<dyn OrderStore>;
