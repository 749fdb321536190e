use crate::domain::order::Order;
use crate::domain::payment::TransactionRecord;
use crate::domain::ports::{OrderStore, TransactionLedger};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory ledger of completed transactions.
///
/// Uses `Arc<RwLock<HashMap<String, TransactionRecord>>>` to allow shared
/// concurrent access from independent checkout attempts. Entries live for the
/// process lifetime; there is no eviction and no persistence across restarts.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    records: Arc<RwLock<HashMap<String, TransactionRecord>>>,
}

impl InMemoryLedger {
    /// Creates a new, empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionLedger for InMemoryLedger {
    async fn put(&self, record: TransactionRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, transaction_id: &str) -> Result<Option<TransactionRecord>> {
        let records = self.records.read().await;
        Ok(records.get(transaction_id).cloned())
    }
}

/// A thread-safe in-memory order store.
///
/// Stands in for the document-store collaborator in tests and the demo
/// binary.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<String, Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new, empty order store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn add_order(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().await;
        orders.insert(order.order_id.clone(), order);
        Ok(())
    }

    async fn get_orders(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.values().cloned().collect())
    }

    async fn get_order_by_id(&self, order_id: &str) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(order_id).cloned())
    }

    async fn get_purchases(&self, buyer_id: &str) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders
            .values()
            .filter(|order| order.buyer_id == buyer_id)
            .cloned()
            .collect())
    }

    async fn get_sales(&self, seller_id: &str) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders
            .values()
            .filter(|order| order.seller_id == seller_id)
            .cloned()
            .collect())
    }
}
