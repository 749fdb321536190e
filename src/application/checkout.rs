use super::orchestrator::PaymentOrchestrator;
use crate::domain::order::Order;
use crate::domain::payment::{Amount, PayStatus};
use crate::domain::ports::{OrderStore, OrderStoreRef};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_stream::StreamExt;
use tracing::{error, info};

/// Presentation state of a checkout, derived from the payment status stream.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CheckoutState {
    #[default]
    Idle,
    Processing,
    Success {
        transaction_id: String,
    },
    Error {
        message: String,
    },
}

impl CheckoutState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Error { .. })
    }
}

/// Everything needed to pay for and record one book purchase.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub book_id: String,
    pub book_title: String,
    pub seller_id: String,
    pub buyer_id: String,
    pub phone_number: String,
    pub amount: Amount,
}

/// Boundary glue between the orchestrator and the presentation layer.
///
/// Consumes an attempt's status stream, publishes the mapped state through a
/// watch channel, and owns the order write-through: the order is persisted
/// before a success state is ever published, so a payment can not be reported
/// successful with no matching order.
pub struct CheckoutCoordinator {
    orchestrator: Arc<PaymentOrchestrator>,
    orders: OrderStoreRef,
    state: watch::Sender<CheckoutState>,
}

impl CheckoutCoordinator {
    pub fn new(orchestrator: Arc<PaymentOrchestrator>, orders: OrderStoreRef) -> Self {
        let (state, _) = watch::channel(CheckoutState::Idle);
        Self {
            orchestrator,
            orders,
            state,
        }
    }

    /// Latest observed state; starts at `Idle`.
    pub fn subscribe(&self) -> watch::Receiver<CheckoutState> {
        self.state.subscribe()
    }

    /// Runs one checkout to its terminal state.
    pub async fn checkout(&self, request: CheckoutRequest) -> CheckoutState {
        let mut statuses = self
            .orchestrator
            .initiate_payment(&request.phone_number, request.amount);

        let mut last = CheckoutState::Processing;
        while let Some(status) = statuses.next().await {
            let next = match status {
                PayStatus::Initiated | PayStatus::AwaitingConfirmation => CheckoutState::Processing,
                PayStatus::Completed(transaction_id) => {
                    self.record_order(&request, transaction_id).await
                }
                PayStatus::Failed(reason) => CheckoutState::Error { message: reason },
            };
            self.state.send_replace(next.clone());
            last = next;
            if last.is_terminal() {
                break;
            }
        }
        last
    }

    async fn record_order(&self, request: &CheckoutRequest, transaction_id: String) -> CheckoutState {
        let order = Order::paid(
            &request.book_id,
            &request.book_title,
            &request.seller_id,
            &request.buyer_id,
            request.amount.value(),
            &transaction_id,
        );
        let order_id = order.order_id.clone();

        match self.orders.add_order(order).await {
            Ok(()) => {
                info!(%order_id, %transaction_id, "order recorded");
                CheckoutState::Success { transaction_id }
            }
            // The ledger entry survives; the mismatch is surfaced, never
            // silently dropped.
            Err(e) => {
                error!(%transaction_id, error = %e, "payment captured but order was not saved");
                CheckoutState::Error {
                    message: format!("Payment captured but order was not saved: {e}"),
                }
            }
        }
    }
}
