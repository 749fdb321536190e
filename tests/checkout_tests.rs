mod common;

use common::{collect, orchestrator_with};
use rust_decimal_macros::dec;
use shelfpay::application::checkout::{CheckoutCoordinator, CheckoutRequest, CheckoutState};
use shelfpay::application::orchestrator::PaymentOrchestrator;
use shelfpay::config::PaymentConfig;
use shelfpay::domain::order::OrderStatus;
use shelfpay::domain::payment::{Amount, PayStatus};
use shelfpay::domain::ports::{LedgerRef, OrderStore, TransactionLedger};
use shelfpay::infrastructure::gateway::{SimulatedGateway, SimulatedOutcome};
use shelfpay::infrastructure::in_memory::{InMemoryLedger, InMemoryOrderStore};
use std::sync::Arc;
use uuid::Uuid;

#[tokio::test]
async fn test_successful_attempt_end_to_end() {
    let (orchestrator, ledger) =
        orchestrator_with(Arc::new(SimulatedGateway::instant(SimulatedOutcome::Confirm)));
    let amount = Amount::new(dec!(500.0)).unwrap();

    let statuses = collect(orchestrator.initiate_payment("0712345678", amount)).await;

    assert_eq!(statuses[0], PayStatus::Initiated);
    assert_eq!(statuses[1], PayStatus::AwaitingConfirmation);
    let PayStatus::Completed(transaction_id) = &statuses[2] else {
        panic!("expected Completed, got {:?}", statuses[2]);
    };
    assert!(Uuid::parse_str(transaction_id).is_ok());

    let record = ledger.get(transaction_id).await.unwrap().unwrap();
    assert_eq!(record.amount, dec!(500.0));
    assert_eq!(record.phone_number, "0712345678");
}

#[tokio::test]
async fn test_checkout_reconciles_order_with_ledger() {
    let ledger: LedgerRef = Arc::new(InMemoryLedger::new());
    let orders = Arc::new(InMemoryOrderStore::new());
    let orchestrator = Arc::new(PaymentOrchestrator::new(
        Arc::new(SimulatedGateway::instant(SimulatedOutcome::Confirm)),
        Arc::clone(&ledger),
        PaymentConfig::default(),
    ));
    let coordinator = CheckoutCoordinator::new(orchestrator, orders.clone());

    let state = coordinator
        .checkout(CheckoutRequest {
            book_id: "book-1".into(),
            book_title: "Dune".into(),
            seller_id: "seller-1".into(),
            buyer_id: "buyer-1".into(),
            phone_number: "0712345678".into(),
            amount: Amount::new(dec!(500.0)).unwrap(),
        })
        .await;

    let CheckoutState::Success { transaction_id } = state else {
        panic!("expected Success, got {state:?}");
    };

    let sales = orders.get_sales("seller-1").await.unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].status, OrderStatus::Paid);
    assert_eq!(
        sales[0].payment_details.transaction_id.as_deref(),
        Some(transaction_id.as_str())
    );
    assert_eq!(sales[0].payment_details.amount, dec!(500.0));

    let record = ledger.get(&transaction_id).await.unwrap().unwrap();
    assert_eq!(record.amount, dec!(500.0));
}
