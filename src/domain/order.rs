use super::payment::PaymentStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order created, awaiting payment.
    Pending,
    /// Payment confirmed.
    Paid,
    /// Book sent by seller.
    Shipped,
    /// Book received by buyer.
    Delivered,
    Cancelled,
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Mpesa,
    Card,
    BankTransfer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub transaction_id: Option<String>,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub amount: Decimal,
}

/// A marketplace order linking a buyer, a seller and a book.
///
/// Persisted by the external storage collaborator; the payment core only
/// produces fully-formed orders after a successful charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub book_id: String,
    pub book_title: String,
    pub seller_id: String,
    pub buyer_id: String,
    pub price: Decimal,
    /// Creation time, epoch milliseconds.
    pub order_date: i64,
    pub status: OrderStatus,
    pub payment_details: PaymentDetails,
}

impl Order {
    /// Builds a paid order referencing a completed ledger transaction.
    pub fn paid(
        book_id: &str,
        book_title: &str,
        seller_id: &str,
        buyer_id: &str,
        price: Decimal,
        transaction_id: &str,
    ) -> Self {
        Self {
            order_id: Uuid::new_v4().to_string(),
            book_id: book_id.to_owned(),
            book_title: book_title.to_owned(),
            seller_id: seller_id.to_owned(),
            buyer_id: buyer_id.to_owned(),
            price,
            order_date: chrono::Utc::now().timestamp_millis(),
            status: OrderStatus::Paid,
            payment_details: PaymentDetails {
                transaction_id: Some(transaction_id.to_owned()),
                payment_method: PaymentMethod::Mpesa,
                payment_status: PaymentStatus::Completed,
                amount: price,
            },
        }
    }
}
