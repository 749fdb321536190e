use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment-initiation request as sent on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Merchant account username at the gateway.
    pub username: String,
    pub network_code: String,
    pub amount: Decimal,
    pub phone_number: String,
    pub narration: String,
    pub currency: String,
    pub callback_url: String,
}

/// Synchronous accept/reject response to an initiation request.
///
/// A well-formed rejection arrives as `success = false` with a human-readable
/// `message`; transport failures are surfaced as errors by the client instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    #[serde(default)]
    pub channel: String,
    pub success: bool,
    pub message: String,
    pub transaction_reference: String,
}

/// Outcome of the payer approving (or not) the charge on their handset.
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    Confirmed,
    Declined(String),
}
