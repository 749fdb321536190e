use crate::error::PaymentError;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kenyan mobile numbers: an optional `254`/`+254`/`0` prefix followed by a
/// 9-digit subscriber number whose first digit is 1-7.
static PHONE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:254|\+254|0)?([1-7]\d{8})$").expect("phone number regex"));

/// Checks whether a phone number can receive a mobile-money charge request.
///
/// Pure predicate; also usable for pre-submit validation in a UI.
pub fn validate_phone_number(phone_number: &str) -> bool {
    PHONE_NUMBER.is_match(phone_number)
}

/// Represents a positive monetary amount for a payment.
///
/// Ensures that charge amounts are always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::Validation(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Status of a single payment attempt as it moves through its lifecycle.
///
/// `Completed` and `Failed` are terminal; the status stream for an attempt
/// always ends with exactly one of them.
#[derive(Debug, Clone, PartialEq)]
pub enum PayStatus {
    Initiated,
    AwaitingConfirmation,
    Completed(String),
    Failed(String),
}

impl PayStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed(_) | Self::Failed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

/// A completed transaction as recorded in the ledger.
///
/// Records are written only when an attempt completes successfully; a failed
/// attempt leaves no trace here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    pub phone_number: String,
    pub amount: Decimal,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
    pub status: PaymentStatus,
}

impl TransactionRecord {
    /// Creates a completed record with a freshly generated id.
    pub fn completed(phone_number: &str, amount: Amount) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            phone_number: phone_number.to_owned(),
            amount: amount.value(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            status: PaymentStatus::Completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_phone_numbers() {
        for phone in [
            "0712345678",
            "712345678",
            "254712345678",
            "+254712345678",
            "0112345678",
            "0423456789",
        ] {
            assert!(validate_phone_number(phone), "{phone} should be valid");
        }
    }

    #[test]
    fn test_invalid_phone_numbers() {
        for phone in [
            "12345",
            "",
            "0812345678",
            "0912345678",
            "07123456789",
            "071234567",
            "+2540712345678",
            "254 712345678",
            "07123a5678",
        ] {
            assert!(!validate_phone_number(phone), "{phone} should be invalid");
        }
    }

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(1.0)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0.0)),
            Err(PaymentError::Validation(_))
        ));
        assert!(matches!(
            Amount::new(dec!(-1.0)),
            Err(PaymentError::Validation(_))
        ));
    }

    #[test]
    fn test_completed_record_fields() {
        let amount = Amount::new(dec!(500.0)).unwrap();
        let record = TransactionRecord::completed("0712345678", amount);

        assert_eq!(record.phone_number, "0712345678");
        assert_eq!(record.amount, dec!(500.0));
        assert_eq!(record.status, PaymentStatus::Completed);
        assert!(record.timestamp > 0);
        assert!(Uuid::parse_str(&record.id).is_ok());
    }

    #[test]
    fn test_record_ids_are_unique() {
        let amount = Amount::new(dec!(1.0)).unwrap();
        let a = TransactionRecord::completed("0712345678", amount);
        let b = TransactionRecord::completed("0712345678", amount);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!PayStatus::Initiated.is_terminal());
        assert!(!PayStatus::AwaitingConfirmation.is_terminal());
        assert!(PayStatus::Completed("tx".into()).is_terminal());
        assert!(PayStatus::Failed("reason".into()).is_terminal());
    }
}
