use crate::config::PaymentConfig;
use crate::domain::gateway::{Confirmation, PaymentRequest};
use crate::domain::payment::{self, Amount, PayStatus, TransactionRecord};
use crate::domain::ports::{GatewayClient, GatewayRef, LedgerRef, TransactionLedger};
use crate::error::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};

const INVALID_PHONE: &str = "Invalid phone number format";
const CONFIRMATION_TIMEOUT: &str = "timeout";

/// Drives the multi-step lifecycle of payment attempts.
///
/// Each attempt runs as its own task and reports progress through an ordered
/// status stream ending in exactly one terminal status. Attempts share
/// nothing but the ledger; once started, an attempt runs to completion even
/// if the caller stops observing the stream.
pub struct PaymentOrchestrator {
    gateway: GatewayRef,
    ledger: LedgerRef,
    config: PaymentConfig,
}

impl PaymentOrchestrator {
    pub fn new(gateway: GatewayRef, ledger: LedgerRef, config: PaymentConfig) -> Self {
        Self {
            gateway,
            ledger,
            config,
        }
    }

    /// Starts a payment attempt and returns its status stream.
    ///
    /// The stream yields `Initiated` first and always ends with a terminal
    /// status; faults inside the attempt are converted to `Failed`, never
    /// surfaced as errors. Dropping the stream stops observation only.
    pub fn initiate_payment(&self, phone_number: &str, amount: Amount) -> ReceiverStream<PayStatus> {
        let (tx, rx) = mpsc::channel(8);
        let attempt = Attempt {
            gateway: Arc::clone(&self.gateway),
            ledger: Arc::clone(&self.ledger),
            config: self.config.clone(),
            phone_number: phone_number.to_owned(),
            amount,
        };

        tokio::spawn(async move {
            if let Err(e) = attempt.run(&tx).await {
                warn!(error = %e, "payment attempt aborted");
                let _ = tx
                    .send(PayStatus::Failed(format!("An error occurred: {e}")))
                    .await;
            }
        });

        ReceiverStream::new(rx)
    }

    /// Pure predicate over the accepted mobile-number shape.
    pub fn validate_phone_number(&self, phone_number: &str) -> bool {
        payment::validate_phone_number(phone_number)
    }

    /// Ledger lookup; `None` for unknown ids, no mutation on read.
    pub async fn get_transaction_details(
        &self,
        transaction_id: &str,
    ) -> Result<Option<TransactionRecord>> {
        self.ledger.get(transaction_id).await
    }
}

/// One run of the payment lifecycle for a single checkout action.
struct Attempt {
    gateway: GatewayRef,
    ledger: LedgerRef,
    config: PaymentConfig,
    phone_number: String,
    amount: Amount,
}

impl Attempt {
    async fn run(&self, tx: &mpsc::Sender<PayStatus>) -> Result<()> {
        let _ = tx.send(PayStatus::Initiated).await;
        info!(phone = %self.phone_number, amount = %self.amount.value(), "payment attempt started");

        if !payment::validate_phone_number(&self.phone_number) {
            debug!(phone = %self.phone_number, "rejected before network call");
            let _ = tx.send(PayStatus::Failed(INVALID_PHONE.to_string())).await;
            return Ok(());
        }

        let response = self.gateway.initiate(self.request()).await?;
        if !response.success {
            warn!(message = %response.message, "gateway rejected payment");
            let _ = tx.send(PayStatus::Failed(response.message)).await;
            return Ok(());
        }

        let _ = tx.send(PayStatus::AwaitingConfirmation).await;

        let confirmation = match tokio::time::timeout(
            self.config.confirmation_timeout,
            self.gateway.await_confirmation(&response.transaction_reference),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                warn!(reference = %response.transaction_reference, "confirmation wait timed out");
                let _ = tx
                    .send(PayStatus::Failed(CONFIRMATION_TIMEOUT.to_string()))
                    .await;
                return Ok(());
            }
        };

        match confirmation {
            Confirmation::Confirmed => {
                let record = TransactionRecord::completed(&self.phone_number, self.amount);
                let transaction_id = record.id.clone();
                self.ledger.put(record).await?;
                info!(%transaction_id, "payment completed");
                let _ = tx.send(PayStatus::Completed(transaction_id)).await;
            }
            Confirmation::Declined(reason) => {
                warn!(%reason, "payment declined by payer");
                let _ = tx.send(PayStatus::Failed(reason)).await;
            }
        }

        Ok(())
    }

    fn request(&self) -> PaymentRequest {
        PaymentRequest {
            username: self.config.account_username.clone(),
            network_code: self.config.network_code.clone(),
            amount: self.amount.value(),
            phone_number: self.phone_number.clone(),
            narration: self.config.narration.clone(),
            currency: self.config.currency.clone(),
            callback_url: self.config.callback_url.clone(),
        }
    }
}
