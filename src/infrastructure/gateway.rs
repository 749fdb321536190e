use crate::config::GatewayConfig;
use crate::domain::gateway::{Confirmation, PaymentRequest, PaymentResponse};
use crate::domain::ports::GatewayClient;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

const PAYMENTS_PATH: &str = "api/v2/payments";

/// HTTP adapter for the Payd mobile-money gateway.
///
/// Attaches static basic-auth credentials to every request and never retries;
/// one call maps to exactly one outbound request.
pub struct PaydGateway {
    client: reqwest::Client,
    config: GatewayConfig,
    poll_interval: Duration,
}

impl PaydGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            poll_interval: Duration::from_secs(5),
        }
    }

    fn url(&self, suffix: Option<&str>) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        match suffix {
            Some(suffix) => format!("{base}/{PAYMENTS_PATH}/{suffix}"),
            None => format!("{base}/{PAYMENTS_PATH}"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
impl GatewayClient for PaydGateway {
    async fn initiate(&self, request: PaymentRequest) -> Result<PaymentResponse> {
        let url = self.url(None);
        debug!(%url, phone = %request.phone_number, "sending payment initiation");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "gateway rejected initiation request");
            return Err(PaymentError::Gateway(format!(
                "gateway returned {status}: {body}"
            )));
        }

        Ok(response.json().await?)
    }

    async fn await_confirmation(&self, reference: &str) -> Result<Confirmation> {
        let url = self.url(Some(reference));
        loop {
            let response = self
                .client
                .get(&url)
                .basic_auth(&self.config.username, Some(&self.config.password))
                .send()
                .await?
                .error_for_status()?;
            let status: StatusResponse = response.json().await?;

            match status.status.as_str() {
                "COMPLETED" => return Ok(Confirmation::Confirmed),
                "FAILED" => {
                    let reason = status
                        .message
                        .unwrap_or_else(|| "Payment was declined".to_string());
                    return Ok(Confirmation::Declined(reason));
                }
                other => {
                    debug!(reference, status = other, "payment still pending");
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }
}

/// Outcome a [`SimulatedGateway`] is scripted to produce.
#[derive(Debug, Clone)]
pub enum SimulatedOutcome {
    /// Initiation accepted, payer confirms the charge.
    Confirm,
    /// Initiation rejected up front with `success = false`.
    Reject { message: String },
    /// Initiation accepted, payer declines on their handset.
    Decline { reason: String },
    /// Confirmation never arrives; lets callers exercise their timeout.
    Stall,
}

/// Deterministic stand-in for the real gateway.
///
/// Replaces the randomized success simulation of the mobile client: the
/// outcome is injected, so orchestration logic stays fully testable.
pub struct SimulatedGateway {
    initiate_delay: Duration,
    confirmation_delay: Duration,
    outcome: SimulatedOutcome,
}

impl SimulatedGateway {
    /// A confirming gateway with realistic delays: one second to accept the
    /// request, three more before the payer approves.
    pub fn new() -> Self {
        Self::with_delays(
            SimulatedOutcome::Confirm,
            Duration::from_secs(1),
            Duration::from_secs(3),
        )
    }

    /// A gateway with the given outcome and no delays, for tests.
    pub fn instant(outcome: SimulatedOutcome) -> Self {
        Self::with_delays(outcome, Duration::ZERO, Duration::ZERO)
    }

    pub fn with_delays(
        outcome: SimulatedOutcome,
        initiate_delay: Duration,
        confirmation_delay: Duration,
    ) -> Self {
        Self {
            initiate_delay,
            confirmation_delay,
            outcome,
        }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GatewayClient for SimulatedGateway {
    async fn initiate(&self, request: PaymentRequest) -> Result<PaymentResponse> {
        tokio::time::sleep(self.initiate_delay).await;
        debug!(phone = %request.phone_number, "simulated initiation");

        if let SimulatedOutcome::Reject { message } = &self.outcome {
            return Ok(PaymentResponse {
                channel: "MOBILE".to_string(),
                success: false,
                message: message.clone(),
                transaction_reference: String::new(),
            });
        }

        Ok(PaymentResponse {
            channel: "MOBILE".to_string(),
            success: true,
            message: "Request accepted".to_string(),
            transaction_reference: Uuid::new_v4().to_string(),
        })
    }

    async fn await_confirmation(&self, _reference: &str) -> Result<Confirmation> {
        match &self.outcome {
            SimulatedOutcome::Stall => std::future::pending().await,
            SimulatedOutcome::Decline { reason } => {
                tokio::time::sleep(self.confirmation_delay).await;
                Ok(Confirmation::Declined(reason.clone()))
            }
            _ => {
                tokio::time::sleep(self.confirmation_delay).await;
                Ok(Confirmation::Confirmed)
            }
        }
    }
}
