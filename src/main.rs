use clap::Parser;
use miette::{IntoDiagnostic, Result, miette};
use rust_decimal::Decimal;
use shelfpay::application::orchestrator::PaymentOrchestrator;
use shelfpay::config::{GatewayConfig, PaymentConfig};
use shelfpay::domain::payment::{Amount, PayStatus};
use shelfpay::domain::ports::{GatewayRef, LedgerRef, TransactionLedger};
use shelfpay::infrastructure::gateway::{PaydGateway, SimulatedGateway};
use shelfpay::infrastructure::in_memory::InMemoryLedger;
use std::sync::Arc;
use tokio_stream::StreamExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Payer phone number, e.g. 0712345678
    phone_number: String,

    /// Amount to charge in KES
    amount: Decimal,

    /// Gateway base URL. When omitted, a simulated gateway is used; when
    /// given, credentials are read from SHELFPAY_GATEWAY_USERNAME and
    /// SHELFPAY_GATEWAY_PASSWORD.
    #[arg(long)]
    gateway_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,shelfpay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let amount = Amount::new(cli.amount).into_diagnostic()?;

    let gateway: GatewayRef = match cli.gateway_url {
        Some(url) => {
            let mut config = GatewayConfig::from_env().into_diagnostic()?;
            config.base_url = url;
            Arc::new(PaydGateway::new(config))
        }
        None => Arc::new(SimulatedGateway::new()),
    };
    let ledger: LedgerRef = Arc::new(InMemoryLedger::new());
    let orchestrator =
        PaymentOrchestrator::new(gateway, Arc::clone(&ledger), PaymentConfig::default());

    let mut statuses = orchestrator.initiate_payment(&cli.phone_number, amount);
    let mut failure = None;
    while let Some(status) = statuses.next().await {
        match status {
            PayStatus::Initiated => println!("Payment initiated"),
            PayStatus::AwaitingConfirmation => {
                println!("Awaiting confirmation, check your phone")
            }
            PayStatus::Completed(transaction_id) => {
                println!("Payment completed: {transaction_id}");
                if let Some(record) = ledger.get(&transaction_id).await.into_diagnostic()? {
                    println!("Recorded {} for {}", record.amount, record.phone_number);
                }
            }
            PayStatus::Failed(reason) => failure = Some(reason),
        }
    }

    match failure {
        Some(reason) => Err(miette!("payment failed: {reason}")),
        None => Ok(()),
    }
}
