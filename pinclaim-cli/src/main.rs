//! PinClaim CLI
//!
//! Command-line interface for uploading files, claiming pins and keeping the
//! claims alive.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pinclaim_core::{PinClaimConfig, PinClaimError};
use pinclaim_lifecycle::{ExpirationStatus, PinClaimClient};

/// PinClaim - upload, claim and renew pinned files
#[derive(Parser)]
#[command(name = "pinclaim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    services: ServiceArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the service locations read from the environment.
#[derive(Args, Debug, Default)]
struct ServiceArgs {
    /// Pinning service URL
    #[arg(long, global = true, env = "PIN_SERVICE_URL")]
    pin_service_url: Option<String>,
    /// Wallet REST service URL
    #[arg(long, global = true, env = "WALLET_URL")]
    wallet_url: Option<String>,
    /// Signer service URL
    #[arg(long, global = true, env = "SIGNER_URL")]
    signer_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file to IPFS without claiming it
    PinUpload {
        /// File name inside the files directory
        #[arg(short, long, default_value = "")]
        filename: String,
    },

    /// Upload a file, pay for it and register the pin claim
    PinClaimFile {
        /// File name inside the files directory
        #[arg(short, long, default_value = "")]
        filename: String,
        /// Wallet paying for the claim
        #[arg(short = 'n', long = "name", default_value = "")]
        wallet_name: String,
    },

    /// Show the pin claim for a CID
    PinStatus {
        /// Content identifier
        #[arg(short, long, default_value = "")]
        cid: String,
    },

    /// Renew the pin claim for a CID
    PinRenew {
        /// Content identifier
        #[arg(short, long, default_value = "")]
        cid: String,
        /// Wallet paying for the renewal
        #[arg(short = 'n', long = "name", default_value = "")]
        wallet_name: String,
    },

    /// List pin claims the service has not validated yet
    UnprocessedPins,

    /// Resubmit an unvalidated pin claim
    Reprocess {
        /// Content identifier
        #[arg(short, long, default_value = "")]
        cid: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "pinclaim=debug,info"
    } else {
        "pinclaim=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = build_config(&cli.services);
    debug!(?config, "Loaded configuration");
    let client = PinClaimClient::from_config(config).context("Invalid configuration")?;

    match cli.command {
        Commands::PinUpload { filename } => cmd_pin_upload(&client, &filename).await,
        Commands::PinClaimFile { filename, wallet_name } => {
            cmd_pin_claim_file(&client, &filename, &wallet_name).await
        }
        Commands::PinStatus { cid } => cmd_pin_status(&client, &cid).await,
        Commands::PinRenew { cid, wallet_name } => cmd_pin_renew(&client, &cid, &wallet_name).await,
        Commands::UnprocessedPins => cmd_unprocessed_pins(&client).await,
        Commands::Reprocess { cid } => cmd_reprocess(&client, &cid).await,
    }
}

fn build_config(services: &ServiceArgs) -> PinClaimConfig {
    let mut config = PinClaimConfig::from_env();
    if let Some(url) = &services.pin_service_url {
        config.pin_service_url = url.clone();
    }
    if let Some(url) = &services.wallet_url {
        config.wallet_rest_url = url.clone();
    }
    if let Some(url) = &services.signer_url {
        config.signer_url = url.clone();
    }
    config
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("   {spinner:.green} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Upload a file
async fn cmd_pin_upload(client: &PinClaimClient, filename: &str) -> Result<()> {
    println!("{} {}", "📤 Uploading:".cyan().bold(), filename);

    let pb = spinner("Uploading to IPFS...")?;
    let result = client.orchestrator().upload(filename).await;
    pb.finish_and_clear();
    let cid = result?;

    println!("\n{}", "✅ File uploaded:".green().bold());
    println!("   {} {}", "CID:".yellow(), cid);

    Ok(())
}

/// Upload, pay for and register a pin claim
async fn cmd_pin_claim_file(client: &PinClaimClient, filename: &str, wallet_name: &str) -> Result<()> {
    println!("{} {}", "📌 Claiming pin for:".cyan().bold(), filename);

    let pb = spinner("Uploading file and broadcasting proof-of-burn...")?;
    let result = client.orchestrator().pin_claim_file(filename, wallet_name).await;
    pb.finish_and_clear();

    let receipt = match result {
        Ok(receipt) => receipt,
        Err(err) => {
            print_unrecorded_claim(&err);
            return Err(err.into());
        }
    };

    println!("\n{}", "✅ Pin claimed:".green().bold());
    println!("   {} {}", "CID:".yellow(), receipt.cid);
    println!("   {} {}", "Proof-of-burn txid:".dimmed(), receipt.txids.pob_txid);
    println!("   {} {}", "Claim txid:".dimmed(), receipt.txids.claim_txid);

    Ok(())
}

fn print_unrecorded_claim(err: &PinClaimError) {
    if let Some((cid, pob_txid, claim_txid)) = err.ledger_txids() {
        println!("\n{}", "⚠️  The claim is on the ledger but the pinning service did not record it.".red().bold());
        println!("   {} {}", "CID:".yellow(), cid);
        println!("   {} {}", "Proof-of-burn txid:".dimmed(), pob_txid);
        println!("   {} {}", "Claim txid:".dimmed(), claim_txid);
        println!("\n{}", "ℹ️  Next steps:".cyan());
        println!("   pinclaim reprocess -c {}", cid);
    }
}

/// Show the pin claim for a CID
async fn cmd_pin_status(client: &PinClaimClient, cid: &str) -> Result<()> {
    println!("{} {}", "🔍 Pin status for:".cyan().bold(), cid);

    let record = client.resolver().resolve(cid).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);

    if record.is_expired_at(Utc::now()) == Some(true) {
        println!(
            "\n{} {}",
            "⚠️  Pin claim expired at".yellow().bold(),
            record.expiration_time_iso().unwrap_or_default()
        );
        println!("   Renew it with: pinclaim pin-renew -c {} -n <wallet>", cid);
    }

    Ok(())
}

/// Renew a pin claim
async fn cmd_pin_renew(client: &PinClaimClient, cid: &str, wallet_name: &str) -> Result<()> {
    println!("{} {}", "🔄 Renewing pin claim for:".cyan().bold(), cid);

    let renewal = client.renewal();
    let plan = renewal.prepare(cid, wallet_name).await?;

    if plan.status == ExpirationStatus::NotYetExpired {
        println!(
            "{} {}",
            "⚠️  Pin claim has not expired yet. It expires at".yellow(),
            plan.expiration_time.to_rfc3339()
        );
    }

    println!(
        "   {} {} {}",
        "Token balance:".dimmed(),
        plan.balance.qty,
        plan.balance.ticker.as_deref().unwrap_or(&plan.balance.token_id)
    );

    let pb = spinner("Broadcasting proof-of-burn...")?;
    let result = renewal.execute(plan).await;
    pb.finish_and_clear();
    let receipt = result?;

    println!("\n{}", "✅ Pin claim renewed:".green().bold());
    println!("   {} {}", "Proof-of-burn txid:".dimmed(), receipt.txids.pob_txid);
    println!("   {} {}", "Claim txid:".dimmed(), receipt.txids.claim_txid);

    Ok(())
}

/// List unvalidated pin claims
async fn cmd_unprocessed_pins(client: &PinClaimClient) -> Result<()> {
    println!("{}", "📋 Unprocessed pin claims...".cyan().bold());

    let claims = client.reprocessing().list_unprocessed().await?;

    if claims.is_empty() {
        println!("\n{}", "No unprocessed pin claims.".yellow());
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&claims)?);
    println!("\n{} {} unprocessed claim(s)", "ℹ️".cyan(), claims.len());

    Ok(())
}

/// Resubmit an unvalidated pin claim
async fn cmd_reprocess(client: &PinClaimClient, cid: &str) -> Result<()> {
    println!("{} {}", "♻️  Reprocessing pin claim for:".cyan().bold(), cid);

    let submission = client.reprocessing().reprocess(cid).await?;

    println!("\n{}", "✅ Pin claim resubmitted:".green().bold());
    println!("   {} {}", "Filename:".dimmed(), submission.filename);
    println!("   {} {}", "Address:".dimmed(), submission.address);
    println!("   {} {}", "Proof-of-burn txid:".dimmed(), submission.proof_of_burn_txid);
    println!("   {} {}", "Claim txid:".dimmed(), submission.claim_txid);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_pin_claim_file() {
        let cli = Cli::try_parse_from(["pinclaim", "pin-claim-file", "-f", "a.pdf", "-n", "payer"]).unwrap();
        match cli.command {
            Commands::PinClaimFile { filename, wallet_name } => {
                assert_eq!(filename, "a.pdf");
                assert_eq!(wallet_name, "payer");
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn test_missing_flags_reach_validation() {
        let cli = Cli::try_parse_from(["pinclaim", "pin-status"]).unwrap();
        match cli.command {
            Commands::PinStatus { cid } => assert!(cid.is_empty()),
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn test_service_overrides() {
        let services = ServiceArgs {
            pin_service_url: Some("http://pins.local:5031".into()),
            ..Default::default()
        };
        let config = build_config(&services);
        assert_eq!(config.pin_service_url, "http://pins.local:5031");
    }
}
