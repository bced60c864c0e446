//! Submits one will creation and waits for its confirmation.

use anyhow::Result;
use clap::Parser;
use ethers::types::{Address, U256};
use tracing::error;

use digital_will_client::{Asset, ConnectError, SubmitError, WalletConfig, WillClient, WillDraft};

/// Create a will holding a single asset on the DigitalWill contract.
#[derive(Parser)]
#[command(name = "create-will", version, about)]
struct Args {
    /// Full name of the testator
    #[arg(long)]
    name: String,

    /// Date of birth, stored verbatim by the contract
    #[arg(long)]
    dob: String,

    /// Executor account address
    #[arg(long)]
    executor: Address,

    /// Token contract address of the bequeathed asset
    #[arg(long)]
    asset_address: Address,

    /// Token id of the bequeathed asset (decimal)
    #[arg(long)]
    asset_id: String,

    /// Beneficiary account address
    #[arg(long)]
    beneficiary: Address,

    /// The asset follows the ERC-721 transfer standard
    #[arg(long)]
    is_erc721: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    // -------------------------------------------------------------------------
    // STEP 1 – Connect the wallet and bind the contract
    // -------------------------------------------------------------------------
    let config = WalletConfig::from_env();
    let client = match WillClient::connect(&config).await {
        Ok(client) => client,
        Err(e @ ConnectError::ProviderUnavailable(_)) => {
            error!("{e}");
            eprintln!("No wallet provider available. Set WILL_RPC_URL and retry.");
            std::process::exit(1);
        }
        Err(e @ ConnectError::AuthorizationDenied(_)) => {
            error!("{e}");
            eprintln!("Wallet authorization was denied. Check WILL_PRIVATE_KEY.");
            std::process::exit(1);
        }
    };

    println!("🔑 Connected wallet: {:?}", client.session().address);
    println!("📄 Will contract: {:?}", client.contract_address());
    if let Ok(count) = client.will_count().await {
        println!("🔢 Total wills before: {count}");
    }

    // -------------------------------------------------------------------------
    // STEP 2 – Build the draft (one asset per will)
    // -------------------------------------------------------------------------
    let draft = WillDraft {
        name: args.name,
        date_of_birth: args.dob,
        executor: args.executor,
        asset: Asset {
            asset_address: args.asset_address,
            asset_id: U256::from_dec_str(&args.asset_id)?,
            beneficiary: args.beneficiary,
            is_erc721: args.is_erc721,
        },
    };

    // -------------------------------------------------------------------------
    // STEP 3 – Submit and wait for one confirmation
    // -------------------------------------------------------------------------
    println!("🚀 Submitting will creation …");
    match client.create_will(&draft).await {
        Ok(receipt) => {
            println!("✅ Will created successfully!");
            if let Some(id) = receipt.will_id {
                println!("🆔 Will id: {id}");
                if let Ok(summary) = client.will(id).await {
                    println!("📜 Stored record: {}", serde_json::to_string(&summary)?);
                }
            }
            if let Some(count) = receipt.total_wills {
                println!("🔢 Total wills now: {count}");
            }
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }
        Err(e @ SubmitError::SubmissionPending) => {
            eprintln!("⏳ {e}");
            std::process::exit(1);
        }
        Err(e) => {
            error!("will creation failed: {e}");
            eprintln!("❌ Error creating will: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}
