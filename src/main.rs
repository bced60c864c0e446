use anyhow::Result;
use tracing::error;

use digital_will_client::{ConnectError, WalletConfig, WillClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

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

    let session = client.session();
    println!("🔑 Connected wallet: {:?}", session.address);
    println!("⛓  Chain id: {}", session.chain_id);
    println!("📄 Will contract: {:?}", client.contract_address());

    match client.will_count().await {
        Ok(count) => println!("🔢 Total wills: {count}"),
        Err(e) => eprintln!("Total wills unavailable: {e}"),
    }

    Ok(())
}
