use std::sync::Arc;
use std::time::Duration;

use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::Address;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::constants::{
    will_contract_address, CONTRACT_ADDRESS_ENV, POLL_INTERVAL_MS, PRIVATE_KEY_ENV, RPC_URL_ENV,
};

/// Represents errors that can occur while establishing a wallet session.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("wallet provider unavailable: {0}")]
    /// No RPC endpoint is configured, or the endpoint did not answer.
    ProviderUnavailable(String),
    #[error("wallet authorization denied: {0}")]
    /// No signing key was granted, or the key material was refused.
    AuthorizationDenied(String),
}

/// Wallet configuration, sourced from the process environment.
#[derive(Clone, Debug)]
pub struct WalletConfig {
    pub rpc_url: Option<String>,
    pub private_key: Option<String>,
    pub contract_address: Address,
}

impl WalletConfig {
    /// Reads the wallet environment. Variables from a `.env` file are merged
    /// in; values already present in the process environment win.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            rpc_url: std::env::var(RPC_URL_ENV).ok(),
            private_key: std::env::var(PRIVATE_KEY_ENV).ok(),
            contract_address: std::env::var(CONTRACT_ADDRESS_ENV)
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_else(will_contract_address),
        }
    }
}

/// A connected account: the address authorized to sign and the chain it
/// signs for. Lives as long as the client that holds it; nothing persists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Session {
    pub address: Address,
    pub chain_id: u64,
}

/// Middleware stack of a live session: an HTTP provider wrapped with the
/// local signing wallet.
pub type SessionMiddleware = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Requests account authorization and derives the active account.
///
/// The provider must be configured before any signing key is considered, so
/// a missing endpoint always surfaces as [`ConnectError::ProviderUnavailable`]
/// and a missing or refused key as [`ConnectError::AuthorizationDenied`].
/// Neither failure leaves any session state behind.
pub async fn connect_session(
    config: &WalletConfig,
) -> Result<(Arc<SessionMiddleware>, Session), ConnectError> {
    let raw_url = config
        .rpc_url
        .as_deref()
        .ok_or_else(|| ConnectError::ProviderUnavailable(format!("{RPC_URL_ENV} is not set")))?;
    let url = Url::parse(raw_url).map_err(|e| {
        ConnectError::ProviderUnavailable(format!("endpoint url {raw_url} is malformed: {e}"))
    })?;

    let wallet = config
        .private_key
        .as_deref()
        .ok_or_else(|| ConnectError::AuthorizationDenied(format!("{PRIVATE_KEY_ENV} is not set")))?
        .parse::<LocalWallet>()
        .map_err(|e| ConnectError::AuthorizationDenied(format!("signing key refused: {e}")))?;

    let provider = Provider::<Http>::try_from(url.as_str())
        .map_err(|e| ConnectError::ProviderUnavailable(e.to_string()))?
        .interval(Duration::from_millis(POLL_INTERVAL_MS));

    // Probe the endpoint; the answer also fixes the chain id the wallet
    // signs for.
    let chain_id = provider.get_chainid().await.map_err(|e| {
        ConnectError::ProviderUnavailable(format!("endpoint {url} did not answer: {e}"))
    })?;

    let wallet = wallet.with_chain_id(chain_id.as_u64());
    let address = wallet.address();
    let middleware = Arc::new(SignerMiddleware::new(provider, wallet));
    debug!(address = ?address, chain_id = chain_id.as_u64(), "wallet session established");

    Ok((
        middleware,
        Session {
            address,
            chain_id: chain_id.as_u64(),
        },
    ))
}
