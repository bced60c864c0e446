//! A client for creating and reading wills on the DigitalWill contract.

use core::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ethers::abi::RawLog;
use ethers::contract::{Contract, ContractCall, ContractError, EthLogDecode};
use ethers::providers::Middleware;
use ethers::types::{Address, TxHash, U256, U64};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::common::{connect_session, ConnectError, Session, SessionMiddleware, WalletConfig};
use crate::constants::CONFIRMATIONS;
use crate::contract::{Asset, WillCreated, WillSummary, WILL_ABI};

/// Represents errors that can occur while reading will state.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("will contract read error: {0}")]
    /// The node could not complete the read call.
    Call(String),
}

/// Represents errors that can occur while submitting a will creation.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("a submission is already awaiting confirmation")]
    /// A second submission was attempted while one is in flight.
    SubmissionPending,
    #[error("will creation call could not be encoded: {0}")]
    /// The call arguments did not fit the interface description.
    Encode(String),
    #[error("submission rejected before inclusion: {0}")]
    /// The signer or transport refused the transaction.
    Rejected(String),
    #[error("submission reverted on-chain: {0}")]
    /// The contract rejected the call.
    Reverted(String),
    #[error("submission was not confirmed: {0}")]
    /// The transaction left the mempool without being mined.
    ConfirmationDropped(String),
}

/// Operator input for one will creation.
///
/// Exactly one asset is bequeathed per submission. The contract-side call
/// takes an asset array; [`WillClient::creation_call`] wraps this single
/// asset into a one-element array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WillDraft {
    pub name: String,
    pub date_of_birth: String,
    pub executor: Address,
    pub asset: Asset,
}

/// Outcome of a confirmed will creation.
#[derive(Clone, Debug, Serialize)]
pub struct CreationReceipt {
    pub tx_hash: TxHash,
    pub block_number: Option<U64>,
    /// Will id decoded from the `WillCreated` event, when present in the
    /// receipt logs.
    pub will_id: Option<U256>,
    /// Counter value re-fetched from the contract after confirmation. Never
    /// a locally incremented guess.
    pub total_wills: Option<U256>,
}

/// A typed handle to the DigitalWill contract, bound to one wallet session.
///
/// The only way to obtain one outside of tests is a successful
/// [`WillClient::connect`], so no contract action can run without a session.
pub struct WillClient<M> {
    contract: Contract<M>,
    session: Session,
    submission_pending: AtomicBool,
}

impl WillClient<SessionMiddleware> {
    /// Connects the wallet and binds the contract handle.
    ///
    /// On success the handle is bound to the configured contract address and
    /// the freshly authorized session. A best-effort read of the will
    /// counter runs immediately; its failure is logged at warn level and
    /// does not fail the connect.
    pub async fn connect(config: &WalletConfig) -> Result<Self, ConnectError> {
        let (middleware, session) = connect_session(config).await?;
        let client = Self::bound(config.contract_address, middleware, session);
        match client.will_count().await {
            Ok(count) => info!(%count, "connected to will contract"),
            Err(e) => warn!("could not fetch will count after connect: {e}"),
        }
        Ok(client)
    }
}

impl<M: Middleware + 'static> WillClient<M> {
    /// Binds a handle from parts.
    ///
    /// Deterministic: the interface description is a compiled-in constant
    /// and the session says who signs. No failure path.
    pub fn bound(address: Address, middleware: Arc<M>, session: Session) -> Self {
        Self {
            contract: Contract::new(address, WILL_ABI.clone(), middleware),
            session,
            submission_pending: AtomicBool::new(false),
        }
    }

    /// Address the handle is bound to.
    pub fn contract_address(&self) -> Address {
        self.contract.address()
    }

    /// The session this handle signs with.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether a submission is currently awaiting confirmation.
    pub fn submission_in_flight(&self) -> bool {
        self.submission_pending.load(Ordering::SeqCst)
    }

    /// Fetches the total number of wills from the contract. Always a fresh
    /// read; the client never caches this value.
    pub async fn will_count(&self) -> Result<U256, ReadError> {
        self.contract
            .method::<_, U256>("willCount", ())
            .map_err(|e| ReadError::Call(e.to_string()))?
            .call()
            .await
            .map_err(|e| ReadError::Call(e.to_string()))
    }

    /// Fetches one stored will record.
    pub async fn will(&self, index: U256) -> Result<WillSummary, ReadError> {
        self.contract
            .method::<_, WillSummary>("wills", index)
            .map_err(|e| ReadError::Call(e.to_string()))?
            .call()
            .await
            .map_err(|e| ReadError::Call(e.to_string()))
    }

    /// Builds the creation call for a draft.
    ///
    /// The contract accepts a variable-length asset array; sending exactly
    /// one asset per will is a product decision of this client, so the
    /// single draft asset is wrapped into a one-element array here.
    pub fn creation_call(&self, draft: &WillDraft) -> Result<ContractCall<M, ()>, SubmitError> {
        let assets = vec![draft.asset.clone()];
        self.contract
            .method::<_, ()>(
                "createWill",
                (
                    draft.name.clone(),
                    draft.date_of_birth.clone(),
                    draft.executor,
                    assets,
                ),
            )
            .map_err(|e| SubmitError::Encode(e.to_string()))
    }

    /// Marks a submission as in flight.
    ///
    /// Fails fast with [`SubmitError::SubmissionPending`] while another
    /// submission holds the flag; the flag clears when the returned guard
    /// drops, whether the submission succeeded or not.
    pub fn begin_submission(&self) -> Result<SubmissionGuard<'_>, SubmitError> {
        if self
            .submission_pending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SubmitError::SubmissionPending);
        }
        Ok(SubmissionGuard {
            flag: &self.submission_pending,
        })
    }

    /// Creates a will carrying one asset and waits for one confirmation.
    ///
    /// The transaction is reported as submitted once the node accepts it,
    /// then awaited until [`CONFIRMATIONS`] confirmations are observed. On
    /// success the assigned will id is decoded from the `WillCreated` event
    /// and the counter is re-fetched. Failures leave the session and the
    /// handle untouched.
    pub async fn create_will(&self, draft: &WillDraft) -> Result<CreationReceipt, SubmitError> {
        let _pending = self.begin_submission()?;
        let call = self.creation_call(draft)?;

        let sent = call.send().await.map_err(classify_send_error)?;
        let tx_hash = *sent;
        info!(?tx_hash, "will creation submitted, waiting for confirmation");

        let receipt = sent
            .confirmations(CONFIRMATIONS)
            .await
            .map_err(|e| SubmitError::ConfirmationDropped(e.to_string()))?
            .ok_or_else(|| {
                SubmitError::ConfirmationDropped(format!(
                    "transaction {tx_hash:?} was dropped from the mempool"
                ))
            })?;

        if receipt.status == Some(U64::zero()) {
            return Err(SubmitError::Reverted(format!(
                "transaction {tx_hash:?} reverted"
            )));
        }

        let will_id = receipt
            .logs
            .iter()
            .filter(|log| log.address == self.contract.address())
            .find_map(|log| {
                let raw = RawLog {
                    topics: log.topics.clone(),
                    data: log.data.to_vec(),
                };
                WillCreated::decode_log(&raw).ok()
            })
            .map(|event| event.will_id);
        info!(?tx_hash, ?will_id, "will created");

        let total_wills = match self.will_count().await {
            Ok(count) => Some(count),
            Err(e) => {
                warn!("could not refresh will count after creation: {e}");
                None
            }
        };

        Ok(CreationReceipt {
            tx_hash,
            block_number: receipt.block_number,
            will_id,
            total_wills,
        })
    }
}

impl<M> Deref for WillClient<M> {
    type Target = Contract<M>;

    fn deref(&self) -> &Self::Target {
        &self.contract
    }
}

/// Clears the in-flight flag when the submission resolves, either way.
pub struct SubmissionGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

fn classify_send_error<M: Middleware>(err: ContractError<M>) -> SubmitError {
    if let ContractError::Revert(_) = err {
        return SubmitError::Reverted(err.to_string());
    }
    let text = err.to_string();
    // Node-side gas estimation surfaces reverts as plain RPC errors.
    if text.contains("revert") {
        SubmitError::Reverted(text)
    } else {
        SubmitError::Rejected(text)
    }
}
