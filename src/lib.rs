//! Client for the DigitalWill contract.
//!
//! Connects a wallet session from environment configuration, binds a typed
//! handle to the deployed contract, and submits single-asset will
//! creations, waiting for one confirmation each.

pub mod common;
pub mod constants;
pub mod contract;
pub mod will_client;

pub use common::{connect_session, ConnectError, Session, SessionMiddleware, WalletConfig};
pub use contract::{Asset, WillCreated, WillExecuted, WillSummary, WillUpdated};
pub use will_client::{
    CreationReceipt, ReadError, SubmissionGuard, SubmitError, WillClient, WillDraft,
};
