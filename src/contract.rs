//! Typed view of the DigitalWill contract interface.
//!
//! The interface description ships as a JSON asset byte-compatible with the
//! deployed contract, including the `updateWill`/`executeWill` entries this
//! client never invokes.

use ethers::abi::Abi;
use ethers::contract::{EthAbiType, EthEvent, Lazy};
use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};

/// Interface description of the deployed contract, parsed once.
pub static WILL_ABI: Lazy<Abi> = Lazy::new(|| {
    serde_json::from_str(include_str!("../abi/DigitalWill.json"))
        .expect("DigitalWill ABI asset is well-formed")
});

/// One bequeathed asset.
///
/// The contract accepts an array of these per will; this client sends
/// exactly one (see [`crate::will_client::WillDraft`]).
#[derive(Clone, Debug, PartialEq, Eq, EthAbiType, Serialize, Deserialize)]
pub struct Asset {
    pub asset_address: Address,
    pub asset_id: U256,
    pub beneficiary: Address,
    pub is_erc721: bool,
}

/// A stored will record as returned by the `wills` getter.
#[derive(Clone, Debug, PartialEq, Eq, EthAbiType, Serialize, Deserialize)]
pub struct WillSummary {
    pub creator: Address,
    pub name: String,
    pub date_of_birth: String,
    pub executor: Address,
    pub executed: bool,
}

/// Emitted when a will is created.
#[derive(Clone, Debug, PartialEq, Eq, EthEvent)]
pub struct WillCreated {
    #[ethevent(indexed)]
    pub will_id: U256,
    #[ethevent(indexed)]
    pub creator: Address,
}

/// Emitted when a will is updated. Not watched by this client.
#[derive(Clone, Debug, PartialEq, Eq, EthEvent)]
pub struct WillUpdated {
    #[ethevent(indexed)]
    pub will_id: U256,
}

/// Emitted when a will is executed. Not watched by this client.
#[derive(Clone, Debug, PartialEq, Eq, EthEvent)]
pub struct WillExecuted {
    #[ethevent(indexed)]
    pub will_id: U256,
}
