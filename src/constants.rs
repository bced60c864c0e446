use ethers::types::Address;

// contract deployment
pub const WILL_CONTRACT_ADDRESS: &str = "0x5B38Da6a701c568545dCfcB03FcB875f56beddC4";

// wallet environment
pub const RPC_URL_ENV: &str = "WILL_RPC_URL";
pub const PRIVATE_KEY_ENV: &str = "WILL_PRIVATE_KEY";
pub const CONTRACT_ADDRESS_ENV: &str = "WILL_CONTRACT_ADDRESS";

// submission behaviour
pub const CONFIRMATIONS: usize = 1;
pub const POLL_INTERVAL_MS: u64 = 1_000;

/// The fixed deployment address as a typed value.
pub fn will_contract_address() -> Address {
    WILL_CONTRACT_ADDRESS
        .parse()
        .expect("WILL_CONTRACT_ADDRESS is a valid address constant")
}
