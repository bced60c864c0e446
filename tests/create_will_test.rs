use std::sync::Arc;

use digital_will_client::constants::will_contract_address;
use digital_will_client::{Asset, Session, WillClient, WillCreated, WillDraft};
use ethers::abi::RawLog;
use ethers::contract::EthEvent;
use ethers::providers::{MockProvider, Provider};
use ethers::types::{Address, H256, U256};
use ethers::utils::id;

fn mocked_client() -> (WillClient<Provider<MockProvider>>, MockProvider) {
    let (provider, mock) = Provider::mocked();
    let session = Session {
        address: Address::repeat_byte(0xAA),
        chain_id: 31337,
    };
    let client = WillClient::bound(will_contract_address(), Arc::new(provider), session);
    (client, mock)
}

// The worked example: one asset, submitted as a one-element array.
fn sample_draft() -> WillDraft {
    WillDraft {
        name: "Alice".to_string(),
        date_of_birth: "1990-01-01".to_string(),
        executor: Address::repeat_byte(0xE0),
        asset: Asset {
            asset_address: Address::repeat_byte(0x70),
            asset_id: U256::from(7),
            beneficiary: Address::repeat_byte(0xBE),
            is_erc721: true,
        },
    }
}

#[test]
fn creation_call_targets_the_canonical_function() {
    let (client, _mock) = mocked_client();
    let call = client
        .creation_call(&sample_draft())
        .expect("draft fits the interface");
    let calldata = call.calldata().expect("calldata is populated");

    let selector = id("createWill(string,string,address,(address,uint256,address,bool)[])");
    assert_eq!(
        hex::encode(&calldata[..4]),
        hex::encode(selector),
        "selector must match the canonical createWill signature"
    );
}

#[test]
fn creation_call_wraps_exactly_one_asset() {
    let (client, _mock) = mocked_client();
    let draft = sample_draft();
    let call = client.creation_call(&draft).expect("draft fits the interface");
    let calldata = call.calldata().expect("calldata is populated");

    let (name, date_of_birth, executor, assets): (String, String, Address, Vec<Asset>) = client
        .decode("createWill", &calldata)
        .expect("calldata round-trips through the interface description");

    assert_eq!(name, "Alice");
    assert_eq!(date_of_birth, "1990-01-01");
    assert_eq!(executor, draft.executor);
    assert_eq!(assets.len(), 1, "the client always sends a single asset");
    assert_eq!(assets[0], draft.asset);
}

#[test]
fn will_created_event_decodes_from_a_receipt_log() {
    let creator = Address::repeat_byte(0x22);
    let mut creator_topic = [0u8; 32];
    creator_topic[12..].copy_from_slice(creator.as_bytes());

    let raw = RawLog {
        topics: vec![
            WillCreated::signature(),
            H256::from_low_u64_be(4),
            H256::from(creator_topic),
        ],
        data: Vec::new(),
    };

    let event = WillCreated::decode_log(&raw).expect("log matches the event shape");
    assert_eq!(event.will_id, U256::from(4));
    assert_eq!(event.creator, creator);
}

#[test]
fn foreign_logs_do_not_decode_as_will_created() {
    let raw = RawLog {
        topics: vec![H256::repeat_byte(0x99), H256::from_low_u64_be(4)],
        data: Vec::new(),
    };
    assert!(WillCreated::decode_log(&raw).is_err());
}
