use std::sync::Arc;

use digital_will_client::constants::will_contract_address;
use digital_will_client::{Asset, Session, SubmitError, WillClient, WillDraft};
use ethers::providers::{MockProvider, Provider};
use ethers::types::{Address, U256};

fn mocked_client() -> (WillClient<Provider<MockProvider>>, MockProvider) {
    let (provider, mock) = Provider::mocked();
    let session = Session {
        address: Address::repeat_byte(0xAA),
        chain_id: 31337,
    };
    let client = WillClient::bound(will_contract_address(), Arc::new(provider), session);
    (client, mock)
}

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
fn second_submission_while_pending_is_rejected() {
    let (client, _mock) = mocked_client();

    let guard = client
        .begin_submission()
        .expect("first submission takes the flag");
    assert!(client.submission_in_flight());
    assert!(matches!(
        client.begin_submission(),
        Err(SubmitError::SubmissionPending)
    ));

    drop(guard);
    assert!(!client.submission_in_flight());
    client
        .begin_submission()
        .expect("flag clears once the prior submission resolves");
}

#[tokio::test]
async fn failed_submission_releases_the_guard_and_session() {
    let (client, _mock) = mocked_client();

    // No responses queued: the node refuses the send.
    let err = client
        .create_will(&sample_draft())
        .await
        .expect_err("mock provider cannot accept a transaction");
    assert!(matches!(err, SubmitError::Rejected(_)));

    // The failure changes nothing about the connection.
    assert!(!client.submission_in_flight());
    assert_eq!(client.session().address, Address::repeat_byte(0xAA));
    assert_eq!(client.contract_address(), will_contract_address());

    // The same handle instance accepts the next submission attempt.
    client
        .begin_submission()
        .expect("handle is reusable after a failure");
}
