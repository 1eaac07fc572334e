use super::test_connection_string;
use crate::{ConnectionString, SasTokenProvider};

use std::time::Duration;

use googletest::prelude::*;

fn provider() -> SasTokenProvider {
    let connection = ConnectionString::parse(&test_connection_string()).unwrap();
    SasTokenProvider::new(&connection, Duration::from_secs(3600)).unwrap()
}

#[test]
fn given_fixed_expiry_when_token_generated_then_matches_known_signature() {
    // Given
    let provider = provider();

    // When
    let token = provider.token_expiring_at(1_700_000_000);

    // Then
    assert_that!(
        token,
        eq("SharedAccessSignature sr=myhub.azure-devices.net\
            &sig=sJAIZTF5oG40VHrie96heZ865%2BnR4QavBvHnzxZm8rk%3D\
            &se=1700000000&skn=iothubowner")
    );
}

#[test]
fn given_ttl_when_token_generated_then_expiry_in_future() {
    let provider = provider();
    let now = chrono::Utc::now().timestamp();

    let token = provider.token();

    let expiry: i64 = token
        .split("&se=")
        .nth(1)
        .and_then(|rest| rest.split('&').next())
        .and_then(|se| se.parse().ok())
        .unwrap();
    assert!(expiry >= now + 3600 && expiry <= now + 3602);
}

#[test]
fn given_connection_without_policy_when_token_generated_then_no_skn() {
    let connection = ConnectionString::parse(
        "HostName=hub.example.net;SharedAccessKey=MDEyMzQ1Njc4OWFiY2RlZg==",
    )
    .unwrap();
    let provider = SasTokenProvider::new(&connection, Duration::from_secs(60)).unwrap();

    let token = provider.token_expiring_at(42);

    assert_that!(token, not(contains_substring("skn=")));
    assert_that!(token, ends_with("&se=42"));
}
