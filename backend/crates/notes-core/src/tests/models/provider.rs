use crate::{CoreError, Provider};

use std::str::FromStr;

use googletest::prelude::*;

#[test]
fn given_database_strings_when_parsed_then_round_trip_to_variants() {
    assert_that!(Provider::from_str("local").unwrap(), eq(Provider::Local));
    assert_that!(
        Provider::from_str("federated").unwrap(),
        eq(Provider::Federated)
    );
    assert_that!(Provider::Federated.as_str(), eq("federated"));
}

#[test]
fn given_unknown_provider_when_parsed_then_invalid_provider_error() {
    let result = Provider::from_str("auth0");

    assert!(matches!(result, Err(CoreError::InvalidProvider { ref value, .. }) if value == "auth0"));
}
