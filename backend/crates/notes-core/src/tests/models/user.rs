use crate::{Provider, User};

use googletest::prelude::*;

#[test]
fn given_local_user_when_created_then_email_is_normalized_and_invariants_hold() {
    let user = User::new_local("Ann".into(), "  Ann@X.com ", "hash".into());

    assert_that!(user.email, eq("ann@x.com"));
    assert_that!(user.provider, eq(Provider::Local));
    assert_that!(user.validate(), ok(anything()));
    assert_that!(user.is_linked(), eq(false));
}

#[test]
fn given_local_user_when_linked_then_keeps_password_and_becomes_federated() {
    let mut user = User::new_local("Ann".into(), "ann@x.com", "hash".into());

    user.link_federated("sub-1".into(), Some("https://img/ann.png".into()));

    assert_that!(user.provider, eq(Provider::Federated));
    assert_that!(user.federated_subject, some(eq("sub-1")));
    assert_that!(user.password_hash, some(eq("hash")));
    assert_that!(user.picture, some(eq("https://img/ann.png")));
    assert_that!(user.validate(), ok(anything()));
}

#[test]
fn given_local_provider_without_password_when_validated_then_error() {
    let mut user = User::new_local("Ann".into(), "ann@x.com", "hash".into());
    user.password_hash = None;

    assert_that!(user.validate(), err(anything()));
}

#[test]
fn given_federated_provider_without_subject_when_validated_then_error() {
    let mut user = User::new_federated("Bob".into(), "bob@x.com", "sub-2".into(), None);
    user.federated_subject = None;

    assert_that!(user.validate(), err(anything()));
}

#[test]
fn given_email_when_deriving_default_name_then_local_part_is_used() {
    assert_that!(User::default_name_for("carol@example.com"), eq("carol"));
    assert_that!(User::default_name_for("no-at-sign"), eq("no-at-sign"));
}
