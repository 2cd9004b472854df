use crate::{AuthError, TokenValidator};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, err, ok, pat};

const ADMIN_TOKEN: &str = "12345-secret";

#[test]
fn given_matching_token_when_authorized_then_grant_issued() {
    let validator = TokenValidator::new(ADMIN_TOKEN);

    let result = validator.authorize(Some(ADMIN_TOKEN));

    assert_that!(result, ok(anything()));
}

#[test]
fn given_no_token_when_authorized_then_missing_token_error() {
    let validator = TokenValidator::new(ADMIN_TOKEN);

    let result = validator.authorize(None);

    assert_that!(result, err(pat!(AuthError::MissingToken { .. })));
}

#[test]
fn given_empty_token_when_authorized_then_missing_token_error() {
    let validator = TokenValidator::new(ADMIN_TOKEN);

    let result = validator.authorize(Some(""));

    assert_that!(result, err(pat!(AuthError::MissingToken { .. })));
}

#[test]
fn given_wrong_token_when_authorized_then_invalid_token_error() {
    let validator = TokenValidator::new(ADMIN_TOKEN);

    let result = validator.authorize(Some("12345-secreT"));

    assert_that!(result, err(pat!(AuthError::InvalidToken { .. })));
}

#[test]
fn given_token_prefix_when_authorized_then_invalid_token_error() {
    let validator = TokenValidator::new(ADMIN_TOKEN);

    let result = validator.authorize(Some("12345"));

    assert_that!(result, err(pat!(AuthError::InvalidToken { .. })));
}

#[test]
fn given_empty_configured_token_when_authorized_then_nothing_passes() {
    let validator = TokenValidator::new("");

    let result = validator.authorize(Some("anything"));

    assert_that!(result, err(pat!(AuthError::InvalidToken { .. })));
}

#[test]
fn given_validator_when_debug_formatted_then_token_hidden() {
    let validator = TokenValidator::new(ADMIN_TOKEN);

    let rendered = format!("{validator:?}");

    assert!(!rendered.contains(ADMIN_TOKEN));
    assert_that!(rendered, contains_substring("<redacted>"));
}

#[test]
fn given_errors_when_coded_then_codes_are_stable() {
    let validator = TokenValidator::new(ADMIN_TOKEN);

    let missing = validator.authorize(None).unwrap_err();
    let invalid = validator.authorize(Some("nope")).unwrap_err();

    assert_eq!(missing.error_code(), "MISSING_TOKEN");
    assert_eq!(invalid.error_code(), "INVALID_TOKEN");
}
