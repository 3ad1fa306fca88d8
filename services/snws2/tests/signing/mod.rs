mod requests;
mod vectors;

use snsign_core::time::{parse_http_date, DateTime};
use snsign_snws2::{AuthorizationBuilder, Credential};

pub const TEST_TOKEN_ID: &str = "test-token-id";
pub const TEST_TOKEN_SECRET: &str = "test-token-secret";
pub const TEST_DATE: &str = "Tue, 25 Apr 2017 14:30:00 GMT";

pub fn test_date() -> DateTime {
    parse_http_date(TEST_DATE).expect("test date must be valid")
}

pub fn test_credential() -> Credential {
    Credential::new(TEST_TOKEN_ID, TEST_TOKEN_SECRET)
}

/// A builder for `GET http://localhost/api/test` at [`TEST_DATE`].
pub fn init_builder() -> AuthorizationBuilder {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut builder = AuthorizationBuilder::new(TEST_TOKEN_ID);
    builder.date(test_date()).host("localhost").path("/api/test");
    builder
}

pub fn authorization(signed_headers: &str, signature: &str) -> String {
    format!("SNWS2 Credential={TEST_TOKEN_ID},SignedHeaders={signed_headers},Signature={signature}")
}
