use super::{authorization, init_builder, test_date, TEST_TOKEN_SECRET};
use http::Method;
use pretty_assertions::assert_eq;
use snsign_core::time::parse_http_date;
use snsign_snws2::constants::{DIGEST, EMPTY_STRING_SHA256_HEX, X_SN_DATE};
use snsign_snws2::{AuthorizationBuilder, SigningKey};
use test_case::test_case;

fn simple_get(_: &mut AuthorizationBuilder) {}

fn x_sn_date_header(b: &mut AuthorizationBuilder) {
    let date = b.request_date_header_value();
    b.header(X_SN_DATE, date);
}

fn x_sn_date_flag(b: &mut AuthorizationBuilder) {
    b.sn_date(true);
}

fn query(b: &mut AuthorizationBuilder) {
    b.path("/api/query")
        .extend_query_params([("foo", "bar"), ("bim", "bam")]);
}

fn post_json(b: &mut AuthorizationBuilder) {
    b.method(Method::POST)
        .content_type("application/json; charset=UTF-8")
        .header(DIGEST, "sha-256=k6I5cakU5erL8KjSUVTNownDwccvu5kU1Hxg88toFYg=")
        .content_sha256_hex("93a23971a914e5eacbf0a8d25154cda309c3c1c72fbb9914d47c60f3cb681588")
        .expect("digest must be valid hex");
}

fn special_chars(b: &mut AuthorizationBuilder) {
    b.host("localhost:8080")
        .path("/api/query")
        .extend_query_params([("a b", vec!["!'()*"]), ("foo", vec!["bar", "baz"])]);
}

fn custom_header(b: &mut AuthorizationBuilder) {
    b.header("X-SN-Custom", " val ")
        .signed_http_headers(["X-SN-Custom"]);
}

fn from_url(b: &mut AuthorizationBuilder) {
    b.url("https://example.com:443/path?foo=bar&bim=bam")
        .expect("url must be valid");
}

#[test_case(simple_get, "date;host", "4739139d3d370f147b6585795c309b1c6d7d7f59943081f7dd943f689cfa59a3"; "simple get")]
#[test_case(x_sn_date_header, "host;x-sn-date", "c14fe9f67560fb9a37d2aa7c40b40c260a5936f999877e2469b8ddb1da7c0eb9"; "x-sn-date header")]
#[test_case(x_sn_date_flag, "host;x-sn-date", "c14fe9f67560fb9a37d2aa7c40b40c260a5936f999877e2469b8ddb1da7c0eb9"; "x-sn-date flag")]
#[test_case(query, "date;host", "c597ed8061d9d12e12ead3d8d6fc03b28a877e8639548f31556b4760be09a4b8"; "query parameters")]
#[test_case(post_json, "content-type;date;digest;host", "5e364fc1e7f574bc585a794e9ec057326d662bd37650eef34fcd64c43a5a620f"; "post json")]
#[test_case(special_chars, "date;host", "8c82aad45f5b9f119416dd03add38af25be15013b2199afc33e97c9ca59c025e"; "special characters")]
#[test_case(custom_header, "date;host;x-sn-custom", "67eaacef2025b68d6a37a3402a29f17c6bd67375c16ed6d5140b0b618fd209a5"; "custom signed header")]
#[test_case(from_url, "date;host", "154a0ad5a0ca92dffc5ca9646ca21f74220ecbb6dd05178fe0c908bac085a437"; "from url")]
fn test_signature(setup: fn(&mut AuthorizationBuilder), signed_headers: &str, signature: &str) {
    let mut builder = init_builder();
    setup(&mut builder);

    assert_eq!(
        builder.build(TEST_TOKEN_SECRET),
        authorization(signed_headers, signature)
    );

    builder.save_signing_key(TEST_TOKEN_SECRET);
    assert_eq!(
        builder.build_with_saved_key().expect("signing key must be saved"),
        authorization(signed_headers, signature)
    );
}

#[test]
fn test_canonical_request_for_query() {
    let mut builder = init_builder();
    query(&mut builder);

    assert_eq!(
        builder.build_canonical_request_data(),
        format!(
            "GET\n/api/query\nbim=bam&foo=bar\ndate:Tue, 25 Apr 2017 14:30:00 GMT\nhost:localhost\ndate;host\n{EMPTY_STRING_SHA256_HEX}"
        )
    );
}

#[test]
fn test_signing_key_reuse_across_days() {
    let mut builder = init_builder();
    builder.save_signing_key(TEST_TOKEN_SECRET);
    let saved: SigningKey = builder
        .saved_signing_key()
        .cloned()
        .expect("signing key must be saved");
    assert_eq!(saved.date(), test_date());

    builder.reset().host("localhost").path("/api/test");
    builder.date(parse_http_date("Fri, 28 Apr 2017 14:30:00 GMT").expect("date must be valid"));

    assert_eq!(
        builder.build_with_key(&saved),
        authorization(
            "date;host",
            "0febb90695a6ee82e5a3712c67b391c4d6b73d0fc95d28eb3c34a85cb6bfac9d"
        )
    );
    assert_eq!(
        builder.build(TEST_TOKEN_SECRET),
        authorization(
            "date;host",
            "7b6e1226cef265ee76e9e1ec7214ab096ee22f95bbbca5d852f7bea306205620"
        )
    );
}

#[test]
fn test_reused_builder_matches_fresh_builder() {
    let mut builder = init_builder();
    post_json(&mut builder);
    let _ = builder.build(TEST_TOKEN_SECRET);

    builder.reset().host("localhost").path("/api/test").date(test_date());
    assert_eq!(
        builder.build(TEST_TOKEN_SECRET),
        init_builder().build(TEST_TOKEN_SECRET)
    );
}
