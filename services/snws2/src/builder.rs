//! SNWS2 `Authorization` header builder.
use std::fmt::{Debug, Formatter};

use http::{Method, Uri};
use log::{debug, warn};
use snsign_core::hash::{hex_decode, hex_hmac_sha256, hex_sha256, hmac_sha256};
use snsign_core::time::{format_date, format_http_date, format_iso8601, now, DateTime};
use snsign_core::{Error, IntoValues, MultiMap, Result};

use crate::constants::*;
use crate::encode::{parse_query, uri_encode};
use crate::environment::{host_with_port, Environment};

/// A date-scoped key derived from a token secret.
///
/// The key is bound to the day of the request date it was derived for and is
/// accepted for [`SIGNING_KEY_VALIDITY_DAYS`] days after that.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey {
    key: Vec<u8>,
    date: DateTime,
}

impl SigningKey {
    /// Derive the signing key for `secret` on the day of `date`.
    ///
    /// ```text
    /// HMAC-SHA256(HMAC-SHA256("SNWS2" + secret, "20170425"), "snws2_request")
    /// ```
    pub fn derive(secret: &str, date: DateTime) -> Self {
        let secret = format!("{SNWS2_AUTH_SCHEME}{secret}");
        let sign_date = hmac_sha256(secret.as_bytes(), format_date(date).as_bytes());
        let key = hmac_sha256(&sign_date, SNWS2_REQUEST.as_bytes());

        Self { key, date }
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }

    /// The request date this key was derived for.
    pub fn date(&self) -> DateTime {
        self.date
    }

    /// Check if a request signed at `date` can still be verified with this key.
    pub fn is_valid_for(&self, date: DateTime) -> bool {
        let days = date
            .date_naive()
            .signed_duration_since(self.date.date_naive())
            .num_days();
        (0..=SIGNING_KEY_VALIDITY_DAYS).contains(&days)
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("date", &format_date(self.date))
            .field("key", &"***")
            .finish()
    }
}

/// Builder for SNWS2 `Authorization` header values.
///
/// It can calculate a one-off header value:
///
/// ```
/// use snsign_snws2::AuthorizationBuilder;
///
/// let auth = AuthorizationBuilder::new("my-token")
///     .path("/solarquery/api/v1/pub/range/interval")
///     .build("my-token-secret");
/// assert!(auth.starts_with("SNWS2 Credential=my-token,SignedHeaders=date;host,Signature="));
/// ```
///
/// Or be reset and reused for a token, optionally with a signing key derived
/// once and reused for up to [`SIGNING_KEY_VALIDITY_DAYS`] days:
///
/// ```
/// use snsign_snws2::AuthorizationBuilder;
///
/// let mut builder = AuthorizationBuilder::new("my-token");
/// builder.save_signing_key("my-token-secret");
///
/// let auth = builder
///     .reset()
///     .path("/solarquery/api/v1/sec/datum/list")
///     .build_with_saved_key()?;
/// # Ok::<(), snsign_core::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct AuthorizationBuilder {
    token_id: String,
    environment: Environment,

    method: Method,
    path: String,
    date: DateTime,
    headers: MultiMap,
    params: MultiMap,
    signed_header_names: Vec<String>,
    content_digest: Option<Vec<u8>>,

    signing_key: Option<SigningKey>,
}

impl AuthorizationBuilder {
    /// Create a builder for `token_id` against the default environment.
    pub fn new(token_id: impl Into<String>) -> Self {
        Self::with_environment(token_id, Environment::default())
    }

    /// Create a builder for `token_id` whose default host comes from `environment`.
    pub fn with_environment(token_id: impl Into<String>, environment: Environment) -> Self {
        let mut builder = Self {
            token_id: token_id.into(),
            environment,

            method: Method::GET,
            path: "/".to_string(),
            date: now(),
            headers: MultiMap::new(),
            params: MultiMap::new(),
            signed_header_names: Vec::new(),
            content_digest: None,

            signing_key: None,
        };
        builder.reset();
        builder
    }

    /// Reset to default property values.
    ///
    /// A saved signing key is kept.
    pub fn reset(&mut self) -> &mut Self {
        self.content_digest = None;
        self.headers = MultiMap::new();
        self.params = MultiMap::new();
        self.signed_header_names.clear();

        let host = self.environment.authority();
        self.method(Method::GET).host(&host).path("/").date(now())
    }

    /// The token id this builder signs for.
    pub fn token_id(&self) -> &str {
        &self.token_id
    }

    /// Set the HTTP method.
    pub fn method(&mut self, method: Method) -> &mut Self {
        self.method = method;
        self
    }

    /// The configured HTTP method.
    pub fn http_method(&self) -> &Method {
        &self.method
    }

    /// Set the `Host` header value.
    pub fn host(&mut self, host: &str) -> &mut Self {
        self.headers.put(HOST, host);
        self
    }

    /// Set the request path.
    pub fn path(&mut self, path: impl Into<String>) -> &mut Self {
        self.path = path.into();
        self
    }

    /// The configured request path.
    pub fn request_path(&self) -> &str {
        &self.path
    }

    /// Set host, path and query parameters from an absolute URL.
    ///
    /// The port is kept in the host only when it is not the default for the
    /// scheme. Parsed query parameters are merged into the existing ones.
    pub fn url(&mut self, url: &str) -> Result<&mut Self> {
        let uri: Uri = url.parse().map_err(|e| {
            Error::invalid_argument(format!("invalid url: {url}")).with_source(e)
        })?;
        if uri.scheme().is_none() {
            return Err(Error::invalid_argument(format!("url without scheme: {url}")));
        }
        let host = request_host(&uri)
            .ok_or_else(|| Error::invalid_argument(format!("url without host: {url}")))?;

        if let Some(query) = uri.query() {
            let params = parse_query(query);
            self.extend_query_params(params.iter().map(|(k, v)| (k, v.to_vec())));
        }

        let path = match uri.path() {
            "" => "/",
            path => path,
        };
        Ok(self.host(&host).path(path))
    }

    /// Set the `Content-Type` header value.
    pub fn content_type(&mut self, content_type: &str) -> &mut Self {
        self.headers.put(CONTENT_TYPE, content_type);
        self
    }

    /// Set the request date.
    pub fn date(&mut self, date: DateTime) -> &mut Self {
        self.date = date;
        self
    }

    /// The request date.
    pub fn request_date(&self) -> DateTime {
        self.date
    }

    /// The request date as an HTTP header value, like `Tue, 25 Apr 2017 14:30:00 GMT`.
    pub fn request_date_header_value(&self) -> String {
        format_http_date(self.date)
    }

    /// Check if the `X-SN-Date` header is used instead of `Date`.
    ///
    /// True when `X-SN-Date` is one of the signed header names or is present
    /// in the headers.
    pub fn use_sn_date(&self) -> bool {
        self.sn_date_position().is_some() || self.headers.contains_key(X_SN_DATE)
    }

    fn sn_date_position(&self) -> Option<usize> {
        self.signed_header_names
            .iter()
            .position(|name| name.eq_ignore_ascii_case(X_SN_DATE))
    }

    /// Choose between the `X-SN-Date` (`true`) and `Date` (`false`) headers.
    ///
    /// Adds or removes `X-SN-Date` from the signed header names. Any literal
    /// `X-SN-Date` header is removed either way, since the signed value always
    /// comes from the request date.
    pub fn set_use_sn_date(&mut self, enabled: bool) {
        match (enabled, self.sn_date_position()) {
            (true, None) => self.signed_header_names.push(X_SN_DATE.to_string()),
            (false, Some(idx)) => {
                self.signed_header_names.remove(idx);
            }
            _ => {}
        }

        self.headers.remove(X_SN_DATE);
    }

    /// Chaining form of [`AuthorizationBuilder::set_use_sn_date`].
    pub fn sn_date(&mut self, enabled: bool) -> &mut Self {
        self.set_use_sn_date(enabled);
        self
    }

    /// Set a header value, replacing any existing values.
    pub fn header(&mut self, name: &str, value: impl IntoValues) -> &mut Self {
        self.headers.put(name, value);
        self
    }

    /// Replace all headers.
    ///
    /// The headers must include everything the scheme signs, such as `Host`,
    /// and any extra names configured via
    /// [`AuthorizationBuilder::signed_http_headers`].
    pub fn headers(&mut self, headers: MultiMap) -> &mut Self {
        self.headers = headers;
        self
    }

    /// The configured headers.
    pub fn http_headers(&self) -> &MultiMap {
        &self.headers
    }

    /// Replace all `GET` query or `POST` form parameters.
    pub fn query_params(&mut self, params: MultiMap) -> &mut Self {
        self.params = params;
        self
    }

    /// Merge parameters; each key present in `params` replaces that key's values.
    pub fn extend_query_params<K, V>(
        &mut self,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> &mut Self
    where
        K: AsRef<str>,
        V: IntoValues,
    {
        self.params.put_all(params);
        self
    }

    /// The configured query parameters.
    pub fn parameters(&self) -> &MultiMap {
        &self.params
    }

    /// Set additional header names to sign.
    pub fn signed_http_headers<S: Into<String>>(
        &mut self,
        names: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        self.signed_header_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// The additional header names to sign.
    pub fn signed_header_names(&self) -> &[String] {
        &self.signed_header_names
    }

    /// Set the SHA256 digest of the request body.
    pub fn content_sha256(&mut self, digest: impl Into<Vec<u8>>) -> &mut Self {
        self.content_digest = Some(digest.into());
        self
    }

    /// Set the SHA256 digest of the request body from its hex encoding.
    pub fn content_sha256_hex(&mut self, digest: &str) -> Result<&mut Self> {
        let digest = hex_decode(digest)?;
        Ok(self.content_sha256(digest))
    }

    /// Compute the canonical query string: keys sorted, values in insertion
    /// order, every key and value URI encoded, joined by `&`.
    pub fn canonical_query_parameters(&self) -> String {
        let mut keys = self.params.keys();
        keys.sort_unstable();

        let mut s = String::new();
        for key in keys {
            let encoded_key = uri_encode(key);
            for value in self.params.value(key).unwrap_or_default() {
                if !s.is_empty() {
                    s.push('&');
                }
                s.push_str(&encoded_key);
                s.push('=');
                s.push_str(&uri_encode(value));
            }
        }

        s
    }

    /// Compute the sorted, lower-cased header names to sign.
    ///
    /// Always `host` plus exactly one of `date` / `x-sn-date`, then
    /// `content-md5`, `content-type` and `digest` when present, then the
    /// additional signed header names.
    pub fn canonical_header_names(&self) -> Vec<String> {
        let use_sn_date = self.use_sn_date();
        let date_header = if use_sn_date { X_SN_DATE } else { DATE };

        let mut names = vec![HOST.to_lowercase(), date_header.to_lowercase()];
        for name in [CONTENT_MD5, CONTENT_TYPE, DIGEST] {
            if self.headers.contains_key(name) {
                names.push(name.to_lowercase());
            }
        }
        for name in &self.signed_header_names {
            let name = name.to_lowercase();
            // Never sign both date headers.
            if use_sn_date && name.eq_ignore_ascii_case(DATE) {
                continue;
            }
            names.push(name);
        }

        names.sort_unstable();
        names.dedup();
        names
    }

    /// Compute the canonical headers: one `name:value\n` line per name.
    ///
    /// `date` and `x-sn-date` always carry the request date, whatever value
    /// the headers hold.
    pub fn canonical_headers(&self, sorted_lowercase_names: &[String]) -> String {
        let date = self.request_date_header_value();

        let mut s = String::with_capacity(128);
        for name in sorted_lowercase_names {
            let value = if name == "date" || name == "x-sn-date" {
                date.as_str()
            } else {
                self.headers
                    .first_value(name)
                    .map(str::trim)
                    .unwrap_or_default()
            };

            s.push_str(name);
            s.push(':');
            s.push_str(value);
            s.push('\n');
        }

        s
    }

    /// The hex encoded body digest, or [`EMPTY_STRING_SHA256_HEX`] without one.
    pub fn canonical_content_sha256(&self) -> String {
        match &self.content_digest {
            Some(digest) => hex::encode(digest),
            None => EMPTY_STRING_SHA256_HEX.to_string(),
        }
    }

    /// Compute the canonical request data that is hashed into the string to sign.
    pub fn build_canonical_request_data(&self) -> String {
        self.canonical_request_data(&self.canonical_header_names())
    }

    fn canonical_request_data(&self, sorted_lowercase_names: &[String]) -> String {
        // 256 is specially chosen to avoid reallocation for most requests.
        let mut s = String::with_capacity(256);

        // Method
        s.push_str(self.method.as_str());
        s.push('\n');
        // Path
        s.push_str(&self.path);
        s.push('\n');
        // Query
        s.push_str(&self.canonical_query_parameters());
        s.push('\n');
        // Headers, already newline terminated
        s.push_str(&self.canonical_headers(sorted_lowercase_names));
        // Signed header names
        s.push_str(&sorted_lowercase_names.join(";"));
        s.push('\n');
        // Content digest
        s.push_str(&self.canonical_content_sha256());

        s
    }

    /// Construct string to sign
    ///
    /// ## Format
    ///
    /// ```text
    /// SNWS2-HMAC-SHA256\n
    /// 20170425T143000Z\n
    /// Hex(SHA256(canonical request))
    /// ```
    fn string_to_sign(&self, canonical_request: &str) -> String {
        format!(
            "{SNWS2_ALGORITHM}\n{}\n{}",
            format_iso8601(self.date),
            hex_sha256(canonical_request.as_bytes())
        )
    }

    /// Derive the signing key for `secret` on the configured request date.
    pub fn signing_key(&self, secret: &str) -> SigningKey {
        SigningKey::derive(secret, self.date)
    }

    /// Derive and keep a signing key for [`AuthorizationBuilder::build_with_saved_key`].
    ///
    /// The key is derived for the currently configured request date.
    pub fn save_signing_key(&mut self, secret: &str) -> &mut Self {
        self.signing_key = Some(self.signing_key(secret));
        self
    }

    /// The signing key saved by [`AuthorizationBuilder::save_signing_key`].
    pub fn saved_signing_key(&self) -> Option<&SigningKey> {
        self.signing_key.as_ref()
    }

    /// Compute the `Authorization` header value with a freshly derived key.
    pub fn build(&self, secret: &str) -> String {
        self.build_with_key(&self.signing_key(secret))
    }

    /// Compute the `Authorization` header value with the saved signing key.
    pub fn build_with_saved_key(&self) -> Result<String> {
        let key = self
            .signing_key
            .as_ref()
            .ok_or_else(|| Error::invalid_state("no signing key saved"))?;
        Ok(self.build_with_key(key))
    }

    /// Compute the `Authorization` header value with `key`.
    pub fn build_with_key(&self, key: &SigningKey) -> String {
        if !key.is_valid_for(self.date) {
            warn!(
                "signing key derived for {} used for request date {}, server verification will fail",
                format_date(key.date()),
                format_date(self.date)
            );
        }

        let names = self.canonical_header_names();
        let canonical_request = self.canonical_request_data(&names);
        debug!("calculated canonical request: {canonical_request}");

        let string_to_sign = self.string_to_sign(&canonical_request);
        debug!("calculated string to sign: {string_to_sign}");

        let signature = hex_hmac_sha256(key.as_bytes(), string_to_sign.as_bytes());

        format!(
            "{SNWS2_AUTH_SCHEME} Credential={},SignedHeaders={},Signature={signature}",
            self.token_id,
            names.join(";")
        )
    }
}

/// The `Host` header value for a request URI, if it has a host.
pub(crate) fn request_host(uri: &Uri) -> Option<String> {
    uri.host()
        .map(|host| host_with_port(host, uri.scheme_str(), uri.port_u16()))
}
