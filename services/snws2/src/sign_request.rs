use async_trait::async_trait;
use http::request::Parts;
use http::{header, HeaderName, HeaderValue};
use log::debug;
use snsign_core::hash::base64_decode;
use snsign_core::time::{now, DateTime};
use snsign_core::{Context, Error, MultiMap, Result, SignRequest};

use crate::builder::{request_host, AuthorizationBuilder};
use crate::constants::*;
use crate::encode::parse_query;
use crate::Credential;

/// RequestSigner that implements SNWS2 for [`http`] requests.
///
/// Every request header is available for signing; `Host`, the date header,
/// `Content-MD5`, `Content-Type` and `Digest` are always signed when present.
/// Extra headers are signed via [`RequestSigner::with_signed_headers`].
///
/// The body is never read. If the request carries a `Digest: sha-256=<base64>`
/// header, that digest is used as the content digest; otherwise the request is
/// signed as having an empty body.
#[derive(Debug, Default, Clone)]
pub struct RequestSigner {
    signed_headers: Vec<String>,
    use_sn_date: bool,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new request signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign these header names in addition to the default set.
    pub fn with_signed_headers<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.signed_headers = names.into_iter().map(Into::into).collect();
        self
    }

    /// Send the request date as `X-SN-Date` instead of `Date`.
    ///
    /// Useful for clients, like browsers, that can not set `Date` themselves.
    pub fn with_sn_date(mut self, enabled: bool) -> Self {
        self.use_sn_date = enabled;
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    fn authorization_builder(
        &self,
        req: &Parts,
        cred: &Credential,
    ) -> Result<AuthorizationBuilder> {
        let mut builder = AuthorizationBuilder::new(&cred.token_id);
        builder
            .method(req.method.clone())
            .date(self.time.unwrap_or_else(now));

        let mut headers = MultiMap::new();
        for (name, value) in req.headers.iter() {
            headers.add(name.as_str(), value.to_str()?);
        }
        builder.headers(headers);
        if !req.headers.contains_key(header::HOST) {
            let host = request_host(&req.uri).ok_or_else(|| {
                Error::invalid_argument(format!("request uri without host: {}", req.uri))
            })?;
            builder.host(&host);
        }

        builder.path(req.uri.path());
        if let Some(query) = req.uri.query() {
            builder.query_params(parse_query(query));
        }

        if let Some(digest) = content_digest(req)? {
            builder.content_sha256(digest);
        }

        builder.signed_http_headers(self.signed_headers.iter().cloned());
        if self.use_sn_date {
            builder.sn_date(true);
        }

        Ok(builder)
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            return Err(Error::credential_invalid(
                "no SolarNetwork token available to sign request",
            ));
        };

        let builder = self.authorization_builder(req, cred)?;
        let authorization = builder.build(&cred.token_secret);
        debug!("calculated authorization: {authorization}");

        let date_header = if builder.use_sn_date() {
            req.headers.remove(header::DATE);
            HeaderName::from_static("x-sn-date")
        } else {
            header::DATE
        };
        req.headers.insert(
            date_header,
            HeaderValue::from_str(&builder.request_date_header_value())?,
        );

        if !req.headers.contains_key(header::HOST) {
            if let Some(host) = builder.http_headers().first_value(HOST) {
                req.headers.insert(header::HOST, HeaderValue::from_str(host)?);
            }
        }

        let mut value = HeaderValue::from_str(&authorization)?;
        value.set_sensitive(true);
        req.headers.insert(header::AUTHORIZATION, value);

        Ok(())
    }
}

/// Extract the SHA-256 digest from a `Digest` header.
///
/// The header may list several `algorithm=<base64>` digests separated by
/// commas; only the `sha-256` one is used.
fn content_digest(req: &Parts) -> Result<Option<Vec<u8>>> {
    let Some(value) = req.headers.get(DIGEST) else {
        return Ok(None);
    };

    let prefix_len = DIGEST_SHA256_PREFIX.len();
    for item in value.to_str()?.split(',').map(str::trim) {
        match item.get(..prefix_len) {
            Some(prefix) if prefix.eq_ignore_ascii_case(DIGEST_SHA256_PREFIX) => {
                return Ok(Some(base64_decode(&item[prefix_len..])?));
            }
            _ => continue,
        }
    }

    Ok(None)
}
