//! SolarNetwork SNWS2 signing implementation for snsign.
//!
//! SNWS2 authenticates SolarNetwork API requests with an HMAC-SHA256
//! signature over a canonical form of the request, keyed by a date-scoped key
//! derived from the security token secret.
//!
//! ## Quick Start
//!
//! Compute an `Authorization` header value directly:
//!
//! ```
//! use snsign_snws2::AuthorizationBuilder;
//!
//! let mut builder = AuthorizationBuilder::new("my-token");
//! builder.url("https://data.solarnetwork.net/solarquery/api/v1/sec/datum/list?nodeId=1")?;
//!
//! // Send these as the `Date` and `Authorization` headers.
//! let date = builder.request_date_header_value();
//! let authorization = builder.build("my-token-secret");
//! # Ok::<(), snsign_core::Error>(())
//! ```
//!
//! Or sign [`http`] requests with a [`Signer`](snsign_core::Signer):
//!
//! ```no_run
//! use snsign_core::{Context, OsEnv, Signer};
//! use snsign_snws2::{DefaultCredentialProvider, RequestSigner};
//!
//! # async fn example() -> snsign_core::Result<()> {
//! // Loads SOLARNETWORK_TOKEN_ID and SOLARNETWORK_TOKEN_SECRET.
//! let ctx = Context::new().with_env(OsEnv);
//! let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());
//!
//! let mut parts = http::Request::get("https://data.solarnetwork.net/solaruser/api/v1/sec/whoami")
//!     .body(())
//!     .unwrap()
//!     .into_parts()
//!     .0;
//! signer.sign(&mut parts).await?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

/// Constants used by the SNWS2 scheme.
#[allow(missing_docs)]
pub mod constants;

mod encode;
pub use encode::{parse_query, uri_encode};

mod environment;
pub use environment::Environment;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod builder;
pub use builder::{AuthorizationBuilder, SigningKey};

mod sign_request;
pub use sign_request::RequestSigner;

mod provide_credential;
pub use provide_credential::*;
