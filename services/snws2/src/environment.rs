use std::fmt::{Debug, Formatter};

use snsign_core::{Context, Error, Result};

use crate::constants::*;

/// Environment describes the SolarNetwork deployment requests are made against.
///
/// Defaults to `https://data.solarnetwork.net`.
#[derive(Clone, PartialEq, Eq)]
pub struct Environment {
    /// URL scheme, `https` or `http`.
    pub protocol: String,
    /// Host name, without port.
    pub host: String,
    /// Port number.
    pub port: u16,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            protocol: "https".to_string(),
            host: "data.solarnetwork.net".to_string(),
            port: 443,
        }
    }
}

impl Environment {
    /// Create the default environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the protocol, resetting the port to the protocol's default.
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self.port = default_port(&self.protocol).unwrap_or(self.port);
        self
    }

    /// Set the host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Override values from env.
    ///
    /// An unparsable [`SOLARNETWORK_PORT`] is a config error.
    pub fn from_env(mut self, ctx: &Context) -> Result<Self> {
        if let Some(v) = ctx.env_var(SOLARNETWORK_PROTOCOL) {
            self = self.with_protocol(v);
        }
        if let Some(v) = ctx.env_var(SOLARNETWORK_HOST) {
            self.host = v;
        }
        if let Some(v) = ctx.env_var(SOLARNETWORK_PORT) {
            self.port = v.parse().map_err(|e| {
                Error::config_invalid(format!("{SOLARNETWORK_PORT} is not a valid port: {v}"))
                    .with_source(e)
            })?;
        }

        Ok(self)
    }

    /// Check if TLS is in use via the `https` protocol.
    pub fn use_tls(&self) -> bool {
        self.protocol == "https"
    }

    /// The `Host` header value: the host, plus `:port` when the port is not
    /// the protocol's default.
    pub fn authority(&self) -> String {
        host_with_port(&self.host, Some(&self.protocol), Some(self.port))
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}:{}", self.protocol, self.host, self.port)
    }
}

/// Default port of a URL scheme, if known.
pub(crate) fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "https" => Some(443),
        "http" => Some(80),
        _ => None,
    }
}

/// Build a `Host` header value, omitting the port when it is the scheme's default.
pub(crate) fn host_with_port(host: &str, scheme: Option<&str>, port: Option<u16>) -> String {
    match port {
        Some(port) if scheme.and_then(default_port) != Some(port) => format!("{host}:{port}"),
        _ => host.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snsign_core::{ErrorKind, StaticEnv};
    use std::collections::HashMap;

    fn ctx(envs: &[(&str, &str)]) -> Context {
        Context::new().with_env(StaticEnv {
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
    }

    #[test]
    fn test_default_environment() {
        let env = Environment::default();
        assert!(env.use_tls());
        assert_eq!(env.authority(), "data.solarnetwork.net");
        assert_eq!(format!("{env:?}"), "https://data.solarnetwork.net:443");
    }

    #[test]
    fn test_authority_includes_non_default_port() {
        let env = Environment::new().with_host("localhost").with_port(8443);
        assert_eq!(env.authority(), "localhost:8443");

        let env = Environment::new()
            .with_protocol("http")
            .with_host("localhost");
        assert_eq!(env.port, 80);
        assert!(!env.use_tls());
        assert_eq!(env.authority(), "localhost");

        let env = env.with_port(443);
        assert_eq!(env.authority(), "localhost:443");
    }

    #[test]
    fn test_from_env() {
        let env = Environment::new()
            .from_env(&ctx(&[
                (SOLARNETWORK_PROTOCOL, "http"),
                (SOLARNETWORK_HOST, "solarnet.local"),
                (SOLARNETWORK_PORT, "8080"),
            ]))
            .expect("env must be valid");
        assert_eq!(env.protocol, "http");
        assert_eq!(env.host, "solarnet.local");
        assert_eq!(env.authority(), "solarnet.local:8080");
    }

    #[test]
    fn test_from_env_invalid_port() {
        let err = Environment::new()
            .from_env(&ctx(&[(SOLARNETWORK_PORT, "http")]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
