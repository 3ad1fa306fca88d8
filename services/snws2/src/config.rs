use std::fmt::{Debug, Formatter};

use snsign_core::{utils::Redact, Context};

use crate::constants::*;

/// Config carries the token configuration for SolarNetwork requests.
#[derive(Clone, Default)]
pub struct Config {
    /// `token_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SOLARNETWORK_TOKEN_ID`]
    pub token_id: Option<String>,
    /// `token_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SOLARNETWORK_TOKEN_SECRET`]
    pub token_secret: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set token_id
    pub fn with_token_id(mut self, token_id: impl Into<String>) -> Self {
        self.token_id = Some(token_id.into());
        self
    }

    /// Set token_secret
    pub fn with_token_secret(mut self, token_secret: impl Into<String>) -> Self {
        self.token_secret = Some(token_secret.into());
        self
    }

    /// Load unset values from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(SOLARNETWORK_TOKEN_ID) {
            self.token_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SOLARNETWORK_TOKEN_SECRET) {
            self.token_secret.get_or_insert(v);
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token_id", &self.token_id)
            .field("token_secret", &Redact::from(&self.token_secret))
            .finish()
    }
}
