use crate::{Config, Credential};
use async_trait::async_trait;
use snsign_core::{Context, ProvideCredential, Result};
use std::sync::Arc;

/// ConfigCredentialProvider provides the token set on a [`Config`].
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new `ConfigCredentialProvider` instance.
    pub fn new(cfg: Arc<Config>) -> Self {
        Self { config: cfg }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        let (Some(id), Some(secret)) = (&self.config.token_id, &self.config.token_secret) else {
            return Ok(None);
        };

        Ok(Some(Credential::new(id, secret)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_config_credential_provider() -> anyhow::Result<()> {
        let config = Config::new()
            .with_token_id("test-token-id")
            .with_token_secret("test-token-secret");
        let provider = ConfigCredentialProvider::new(Arc::new(config));

        let cred = provider
            .provide_credential(&Context::new())
            .await?
            .expect("credential must be provided");
        assert_eq!(cred.token_id, "test-token-id");

        let provider =
            ConfigCredentialProvider::new(Arc::new(Config::new().with_token_id("test-token-id")));
        assert!(provider.provide_credential(&Context::new()).await?.is_none());

        Ok(())
    }
}
