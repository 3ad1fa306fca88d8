use crate::Credential;
use async_trait::async_trait;
use snsign_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider always provides the same token.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    token_id: String,
    token_secret: String,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with token id and secret.
    pub fn new(token_id: &str, token_secret: &str) -> Self {
        Self {
            token_id: token_id.to_string(),
            token_secret: token_secret.to_string(),
        }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(Credential::new(&self.token_id, &self.token_secret)))
    }
}
