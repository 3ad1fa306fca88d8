// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};

use snsign_core::{utils::Redact, SigningCredential};

/// Credential for SolarNetwork security tokens.
#[derive(Clone)]
pub struct Credential {
    /// Security token id, sent in the clear as `Credential=`.
    pub token_id: String,
    /// Security token secret, only used to derive signing keys.
    pub token_secret: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(token_id: impl Into<String>, token_secret: impl Into<String>) -> Self {
        Self {
            token_id: token_id.into(),
            token_secret: token_secret.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token_id", &self.token_id)
            .field("token_secret", &Redact::from(&self.token_secret))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.token_id.is_empty() && !self.token_secret.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_debug_redacts_secret() {
        let cred = Credential::new("test-token-id", "test-token-secret");
        assert_eq!(
            format!("{cred:?}"),
            r#"Credential { token_id: "test-token-id", token_secret: tes***ret }"#
        );
    }

    #[test]
    fn test_credential_is_valid() {
        assert!(Credential::new("a", "b").is_valid());
        assert!(!Credential::new("", "b").is_valid());
        assert!(!Credential::new("a", "").is_valid());
    }
}
