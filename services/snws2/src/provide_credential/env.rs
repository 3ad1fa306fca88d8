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

use crate::{constants::*, Credential};
use async_trait::async_trait;
use snsign_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads SolarNetwork tokens from environment variables.
///
/// This provider looks for the following environment variables:
/// - `SOLARNETWORK_TOKEN_ID`: The security token id
/// - `SOLARNETWORK_TOKEN_SECRET`: The security token secret
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        match (
            envs.get(SOLARNETWORK_TOKEN_ID),
            envs.get(SOLARNETWORK_TOKEN_SECRET),
        ) {
            (Some(id), Some(secret)) => Ok(Some(Credential::new(id, secret))),
            _ => Ok(None),
        }
    }
}
