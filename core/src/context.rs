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

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Context carries the environment that configuration and credential
/// providers read from.
///
/// A new context reads nothing: call [`Context::with_env`] with [`OsEnv`] to
/// read the process environment, or with [`StaticEnv`] in tests.
///
/// ## Example
///
/// ```
/// use snsign_core::{Context, OsEnv};
///
/// let ctx = Context::new().with_env(OsEnv);
/// ```
#[derive(Clone)]
pub struct Context {
    env: Arc<dyn Env>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").field("env", &self.env).finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context with a no-op environment.
    pub fn new() -> Self {
        Self {
            env: Arc::new(NoopEnv),
        }
    }

    /// Replace the environment implementation.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Look up a single variable, `None` when unset or not valid UTF-8.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }

    /// Snapshot all variables.
    #[inline]
    pub fn env_vars(&self) -> HashMap<String, String> {
        self.env.vars()
    }
}

/// Source of environment variables.
pub trait Env: Debug + Send + Sync + 'static {
    /// Look up a single variable, `None` when unset or not valid UTF-8.
    fn var(&self, key: &str) -> Option<String>;

    /// Snapshot all variables.
    fn vars(&self) -> HashMap<String, String>;
}

/// The environment of the current process.
#[derive(Debug, Copy, Clone)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key)?.into_string().ok()
    }

    fn vars(&self) -> HashMap<String, String> {
        std::env::vars().collect()
    }
}

/// A fixed set of variables, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// Variables by name.
    pub envs: HashMap<String, String>,
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }

    fn vars(&self) -> HashMap<String, String> {
        self.envs.clone()
    }
}

/// An empty environment, the default of [`Context::new`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnv;

impl Env for NoopEnv {
    fn var(&self, _: &str) -> Option<String> {
        None
    }

    fn vars(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_has_no_env() {
        let ctx = Context::default();
        assert_eq!(ctx.env_var("PATH"), None);
        assert!(ctx.env_vars().is_empty());
    }

    #[test]
    fn test_static_env() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from_iter([("SOLARNETWORK_HOST".to_string(), "localhost".to_string())]),
        });
        assert_eq!(ctx.env_var("SOLARNETWORK_HOST").as_deref(), Some("localhost"));
        assert_eq!(ctx.env_var("SOLARNETWORK_PORT"), None);
        assert_eq!(ctx.env_vars().len(), 1);
    }
}
