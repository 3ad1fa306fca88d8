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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Headers used in SNWS2 signing.
pub const CONTENT_MD5: &str = "Content-MD5";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const DATE: &str = "Date";
pub const DIGEST: &str = "Digest";
pub const HOST: &str = "Host";
pub const X_SN_DATE: &str = "X-SN-Date";

/// The SolarNetwork V2 authorization scheme.
pub const SNWS2_AUTH_SCHEME: &str = "SNWS2";
/// Algorithm line of the string to sign.
pub const SNWS2_ALGORITHM: &str = "SNWS2-HMAC-SHA256";
/// Message of the second signing key derivation step.
pub const SNWS2_REQUEST: &str = "snws2_request";

/// The hex-encoded SHA256 digest of empty content.
pub const EMPTY_STRING_SHA256_HEX: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Number of days a derived signing key is accepted for.
pub const SIGNING_KEY_VALIDITY_DAYS: i64 = 7;

/// `Digest` header value prefix for SHA-256 content digests.
pub const DIGEST_SHA256_PREFIX: &str = "sha-256=";

// Env values used by SolarNetwork clients.
pub const SOLARNETWORK_TOKEN_ID: &str = "SOLARNETWORK_TOKEN_ID";
pub const SOLARNETWORK_TOKEN_SECRET: &str = "SOLARNETWORK_TOKEN_SECRET";
pub const SOLARNETWORK_PROTOCOL: &str = "SOLARNETWORK_PROTOCOL";
pub const SOLARNETWORK_HOST: &str = "SOLARNETWORK_HOST";
pub const SOLARNETWORK_PORT: &str = "SOLARNETWORK_PORT";

/// AsciiSet for SNWS2 canonical query components.
///
/// Everything `encodeURIComponent` escapes, plus `!'()*`: every byte except
/// 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_' and '~' is escaped.
pub static SNWS2_URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
