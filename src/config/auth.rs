//! Identity configuration.

use serde::Deserialize;

/// Bearer tokens accepted by the API.
///
/// Token issuance happens elsewhere; this service only maps a presented
/// token to the user id it was issued for. Stored as a list rather than a
/// map because config keys are case-folded and tokens are not.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub tokens: Vec<TokenEntry>,
}

/// One accepted token.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenEntry {
    pub token: String,
    pub user_id: String,
}
