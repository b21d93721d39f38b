//! # Declarative OAuth Authenticator Rule
//!
//! A declarative OAuth authenticator stores its token as an interpolation
//! such as `{{ config['client_refresh_token'] }}`. Test reads only work
//! when the interpolated config key has a testing value, and the schema
//! layer cannot see testing values. This module checks that rule
//! directly.
//!
//! ## Token Field
//!
//! | `refresh_token_updater` | token type | field read           |
//! |-------------------------|------------|----------------------|
//! | truthy                  | refresh    | `refresh_token`      |
//! | absent / falsy          | access     | `access_token_value` |

use cb_core::{is_truthy, TestingValues};
use serde_json::{Map, Value};

/// `type` tag of the declarative OAuth authenticator.
pub const DECLARATIVE_OAUTH_AUTHENTICATOR: &str = "DeclarativeOAuthAuthenticator";

/// Field reported, under `authenticator`, when the OAuth flow has not
/// produced a testing value for the token.
pub const OAUTH_FLOW_FIELD: &str = "declarative_oauth_flow";

/// Which token the authenticator refreshes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    /// A refresh token, exchanged for access tokens.
    Refresh,
    /// A static access token.
    Access,
}

impl TokenType {
    /// Authenticator field holding the token interpolation.
    pub fn field(&self) -> &'static str {
        match self {
            TokenType::Refresh => "refresh_token",
            TokenType::Access => "access_token_value",
        }
    }
}

/// An authenticator config, classified by its `type` tag.
#[derive(Debug, Clone, Copy)]
pub enum Authenticator<'a> {
    /// `type: DeclarativeOAuthAuthenticator`.
    DeclarativeOAuth(DeclarativeOAuth<'a>),
    /// Any other authenticator, or a value that is not an object.
    Other,
}

impl<'a> Authenticator<'a> {
    /// Classify an authenticator config by its `type` field.
    pub fn classify(config: &'a Value) -> Self {
        match config.as_object() {
            Some(fields)
                if fields.get("type").and_then(Value::as_str)
                    == Some(DECLARATIVE_OAUTH_AUTHENTICATOR) =>
            {
                Authenticator::DeclarativeOAuth(DeclarativeOAuth { fields })
            }
            _ => Authenticator::Other,
        }
    }
}

/// Fields of a declarative OAuth authenticator.
#[derive(Debug, Clone, Copy)]
pub struct DeclarativeOAuth<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> DeclarativeOAuth<'a> {
    /// Refresh when `refresh_token_updater` is truthy, access otherwise.
    pub fn token_type(&self) -> TokenType {
        if self.fields.get("refresh_token_updater").is_some_and(is_truthy) {
            TokenType::Refresh
        } else {
            TokenType::Access
        }
    }

    /// Config key interpolated by the token field, if it interpolates one.
    pub fn token_config_key(&self) -> Option<&'a str> {
        self.fields
            .get(self.token_type().field())
            .and_then(Value::as_str)
            .and_then(extract_interpolated_config_key)
    }

    /// Whether the token has no testing value to test with.
    ///
    /// A token field that interpolates no key can never be satisfied and
    /// counts as missing.
    pub fn is_missing_testing_value(&self, testing_values: &TestingValues) -> bool {
        match self.token_config_key() {
            Some(key) => !testing_values.contains_key(key),
            None => true,
        }
    }
}

/// Extract `key` from `{{ config['key'] }}`, `{{ config["key"] }}`, or
/// `{{ config.key }}`. Whitespace around the expression is ignored; the key
/// itself is any run of non-whitespace characters.
pub fn extract_interpolated_config_key(value: &str) -> Option<&str> {
    let expr = value
        .trim()
        .strip_prefix("{{")?
        .strip_suffix("}}")?
        .trim()
        .strip_prefix("config")?;

    if let Some(key) = expr.strip_prefix('.') {
        return is_config_key(key).then_some(key);
    }

    let inner = expr.strip_prefix('[')?.strip_suffix(']')?;
    let quote = inner.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let key = inner.strip_prefix(quote)?.strip_suffix(quote)?;
    (is_config_key(key) && !key.contains(quote)).then_some(key)
}

fn is_config_key(key: &str) -> bool {
    !key.is_empty() && !key.chars().any(char::is_whitespace)
}
