//! Cloudflare credentials shared by the SQL store and the inference endpoint

use std::env;
use std::fmt;

pub const ACCOUNT_ID_VAR: &str = "CLOUDFLARE_ACCOUNT_ID";
pub const DATABASE_ID_VAR: &str = "CLOUDFLARE_DATABASE_ID";
pub const API_TOKEN_VAR: &str = "CLOUDFLARE_API_TOKEN";

/// Possibly incomplete credentials as supplied by the caller
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub account_id: Option<String>,
    pub database_id: Option<String>,
    pub api_token: Option<String>,
}

/// All three values present and non-empty
#[derive(Clone, PartialEq, Eq)]
pub struct CloudflareCredentials {
    pub account_id: String,
    pub database_id: String,
    pub api_token: String,
}

impl Credentials {
    pub fn new(
        account_id: impl Into<String>,
        database_id: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            account_id: Some(account_id.into()),
            database_id: Some(database_id.into()),
            api_token: Some(api_token.into()),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            account_id: lookup(ACCOUNT_ID_VAR),
            database_id: lookup(DATABASE_ID_VAR),
            api_token: lookup(API_TOKEN_VAR),
        }
    }

    /// Replace any value for which an override is given
    pub fn with_overrides(
        self,
        account_id: Option<String>,
        database_id: Option<String>,
        api_token: Option<String>,
    ) -> Self {
        Self {
            account_id: account_id.or(self.account_id),
            database_id: database_id.or(self.database_id),
            api_token: api_token.or(self.api_token),
        }
    }

    /// `None` unless every value is present and non-blank
    pub fn resolve(&self) -> Option<CloudflareCredentials> {
        Some(CloudflareCredentials {
            account_id: present(&self.account_id)?,
            database_id: present(&self.database_id)?,
            api_token: present(&self.api_token)?,
        })
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn redact(value: Option<&str>) -> &'static str {
    match value {
        Some(v) if !v.is_empty() => "<redacted>",
        _ => "<missing>",
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &self.account_id)
            .field("database_id", &self.database_id)
            .field("api_token", &redact(self.api_token.as_deref()))
            .finish()
    }
}

impl fmt::Debug for CloudflareCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudflareCredentials")
            .field("account_id", &self.account_id)
            .field("database_id", &self.database_id)
            .field("api_token", &redact(Some(&self.api_token)))
            .finish()
    }
}
