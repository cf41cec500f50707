//! Declared REST surface for a future backend
//!
//! Nothing in the app issues requests against these URLs yet. The table is
//! shown in the help dialog so the contract is visible.

use std::env;

/// Environment variable holding the API base URL
pub const API_URL_ENV: &str = "ADPATTERNS_API_URL";

/// Base URL used when neither config nor environment provide one
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// URL templates for every backend endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    base: String,
}

impl ApiEndpoints {
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve the base URL: explicit override, then env var, then default
    pub fn resolve(override_url: Option<&str>) -> Self {
        let base = override_url
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .or_else(|| env::var(API_URL_ENV).ok().filter(|u| !u.is_empty()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(base)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn auth_login(&self) -> String {
        format!("{}/api/auth/login/json", self.base)
    }

    pub fn auth_register(&self) -> String {
        format!("{}/api/auth/register", self.base)
    }

    pub fn campaigns_create(&self) -> String {
        format!("{}/api/campaigns/create", self.base)
    }

    pub fn campaigns_list(&self) -> String {
        format!("{}/api/campaigns", self.base)
    }

    pub fn campaigns_update(&self, id: &str) -> String {
        format!("{}/api/campaigns/{}", self.base, id)
    }

    pub fn campaigns_delete(&self, id: &str) -> String {
        format!("{}/api/campaigns/{}", self.base, id)
    }

    pub fn ad_accounts_connect(&self) -> String {
        format!("{}/api/ad-accounts/connect", self.base)
    }

    pub fn ad_accounts_list(&self) -> String {
        format!("{}/api/ad-accounts", self.base)
    }

    pub fn suggestions_generate(&self) -> String {
        format!("{}/api/suggestions/generate", self.base)
    }

    /// (name, url) pairs for display, with `{id}` left as a placeholder
    pub fn table(&self) -> Vec<(&'static str, String)> {
        vec![
            ("auth.login", self.auth_login()),
            ("auth.register", self.auth_register()),
            ("campaigns.create", self.campaigns_create()),
            ("campaigns.list", self.campaigns_list()),
            ("campaigns.update", self.campaigns_update("{id}")),
            ("campaigns.delete", self.campaigns_delete("{id}")),
            ("adAccounts.connect", self.ad_accounts_connect()),
            ("adAccounts.list", self.ad_accounts_list()),
            ("suggestions.generate", self.suggestions_generate()),
        ]
    }
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
