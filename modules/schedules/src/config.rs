use serde::{Deserialize, Serialize};

/// Configuration for the schedules module (`modules.schedules`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchedulesConfig {
    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,
    #[serde(default = "default_max_category_name_length")]
    pub max_category_name_length: usize,
    #[serde(default = "default_max_highlight_range_days")]
    pub max_highlight_range_days: i64,
    /// Color used for categories and graph segments that carry none.
    #[serde(default = "default_color")]
    pub default_color: String,
    #[serde(default)]
    pub identity: IdentityConfig,
}

/// Where the upstream auth proxy puts the asserted identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
    #[serde(default = "default_email_header")]
    pub email_header: String,
    #[serde(default = "default_username_header")]
    pub username_header: String,
    /// Create a local user on first sight of an unknown email.
    #[serde(default = "default_auto_provision")]
    pub auto_provision: bool,
}

impl Default for SchedulesConfig {
    fn default() -> Self {
        Self {
            max_title_length: default_max_title_length(),
            max_category_name_length: default_max_category_name_length(),
            max_highlight_range_days: default_max_highlight_range_days(),
            default_color: default_color(),
            identity: IdentityConfig::default(),
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            email_header: default_email_header(),
            username_header: default_username_header(),
            auto_provision: default_auto_provision(),
        }
    }
}

fn default_max_title_length() -> usize {
    50
}

fn default_max_category_name_length() -> usize {
    50
}

fn default_max_highlight_range_days() -> i64 {
    366
}

fn default_color() -> String {
    "#87CEFA".to_string()
}

fn default_email_header() -> String {
    "x-auth-request-email".to_string()
}

fn default_username_header() -> String {
    "x-auth-request-user".to_string()
}

fn default_auto_provision() -> bool {
    true
}
