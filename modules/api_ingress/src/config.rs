use serde::{Deserialize, Serialize};

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_body_limit_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_enable_docs() -> bool {
    true
}

/// HTTP host configuration (`modules.api_ingress`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    /// `host:port`; empty means "use server.host/server.port".
    #[serde(default)]
    pub bind_addr: String,
    #[serde(default = "default_enable_docs")]
    pub enable_docs: bool,
    #[serde(default)]
    pub cors_enabled: bool,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            bind_addr: String::new(),
            enable_docs: default_enable_docs(),
            cors_enabled: false,
            request_timeout_secs: default_request_timeout_secs(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let cfg: ApiIngressConfig =
            serde_json::from_value(serde_json::json!({ "cors_enabled": true })).unwrap();
        assert!(cfg.cors_enabled);
        assert!(cfg.enable_docs);
        assert!(cfg.bind_addr.is_empty());
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.body_limit_bytes, 16 * 1024 * 1024);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: Result<ApiIngressConfig, _> =
            serde_json::from_value(serde_json::json!({ "bind": "x" }));
        assert!(res.is_err());
    }
}
