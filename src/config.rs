use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "EleutherAI/gpt-neo-125M";
pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name} value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub model_id: String,
    pub inference_url: String,
    pub hf_token: Option<String>,
    pub public_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            model_id: DEFAULT_MODEL.to_string(),
            inference_url: DEFAULT_INFERENCE_URL.to_string(),
            hf_token: None,
            public_url: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = match var("HOST") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid { name: "HOST", value: v })?,
            None => defaults.host,
        };
        let port = match var("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid { name: "PORT", value: v })?,
            None => defaults.port,
        };

        Ok(Self {
            host,
            port,
            model_id: var("MODEL_ID").unwrap_or(defaults.model_id),
            inference_url: var("INFERENCE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.inference_url),
            hf_token: var("HF_TOKEN"),
            public_url: var("PUBLIC_URL"),
        })
    }

    #[inline]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_bind_all_interfaces_on_5000() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:5000");
        assert_eq!(config.model_id, DEFAULT_MODEL);
        assert_eq!(config.inference_url, DEFAULT_INFERENCE_URL);
        assert!(config.hf_token.is_none());
        assert!(config.public_url.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("MODEL_ID", "gpt2"),
            ("INFERENCE_URL", "http://localhost:3000/models/"),
            ("HF_TOKEN", "hf_secret"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.model_id, "gpt2");
        assert_eq!(config.inference_url, "http://localhost:3000/models");
        assert_eq!(config.hf_token.as_deref(), Some("hf_secret"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[("MODEL_ID", "  "), ("HF_TOKEN", "")])).unwrap();
        assert_eq!(config.model_id, DEFAULT_MODEL);
        assert!(config.hf_token.is_none());
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = Config::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert_eq!(err.to_string(), "invalid PORT value \"http\"");
    }
}
