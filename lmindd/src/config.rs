use serde::Deserialize;
use std::path::Path;

use crate::minder::LedMinderResult;

/// Opaque startup inputs for the association/session collaborators:
/// network credentials and the relay endpoint/token. The core consumes
/// these, it does not manage or validate them. Defaults match the
/// simulation environment the device was developed against.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub wifi_ssid: String,
    pub wifi_pass: String,
    pub relay_host: String,
    pub relay_port: u16,
    pub auth_token: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            wifi_ssid: "Wokwi-GUEST".to_string(),
            wifi_pass: String::new(),
            relay_host: "blynk.cloud".to_string(),
            relay_port: 80,
            auth_token: String::new(),
        }
    }
}

impl RelayConfig {
    pub fn load(path: impl AsRef<Path>) -> LedMinderResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Missing or unreadable config is not fatal for a sim build
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path.as_ref()).unwrap_or_else(|e| {
            log::warn!(
                "No usable config at {:?} ({e:}), using defaults",
                path.as_ref()
            );
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: RelayConfig =
            toml::from_str("relay_host = \"relay.example.net\"\nrelay_port = 8080\n").unwrap();
        assert_eq!(cfg.relay_host, "relay.example.net");
        assert_eq!(cfg.relay_port, 8080);
        assert_eq!(cfg.wifi_ssid, "Wokwi-GUEST");
        assert!(cfg.auth_token.is_empty());
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let cfg: RelayConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.relay_host, "blynk.cloud");
        assert_eq!(cfg.relay_port, 80);
    }
}
