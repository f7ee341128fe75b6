//! Client configuration

use crate::error::ClientError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use solana_sdk::{pubkey::Pubkey, signature::Keypair};
use std::str::FromStr;

/// Default config file, overridden by `CPAMM_CONFIG`
pub const DEFAULT_CONFIG_PATH: &str = "cpamm.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// RPC URL for Solana cluster
    pub rpc_url: String,

    /// AMM program ID (base58)
    pub program_id: String,

    /// Wallet keypair path, `~` expanded
    pub keypair_path: String,

    /// Tolerance applied to quoted amounts when the caller gives no explicit bound
    pub slippage_bps: u16,
}

impl Config {
    /// Load configuration from `path`, or `CPAMM_CONFIG`, or `cpamm.toml`
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_string(),
            None => std::env::var("CPAMM_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string()),
        };

        let config_str = std::fs::read_to_string(&config_path)
            .context(format!("Failed to read config file: {}", config_path))?;

        Self::from_toml(&config_str)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Create default configuration
    pub fn default_localnet() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8899".to_string(),
            program_id: cpamm_program_id().to_string(),
            keypair_path: "~/.config/solana/id.json".to_string(),
            slippage_bps: 50,
        }
    }

    /// Write default config to file
    pub fn write_default(path: &str) -> Result<()> {
        let config = Self::default_localnet();
        let toml_str = toml::to_string_pretty(&config).context("Failed to serialize config")?;

        std::fs::write(path, toml_str).context(format!("Failed to write config to {}", path))?;

        log::info!("Created default config at {}", path);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        self.program_id()?;
        if u64::from(self.slippage_bps) >= pool_model::math::BPS_DENOMINATOR {
            return Err(ClientError::InvalidConfig {
                field: "slippage_bps",
                reason: format!("{} must be below 10000", self.slippage_bps),
            });
        }
        Ok(())
    }

    pub fn program_id(&self) -> Result<Pubkey, ClientError> {
        Pubkey::from_str(&self.program_id).map_err(|e| ClientError::InvalidConfig {
            field: "program_id",
            reason: e.to_string(),
        })
    }

    /// Load the wallet keypair (JSON array or raw bytes)
    pub fn load_keypair(&self) -> Result<Keypair> {
        let expanded_path = shellexpand::tilde(&self.keypair_path);
        let bytes = std::fs::read(expanded_path.as_ref())
            .context(format!("Failed to read keypair from {}", self.keypair_path))?;

        let keypair = if bytes.first() == Some(&b'[') {
            let json_data: Vec<u8> =
                serde_json::from_slice(&bytes).context("Failed to parse keypair JSON")?;
            Keypair::try_from(&json_data[..]).context("Failed to create keypair from bytes")?
        } else {
            Keypair::try_from(&bytes[..]).context("Failed to create keypair from bytes")?
        };

        Ok(keypair)
    }
}

/// Program ID the on-chain crate declares
pub fn cpamm_program_id() -> Pubkey {
    Pubkey::new_from_array(cpamm_program::ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_creation() {
        let config = Config::default_localnet();
        assert_eq!(config.rpc_url, "http://127.0.0.1:8899");
        assert_eq!(config.slippage_bps, 50);
        assert_eq!(config.program_id().unwrap(), cpamm_program_id());
    }

    #[test]
    fn test_parse_toml() {
        let config = Config::from_toml(
            r#"
            rpc_url = "https://api.devnet.solana.com"
            program_id = "CPAMMd1cN6qZKpTrVwX8Hy4bGfE3sJ2uRkLm9nWoQz7a"
            keypair_path = "~/wallet.json"
            slippage_bps = 100
            "#,
        )
        .unwrap();

        assert_eq!(config.slippage_bps, 100);
        assert_eq!(config.program_id().unwrap(), cpamm_program_id());
    }

    #[test]
    fn test_default_survives_toml() {
        let config = Config::default_localnet();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = Config::default_localnet();
        config.slippage_bps = 10_000;
        assert!(matches!(
            config.validate(),
            Err(ClientError::InvalidConfig { field: "slippage_bps", .. })
        ));

        let mut config = Config::default_localnet();
        config.program_id = "not-a-key".to_string();
        assert!(matches!(
            config.validate(),
            Err(ClientError::InvalidConfig { field: "program_id", .. })
        ));
    }
}
