use std::path::{Path, PathBuf};

use ecscp_ecs::CredentialSource;
use ecscp_provisioner::ReconcilerConfig;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when changing shape.
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EcscpConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// AWS region. `None` defers to the SDK's default chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub credentials: CredentialSource,
    #[serde(default)]
    pub reconciler: ReconcilerConfig,
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("ecscp").join("config.json"))
}

/// Load the config at `path`, or the default location when `None`.
///
/// A missing file at the default location yields defaults; a missing file
/// the caller named explicitly is an error.
pub fn load_config(path: Option<&Path>) -> eyre::Result<EcscpConfig> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (default_config_path()?, false),
    };

    if !path.exists() {
        if explicit {
            return Err(eyre::eyre!("config file {} does not exist", path.display()));
        }
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(EcscpConfig {
            config_version: CURRENT_VERSION,
            ..EcscpConfig::default()
        });
    }

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    parse_config(&contents)
}

/// Parse and version-check a config document.
pub fn parse_config(contents: &str) -> eyre::Result<EcscpConfig> {
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);

    if on_disk_version > u64::from(CURRENT_VERSION) {
        return Err(eyre::eyre!(
            "config_version {on_disk_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update ecscp."
        ));
    }

    let mut config: EcscpConfig = serde_json::from_value(json)?;
    config.config_version = CURRENT_VERSION;
    Ok(config)
}
