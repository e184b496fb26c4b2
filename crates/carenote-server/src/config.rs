use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "CARENOTE_CONFIG";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";
const DEFAULT_KB_BASE_URL: &str = "http://127.0.0.1:5173";
const DEFAULT_KB_RETRIES: u32 = 2;
const DEFAULT_KB_BACKOFF_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareNoteConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub bind_addr: String,
    /// Origin the `kb/` documents are served from.
    pub kb_base_url: String,
    /// Directory holding the last-known-good KB documents.
    pub cache_dir: PathBuf,
    /// Added in v1.
    pub kb_retries: u32,
    /// Added in v1.
    pub kb_backoff_ms: u64,
    /// AI polish is disabled when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polish: Option<PolishSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolishSettings {
    pub region: String,
    pub model_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

impl Default for CareNoteConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            kb_base_url: DEFAULT_KB_BASE_URL.to_string(),
            cache_dir: dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("carenote"),
            kb_retries: DEFAULT_KB_RETRIES,
            kb_backoff_ms: DEFAULT_KB_BACKOFF_MS,
            polish: None,
        }
    }
}

/// `$CARENOTE_CONFIG`, else `<config dir>/carenote/config.json`.
pub fn config_path() -> eyre::Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("carenote").join("config.json"))
}

pub fn load_config() -> eyre::Result<CareNoteConfig> {
    load_config_from(&config_path()?)
}

/// Load and migrate a config file. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> eyre::Result<CareNoteConfig> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no config file, using defaults");
        return Ok(CareNoteConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: CareNoteConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update CareNote."
        ));
    }

    // v0 -> v1: retry settings became configurable
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("kb_retries")
            .or_insert(serde_json::Value::Number(DEFAULT_KB_RETRIES.into()));
        obj.entry("kb_backoff_ms")
            .or_insert(serde_json::Value::Number(DEFAULT_KB_BACKOFF_MS.into()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 -> v1 (added kb retry settings)");
    }

    Ok(json)
}

pub fn save_config(config: &CareNoteConfig) -> eyre::Result<()> {
    save_config_to(&config_path()?, config)
}

pub fn save_config_to(path: &Path, config: &CareNoteConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
