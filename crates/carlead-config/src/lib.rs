use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use carlead_core::rules::DateBucket;
use carlead_core::VehicleTaxonomy;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "carlead";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_STORAGE_KEY: &str = "ac_contacts";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_key: String,
    pub default_bucket: DateBucket,
    pub taxonomy: VehicleTaxonomy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_bucket: DateBucket::Today,
            taxonomy: VehicleTaxonomy::builtin(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid storage_key value: {0:?}")]
    InvalidStorageKey(String),
    #[error("invalid taxonomy brand name: {0:?}")]
    InvalidTaxonomyBrand(String),
    #[error("invalid taxonomy model name for {brand}: {model:?}")]
    InvalidTaxonomyModel { brand: String, model: String },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    storage_key: Option<String>,
    default_bucket: Option<DateBucket>,
    taxonomy: Option<BTreeMap<String, BTreeMap<String, Vec<String>>>>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(key) = parsed.storage_key {
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidStorageKey(key));
        }
        config.storage_key = trimmed.to_string();
    }

    if let Some(bucket) = parsed.default_bucket {
        config.default_bucket = bucket;
    }

    if let Some(taxonomy) = parsed.taxonomy {
        for (brand, models) in taxonomy {
            let brand_name = brand.trim();
            if brand_name.is_empty() {
                return Err(ConfigError::InvalidTaxonomyBrand(brand));
            }
            for (model, trims) in models {
                let model_name = model.trim();
                if model_name.is_empty() {
                    return Err(ConfigError::InvalidTaxonomyModel {
                        brand: brand_name.to_string(),
                        model,
                    });
                }
                config.taxonomy.add_model(
                    brand_name,
                    model_name,
                    trims
                        .iter()
                        .map(|trim| trim.trim())
                        .filter(|trim| !trim.is_empty()),
                );
            }
        }
    }

    Ok(config)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
