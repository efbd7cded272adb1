use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use callwarden_core::rules::{DialPlan, InsertedDigit};
use callwarden_core::CoreError;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "callwarden";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub dial_plan: DialPlan,
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
    #[error("inserted digit must be a single digit, got {0:?}")]
    InvalidInsertedDigitValue(String),
    #[error("invalid dial plan: {0}")]
    InvalidDialPlan(#[from] CoreError),
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
    region: Option<String>,
    country_codes: Option<Vec<String>>,
    match_suffix_len: Option<usize>,
    inserted_digit: Option<InsertedDigitFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InsertedDigitFile {
    area_code_digits: Option<usize>,
    digit: Option<String>,
    /// Set to true to turn the insertion rule off entirely.
    disabled: Option<bool>,
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
    let mut plan = DialPlan::default();

    if let Some(region) = parsed.region {
        plan.region = region;
    }
    if let Some(codes) = parsed.country_codes {
        plan.country_codes = codes;
    }
    if let Some(suffix_len) = parsed.match_suffix_len {
        plan.suffix_len = suffix_len;
    }
    if let Some(inserted) = parsed.inserted_digit {
        if inserted.disabled.unwrap_or(false) {
            plan.inserted_digit = None;
        } else {
            let default = plan.inserted_digit.unwrap_or(InsertedDigit {
                area_code_digits: 2,
                digit: '9',
            });
            let digit = match inserted.digit {
                Some(value) => parse_digit(&value)?,
                None => default.digit,
            };
            plan.inserted_digit = Some(InsertedDigit {
                area_code_digits: inserted.area_code_digits.unwrap_or(default.area_code_digits),
                digit,
            });
        }
    }

    plan.validate()?;
    Ok(AppConfig { dial_plan: plan })
}

fn parse_digit(value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() => Ok(c),
        _ => Err(ConfigError::InvalidInsertedDigitValue(value.to_string())),
    }
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

#[cfg(test)]
mod tests {
    use super::{load_at_path, merge_config, ConfigError, ConfigFile, InsertedDigitFile};
    use callwarden_core::rules::InsertedDigit;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            region: Some("PT".to_string()),
            country_codes: Some(vec!["351".to_string()]),
            match_suffix_len: Some(9),
            inserted_digit: Some(InsertedDigitFile {
                area_code_digits: Some(3),
                digit: Some("9".to_string()),
                disabled: None,
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.dial_plan.region, "PT");
        assert_eq!(merged.dial_plan.country_codes, vec!["351".to_string()]);
        assert_eq!(merged.dial_plan.suffix_len, 9);
        assert_eq!(
            merged.dial_plan.inserted_digit,
            Some(InsertedDigit {
                area_code_digits: 3,
                digit: '9',
            })
        );
    }

    #[test]
    fn merge_config_can_disable_insertion_rule() {
        let parsed = ConfigFile {
            region: None,
            country_codes: None,
            match_suffix_len: None,
            inserted_digit: Some(InsertedDigitFile {
                area_code_digits: None,
                digit: None,
                disabled: Some(true),
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.dial_plan.inserted_digit, None);
    }

    #[test]
    fn merge_config_rejects_bad_digit() {
        let parsed = ConfigFile {
            region: None,
            country_codes: None,
            match_suffix_len: None,
            inserted_digit: Some(InsertedDigitFile {
                area_code_digits: None,
                digit: Some("99".to_string()),
                disabled: None,
            }),
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInsertedDigitValue(_)));
    }

    #[test]
    fn merge_config_rejects_invalid_plan() {
        let parsed = ConfigFile {
            region: None,
            country_codes: Some(vec!["+55".to_string()]),
            match_suffix_len: None,
            inserted_digit: None,
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDialPlan(_)));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("config file not found"));
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "region = \"BR\"\ncountry_codes = [\"55\"]\nmatch_suffix_len = 8\n\n[inserted_digit]\narea_code_digits = 2\ndigit = \"9\"\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.dial_plan.region, "BR");
        assert_eq!(config.dial_plan.suffix_len, 8);
    }
}
