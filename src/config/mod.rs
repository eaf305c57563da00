pub mod presets;
mod schema;
mod validation;

pub use schema::Config;
pub use validation::validate_config;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::dataset::RawTable;
use crate::scoring::WeightVector;

/// Get the config directory path (~/.config/rai-scope/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".config").join("rai-scope")
}

/// Get the default config file path (~/.config/rai-scope/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path and
///   falls back to [`Config::default`] when no file exists there.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        tracing::debug!(path = %config_path.display(), "no config file, using built-in defaults");
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

/// Write configuration as YAML atomically, creating parent directories.
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit().context("Failed to save config")?;

    Ok(())
}

/// Load a raw table from a `.json` file, or YAML otherwise.
pub fn load_table(path: &Path) -> Result<RawTable> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset at {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let table: RawTable = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse dataset: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse dataset: invalid YAML in {}", path.display()))?
    };

    Ok(table)
}

/// Parse a `NAME=VALUE` weight override. The last `=` separates the value,
/// so metric names may contain `=`.
pub fn parse_weight_override(s: &str) -> Result<(String, f64)> {
    let (name, value) = s
        .rsplit_once('=')
        .with_context(|| format!("Invalid weight '{}': expected NAME=VALUE", s))?;
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Invalid weight '{}': metric name is empty", s);
    }
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("Invalid weight '{}': '{}' is not a number", s, value.trim()))?;
    Ok((name.to_string(), value))
}

/// Apply overrides on top of configured weights.
pub fn apply_weight_overrides(weights: &WeightVector, overrides: &[String]) -> Result<WeightVector> {
    let mut merged = weights.clone();
    for raw in overrides {
        let (name, value) = parse_weight_override(raw)?;
        merged.set(name, value);
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("rai-scope-test-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let path = temp_path("does-not-exist.yaml");
        assert!(load_config(Some(path)).is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("config.yaml");
        let config = Config::default();
        save_config(&path, &config).unwrap();
        let loaded = load_config(Some(path.clone())).unwrap();
        assert_eq!(loaded, config);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_invalid_yaml() {
        let path = temp_path("invalid.yaml");
        fs::write(&path, "schema: [unclosed").unwrap();
        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("invalid YAML"));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_table_json_and_yaml() {
        let json_path = temp_path("table.json");
        fs::write(&json_path, r#"{"columns": ["Location", "Score"], "rows": [["A", 1]]}"#).unwrap();
        let yaml_path = temp_path("table.yaml");
        fs::write(&yaml_path, "columns: [Location, Score]\nrows:\n  - [A, 1]\n").unwrap();

        let from_json = load_table(&json_path).unwrap();
        let from_yaml = load_table(&yaml_path).unwrap();
        assert_eq!(from_json, from_yaml);

        fs::remove_file(&json_path).ok();
        fs::remove_file(&yaml_path).ok();
    }

    #[test]
    fn test_parse_weight_override() {
        assert_eq!(
            parse_weight_override("GDP ($B)=40").unwrap(),
            ("GDP ($B)".to_string(), 40.0)
        );
        assert_eq!(
            parse_weight_override("a=b = 2.5").unwrap(),
            ("a=b".to_string(), 2.5)
        );
        assert!(parse_weight_override("GDP").is_err());
        assert!(parse_weight_override("=3").is_err());
        assert!(parse_weight_override("GDP=lots").is_err());
    }

    #[test]
    fn test_apply_weight_overrides() {
        let base = WeightVector::new().with("GDP", 20.0).with("Labor", 20.0);
        let merged = apply_weight_overrides(&base, &["Labor=0".to_string()]).unwrap();
        assert_eq!(merged.get("GDP"), Some(20.0));
        assert_eq!(merged.get("Labor"), Some(0.0));
        assert_eq!(base.get("Labor"), Some(20.0));
    }
}
