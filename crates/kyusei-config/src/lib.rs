use anyhow::Context;
use kyusei::CalculatorConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Probed in order when no explicit path is given.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["configs/kyusei.toml", "../../configs/kyusei.toml"];

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    calculator: Option<CalculatorConfig>,
}

/// Reads an explicit path, or the first of [`DEFAULT_CONFIG_PATHS`] that
/// exists. `Ok(None)` means nothing was found to probe.
pub fn read_config_text(path: Option<&Path>) -> anyhow::Result<Option<(PathBuf, String)>> {
    if let Some(path) = path {
        let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        return Ok(Some((path.to_path_buf(), text)));
    }
    for p in &DEFAULT_CONFIG_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            return Ok(Some((PathBuf::from(p), text)));
        }
    }
    Ok(None)
}

pub fn validate_settings(config: &CalculatorConfig) -> anyhow::Result<()> {
    if config.min_year > config.max_year {
        anyhow::bail!(
            "calculator.min_year ({}) must not exceed calculator.max_year ({})",
            config.min_year,
            config.max_year
        );
    }
    if config.warning_window_days <= 0 {
        anyhow::bail!(
            "calculator.warning_window_days must be positive, got {}",
            config.warning_window_days
        );
    }
    if config.years_ahead < 0 {
        anyhow::bail!("calculator.years_ahead must not be negative, got {}", config.years_ahead);
    }
    Ok(())
}

/// Parses the `[calculator]` table; a missing table yields the defaults.
pub fn parse_settings(text: &str) -> anyhow::Result<CalculatorConfig> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse kyusei.toml calculator settings: {e}"))?;
    let config = root.calculator.unwrap_or_default();
    validate_settings(&config)?;
    Ok(config)
}

/// Loads calculator settings, falling back to defaults when no file is found.
/// An explicit `path` must exist.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<CalculatorConfig> {
    match read_config_text(path)? {
        Some((source, text)) => parse_settings(&text).with_context(|| format!("Invalid config {}", source.display())),
        None => Ok(CalculatorConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kyusei::TermStrategy;

    #[test]
    fn test_partial_table_keeps_defaults() -> anyhow::Result<()> {
        let config = parse_settings("[calculator]\nstrategy = \"astronomical\"\nmax_year = 2050\n")?;
        assert_eq!(config.strategy, TermStrategy::Astronomical);
        assert_eq!(config.min_year, 1900);
        assert_eq!(config.max_year, 2050);
        assert_eq!(config.warning_window_days, 3);
        Ok(())
    }

    #[test]
    fn test_missing_table_is_default() -> anyhow::Result<()> {
        assert_eq!(parse_settings("")?, CalculatorConfig::default());
        Ok(())
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = parse_settings("[calculator]\nmin_year = 2000\nmax_year = 1990\n").unwrap_err();
        assert!(err.to_string().contains("must not exceed"));
    }

    #[test]
    fn test_rejects_unknown_strategy() {
        assert!(parse_settings("[calculator]\nstrategy = \"lunar\"\n").is_err());
    }

    #[test]
    fn test_load_explicit_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let p = dir.path().join("kyusei.toml");
        fs::write(&p, "[calculator]\nwarning_window_days = 5\nyears_ahead = 10\n")?;
        let config = load_settings(Some(&p))?;
        assert_eq!(config.warning_window_days, 5);
        assert_eq!(config.years_ahead, 10);
        Ok(())
    }

    #[test]
    fn test_explicit_missing_file_errors() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        assert!(load_settings(Some(&dir.path().join("absent.toml"))).is_err());
        Ok(())
    }

    #[test]
    fn test_invalid_file_names_source() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let p = dir.path().join("kyusei.toml");
        fs::write(&p, "[calculator]\nwarning_window_days = 0\n")?;
        let err = load_settings(Some(&p)).unwrap_err();
        assert!(format!("{:#}", err).contains("warning_window_days must be positive"));
        assert!(err.to_string().contains("Invalid config"));
        Ok(())
    }
}
