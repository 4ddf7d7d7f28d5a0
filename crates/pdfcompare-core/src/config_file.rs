use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub diff: Option<DiffConfig>,
    pub report: Option<ReportConfig>,
    pub normalize: Option<NormalizeConfig>,
    pub matching: Option<MatchingConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Unchanged lines shown around each change.
    pub context: Option<usize>,
    /// Column at which report lines wrap; 0 disables wrapping.
    pub wrap_column: Option<usize>,
    /// Show every line instead of hunks with context.
    pub full: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub path: Option<String>,
    pub left_label: Option<String>,
    pub right_label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizeConfig {
    pub expand_ligatures: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub autojunk: Option<bool>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {error}", path.display())]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },
    #[error("invalid config {}: {error}", path.display())]
    Parse {
        path: PathBuf,
        error: toml::de::Error,
    },
}

/// Platform config directory path: `<config_dir>/pdfcompare/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pdfcompare").join("config.toml"))
}

/// Load config by cascading CWD `.pdfcompare.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".pdfcompare.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Load a config the user named explicitly. Unlike [`load_from_path`],
/// a missing or malformed file is an error.
pub fn load_explicit(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
        path: path.to_path_buf(),
        error,
    })?;
    toml::from_str(&content).map_err(|error| ConfigError::Parse {
        path: path.to_path_buf(),
        error,
    })
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let diff = DiffConfig {
        context: pick(&overlay.diff, &base.diff, |d| d.context),
        wrap_column: pick(&overlay.diff, &base.diff, |d| d.wrap_column),
        full: pick(&overlay.diff, &base.diff, |d| d.full),
    };
    let report = ReportConfig {
        path: pick(&overlay.report, &base.report, |r| r.path.clone()),
        left_label: pick(&overlay.report, &base.report, |r| r.left_label.clone()),
        right_label: pick(&overlay.report, &base.report, |r| r.right_label.clone()),
    };
    let normalize = NormalizeConfig {
        expand_ligatures: pick(&overlay.normalize, &base.normalize, |n| n.expand_ligatures),
    };
    let matching = MatchingConfig {
        autojunk: pick(&overlay.matching, &base.matching, |m| m.autojunk),
    };

    ConfigFile {
        diff: Some(diff),
        report: Some(report),
        normalize: Some(normalize),
        matching: Some(matching),
    }
}

fn pick<S, T>(overlay: &Option<S>, base: &Option<S>, field: impl Fn(&S) -> Option<T>) -> Option<T> {
    overlay
        .as_ref()
        .and_then(&field)
        .or_else(|| base.as_ref().and_then(&field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let config: ConfigFile = toml::from_str(
            r#"
            [diff]
            context = 5

            [report]
            left_label = "Struts"
            "#,
        )
        .unwrap();

        assert_eq!(config.diff.as_ref().unwrap().context, Some(5));
        assert_eq!(config.diff.as_ref().unwrap().wrap_column, None);
        assert_eq!(
            config.report.as_ref().unwrap().left_label.as_deref(),
            Some("Struts")
        );
        assert!(config.normalize.is_none());
    }

    #[test]
    fn test_merge_overlay_wins_and_base_fills_gaps() {
        let base: ConfigFile = toml::from_str(
            r#"
            [diff]
            context = 2
            wrap_column = 100
            [matching]
            autojunk = false
            "#,
        )
        .unwrap();
        let overlay: ConfigFile = toml::from_str(
            r#"
            [diff]
            context = 7
            "#,
        )
        .unwrap();

        let merged = merge(base, overlay);
        let diff = merged.diff.unwrap();
        assert_eq!(diff.context, Some(7));
        assert_eq!(diff.wrap_column, Some(100));
        assert_eq!(merged.matching.unwrap().autojunk, Some(false));
        assert_eq!(merged.report.unwrap().path, None);
    }

    #[test]
    fn test_load_from_path_missing_or_invalid() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from_path(&dir.path().join("absent.toml")).is_none());

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[diff\ncontext = ").unwrap();
        assert!(load_from_path(&bad).is_none());
    }

    #[test]
    fn test_load_explicit_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            load_explicit(&missing),
            Err(ConfigError::Io { .. })
        ));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[diff]\ncontext = \"three\"").unwrap();
        let err = load_explicit(&bad).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        // The message already carries the parse error; it is not chained again.
        assert!(err.to_string().contains("bad.toml"));
        assert!(std::error::Error::source(&err).is_none());

        let good = dir.path().join("good.toml");
        std::fs::write(&good, "[normalize]\nexpand_ligatures = true").unwrap();
        let config = load_explicit(&good).unwrap();
        assert_eq!(config.normalize.unwrap().expand_ligatures, Some(true));
    }
}
