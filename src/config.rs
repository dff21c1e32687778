use std::{
    error::Error,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use machine_learning::{Dataset, MlError, bayes::DegeneratePolicy};
use serde::Deserialize;

/// The run configuration used when none is provided.
const BUILTIN: &str = include_str!("../demos/iris.json");

const DEFAULT_TEST_RATIO: f64 = 0.3;

/// Errors produced while loading or validating a run configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse(serde_json::Error),
    /// Invalid configuration, caught before training.
    Invalid(String),
    Csv { line: usize, msg: String },
    Data(MlError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read '{}': {source}", path.display()),
            Self::Parse(e) => write!(f, "invalid JSON: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
            Self::Csv { line, msg } => write!(f, "dataset line {line}: {msg}"),
            Self::Data(e) => write!(f, "invalid dataset: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::Data(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<MlError> for ConfigError {
    fn from(value: MlError) -> Self {
        Self::Data(value)
    }
}

/// Where the labeled rows come from.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetConfig {
    Inline {
        rows: Vec<Vec<f64>>,
        labels: Vec<String>,
    },
    /// Comma separated values, the last column of each line is the label.
    Csv { path: PathBuf },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// A full classification run: data, split and scoring options.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub dataset: DatasetConfig,
    #[serde(default = "default_test_ratio")]
    pub test_ratio: f64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub degenerate_policy: DegeneratePolicy,
    #[serde(default)]
    pub log_space: bool,
    #[serde(default)]
    pub report: ReportFormat,
}

fn default_test_ratio() -> f64 {
    DEFAULT_TEST_RATIO
}

impl RunConfig {
    /// Loads and validates a `RunConfig` from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&content)
    }

    /// Parses and validates a `RunConfig` from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the bundled iris sample configuration.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json_str(BUILTIN)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.test_ratio > 0.0 && self.test_ratio < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "test_ratio must be within (0, 1), got {}",
                self.test_ratio
            )));
        }

        if let DatasetConfig::Inline { rows, .. } = &self.dataset {
            if rows.is_empty() {
                return Err(ConfigError::Invalid("inline dataset has no rows".into()));
            }
        }

        Ok(())
    }

    /// Materializes the configured dataset.
    pub fn dataset(&self) -> Result<Dataset<String>, ConfigError> {
        match &self.dataset {
            DatasetConfig::Inline { rows, labels } => {
                Ok(Dataset::from_rows(rows.clone(), labels.clone())?)
            }
            DatasetConfig::Csv { path } => {
                let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.clone(),
                    source,
                })?;
                parse_csv(&content)
            }
        }
    }
}

/// Parses labeled rows where the last column of each line is the label.
pub fn parse_csv(content: &str) -> Result<Dataset<String>, ConfigError> {
    let mut rows = Vec::new();
    let mut labels = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((features, label)) = line.rsplit_once(',') else {
            return Err(ConfigError::Csv {
                line: i + 1,
                msg: "expected at least one feature and a label".into(),
            });
        };

        let row = features
            .split(',')
            .map(|v| {
                v.trim().parse::<f64>().map_err(|_| ConfigError::Csv {
                    line: i + 1,
                    msg: format!("cannot parse '{v}' as f64"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        rows.push(row);
        labels.push(label.trim().to_string());
    }

    Ok(Dataset::from_rows(rows, labels)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_config_is_valid() {
        let config = RunConfig::builtin().unwrap();
        let data = config.dataset().unwrap();

        assert_eq!(data.len(), 30);
        assert_eq!(data.nfeatures(), 4);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn optional_fields_take_defaults() {
        let json = r#"{
            "dataset": { "kind": "inline", "rows": [[1.0], [2.0]], "labels": ["a", "b"] }
        }"#;

        let config = RunConfig::from_json_str(json).unwrap();

        assert_eq!(config.test_ratio, DEFAULT_TEST_RATIO);
        assert_eq!(config.seed, None);
        assert_eq!(config.degenerate_policy, DegeneratePolicy::PointMass);
        assert!(!config.log_space);
        assert_eq!(config.report, ReportFormat::Text);
    }

    #[test]
    fn strict_policy_is_parsed() {
        let json = r#"{
            "dataset": { "kind": "csv", "path": "data.csv" },
            "degenerate_policy": "strict",
            "report": "json"
        }"#;

        let config = RunConfig::from_json_str(json).unwrap();
        assert_eq!(config.degenerate_policy, DegeneratePolicy::Strict);
        assert_eq!(config.report, ReportFormat::Json);
    }

    #[test]
    fn ratio_out_of_range_is_rejected() {
        let json = r#"{
            "dataset": { "kind": "inline", "rows": [[1.0]], "labels": ["a"] },
            "test_ratio": 1.5
        }"#;

        assert!(matches!(
            RunConfig::from_json_str(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn empty_inline_dataset_is_rejected() {
        let json = r#"{ "dataset": { "kind": "inline", "rows": [], "labels": [] } }"#;
        assert!(matches!(
            RunConfig::from_json_str(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn ragged_inline_rows_surface_as_data_errors() {
        let json = r#"{
            "dataset": { "kind": "inline", "rows": [[1.0, 2.0], [3.0]], "labels": ["a", "b"] }
        }"#;

        let config = RunConfig::from_json_str(json).unwrap();
        assert!(matches!(
            config.dataset(),
            Err(ConfigError::Data(MlError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn csv_takes_the_last_column_as_label() {
        let data = parse_csv("5.1, 3.5, setosa\n\n7.0, 3.2, versicolor\n").unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(data.nfeatures(), 2);
        assert_eq!(data.y(), ["setosa", "versicolor"]);
        assert_eq!(data.x()[[1, 0]], 7.0);
    }

    #[test]
    fn csv_reports_the_offending_line() {
        let err = parse_csv("1.0,a\nx,b\n").unwrap_err();
        assert!(matches!(err, ConfigError::Csv { line: 2, .. }));
    }

    #[test]
    fn csv_line_without_label_is_rejected() {
        let err = parse_csv("1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Csv { line: 1, .. }));
    }
}
