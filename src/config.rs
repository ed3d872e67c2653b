use eyre::{Result, WrapErr};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Typed view of `teamform.toml`. Every section and key is optional and falls
/// back to the defaults below; command-line flags override the file after
/// loading.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub solver: SolverConfig,
    pub balance: BalanceConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub team_size: usize,
    pub max_rounds: usize,
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> SolverConfig {
        SolverConfig {
            team_size: 5,
            max_rounds: 100,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    pub cgpa_tolerance: f64,
}

impl Default for BalanceConfig {
    fn default() -> BalanceConfig {
        BalanceConfig {
            cgpa_tolerance: 0.5,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Column order of the records file, naming all six student fields.
    /// Input variants disagree on whether name or school comes third.
    pub columns: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> InputConfig {
        InputConfig {
            columns: ["tutorial_group", "student_id", "school", "name", "gender", "cgpa"]
                .map(String::from)
                .to_vec(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub numbering: Numbering,
}

/// How `Team N` labels are numbered in the output file.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum Numbering {
    /// Numbering restarts at 1 inside every tutorial group.
    #[default]
    PerGroup,
    /// Numbering keeps counting across all tutorial groups.
    Global,
}

impl Config {
    /// Read the configuration file. A missing file is only an error when its
    /// path was given explicitly; the default path falls back to the built-in
    /// defaults.
    pub fn load(path: &Path, required: bool) -> Result<Config> {
        if !required && !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Config::default());
        }
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("cannot load configuration file {}", path.display()))?;
        toml::from_str(&text)
            .wrap_err_with(|| format!("cannot parse configuration file {}", path.display()))
    }
}
