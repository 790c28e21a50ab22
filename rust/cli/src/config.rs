//! Layered configuration: built-in defaults, then a TOML file named by
//! `ONECARD_CONFIG`, then `ONECARD_*` environment variables. Command-line
//! flags are applied last by the individual commands.

use onecard_engine::engine::{DEFAULT_SEED, DEFAULT_STARTING_CHIPS, MAX_STARTING_CHIPS};
use onecard_engine::rules::{DEFAULT_MAX_ROUNDS, TableRules, TiePolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

pub const ENV_CONFIG: &str = "ONECARD_CONFIG";
pub const ENV_SEED: &str = "ONECARD_SEED";
pub const ENV_STARTING_CHIPS: &str = "ONECARD_STARTING_CHIPS";
pub const ENV_MAX_ROUNDS: &str = "ONECARD_MAX_ROUNDS";
pub const ENV_DECISION_BUDGET_MS: &str = "ONECARD_DECISION_BUDGET_MS";
pub const ENV_TIE_POLICY: &str = "ONECARD_TIE_POLICY";

const DEFAULT_DECISION_BUDGET_MS: u64 = 250;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: u64,
    pub starting_chips: i64,
    pub max_rounds: u32,
    /// 0 disables the latency check
    pub decision_budget_ms: u64,
    pub tie_policy: TiePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            starting_chips: DEFAULT_STARTING_CHIPS,
            max_rounds: DEFAULT_MAX_ROUNDS,
            decision_budget_ms: DEFAULT_DECISION_BUDGET_MS,
            tie_policy: TiePolicy::Split,
        }
    }
}

impl Config {
    pub fn table_rules(&self) -> TableRules {
        TableRules {
            tie_policy: self.tie_policy,
            decision_budget: (self.decision_budget_ms > 0)
                .then(|| Duration::from_millis(self.decision_budget_ms)),
            max_rounds: self.max_rounds,
            ..TableRules::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub starting_chips: ValueSource,
    pub max_rounds: ValueSource,
    pub decision_budget_ms: ValueSource,
    pub tie_policy: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            starting_chips: ValueSource::Default,
            max_rounds: ValueSource::Default,
            decision_budget_ms: ValueSource::Default,
            tie_policy: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(ENV_CONFIG)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = v;
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.starting_chips {
            cfg.starting_chips = v;
            sources.starting_chips = ValueSource::File;
        }
        if let Some(v) = f.max_rounds {
            cfg.max_rounds = v;
            sources.max_rounds = ValueSource::File;
        }
        if let Some(v) = f.decision_budget_ms {
            cfg.decision_budget_ms = v;
            sources.decision_budget_ms = ValueSource::File;
        }
        if let Some(v) = f.tie_policy {
            cfg.tie_policy = v;
            sources.tie_policy = ValueSource::File;
        }
    }

    if let Some(v) = env_value(ENV_SEED) {
        cfg.seed = v
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid seed: {}", v)))?;
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value(ENV_STARTING_CHIPS) {
        cfg.starting_chips = v
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid starting chips: {}", v)))?;
        sources.starting_chips = ValueSource::Env;
    }
    if let Some(v) = env_value(ENV_MAX_ROUNDS) {
        cfg.max_rounds = v
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid max rounds: {}", v)))?;
        sources.max_rounds = ValueSource::Env;
    }
    if let Some(v) = env_value(ENV_DECISION_BUDGET_MS) {
        cfg.decision_budget_ms = v
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid decision budget: {}", v)))?;
        sources.decision_budget_ms = ValueSource::Env;
    }
    if let Some(v) = env_value(ENV_TIE_POLICY) {
        cfg.tie_policy = v.parse().map_err(ConfigError::Invalid)?;
        sources.tie_policy = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    starting_chips: Option<i64>,
    #[serde(default)]
    max_rounds: Option<u32>,
    #[serde(default)]
    decision_budget_ms: Option<u64>,
    #[serde(default)]
    tie_policy: Option<TiePolicy>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.starting_chips <= 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_chips must be >0".into(),
        ));
    }
    if cfg.starting_chips > MAX_STARTING_CHIPS {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: starting_chips must be at most {}",
            MAX_STARTING_CHIPS
        )));
    }
    if cfg.max_rounds == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: max_rounds must be >=1".into(),
        ));
    }
    Ok(())
}
