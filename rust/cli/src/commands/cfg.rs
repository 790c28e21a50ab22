//! Configuration command handler.
//!
//! Prints the resolved configuration with the source of every value
//! (default, file or env).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "seed": {
//!     "value": 2711790500,
//!     "source": "default"
//!   },
//!   "starting_chips": {
//!     "value": 100,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(e.to_string()));
        }
    };
    render(&resolved, out)
}

fn render(resolved: &config::ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "starting_chips": {
            "value": config.starting_chips,
            "source": sources.starting_chips,
        },
        "max_rounds": {
            "value": config.max_rounds,
            "source": sources.max_rounds,
        },
        "decision_budget_ms": {
            "value": config.decision_budget_ms,
            "source": sources.decision_budget_ms,
        },
        "tie_policy": {
            "value": config.tie_policy,
            "source": sources.tie_policy,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ConfigResolved, ConfigSources, ValueSource};

    #[test]
    fn renders_values_with_sources() {
        let resolved = ConfigResolved {
            config: Config {
                starting_chips: 40,
                ..Config::default()
            },
            sources: ConfigSources {
                starting_chips: ValueSource::Env,
                ..ConfigSources::default()
            },
        };
        let mut out = Vec::new();
        render(&resolved, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["starting_chips"]["value"], 40);
        assert_eq!(json["starting_chips"]["source"], "env");
        assert_eq!(json["seed"]["value"], 0xA1A2_A3A4u64);
        assert_eq!(json["seed"]["source"], "default");
        assert_eq!(json["tie_policy"]["value"], "split");
        assert_eq!(json["max_rounds"]["value"], 10_000);
    }
}
