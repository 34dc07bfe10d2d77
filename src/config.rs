use std::fmt;
use std::fmt::Display;
use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Simulation parameters. Keys missing from the file keep their default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    pub carts_amount: usize,
    pub floors_amount: u32,
    pub min_steps_amount: usize,
    pub passengers_amount: usize,
    /// A new passenger calls a car every this many steps.
    pub passengers_frequency: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            carts_amount: 16,
            floors_amount: 50,
            min_steps_amount: 20,
            passengers_amount: 70,
            passengers_frequency: 2,
        }
    }
}

impl SimulationConfig {
    /// Reads `path`, falling back to the defaults when the file is missing
    /// or cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("config {} not readable ({e}), using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("config {} is malformed ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.carts_amount > 0, "cartsAmount must be at least 1");
        anyhow::ensure!(self.floors_amount > 0, "floorsAmount must be at least 1");
        anyhow::ensure!(
            self.passengers_frequency > 0,
            "passengersFrequency must be at least 1"
        );
        Ok(())
    }
}

impl Display for SimulationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current Parameters are:")?;
        writeln!(f, "Amount of carts: {}", self.carts_amount)?;
        writeln!(f, "Amount of floors: {}", self.floors_amount)?;
        writeln!(
            f,
            "Minimum amount of steps in simulation: {}",
            self.min_steps_amount
        )?;
        writeln!(f, "Amount of passengers: {}", self.passengers_amount)?;
        write!(
            f,
            "Passengers requests frequency: {0} (a new request every {0} simulation steps)",
            self.passengers_frequency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn full_file() {
        let file = config_file(
            r#"{
                "cartsAmount": 3,
                "floorsAmount": 12,
                "minStepsAmount": 5,
                "passengersAmount": 9,
                "passengersFrequency": 4
            }"#,
        );
        let config = SimulationConfig::load(file.path());
        assert_eq!(
            config,
            SimulationConfig {
                carts_amount: 3,
                floors_amount: 12,
                min_steps_amount: 5,
                passengers_amount: 9,
                passengers_frequency: 4,
            }
        );
    }

    #[test]
    fn absent_keys_keep_defaults() {
        let file = config_file(r#"{ "floorsAmount": 8 }"#);
        let config = SimulationConfig::load(file.path());
        assert_eq!(config.floors_amount, 8);
        assert_eq!(config.carts_amount, 16);
        assert_eq!(config.passengers_frequency, 2);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SimulationConfig::load(dir.path().join("nope.json"));
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn malformed_file_uses_defaults() {
        let file = config_file(r#"{ "cartsAmount": "many" }"#);
        assert_eq!(SimulationConfig::load(file.path()), SimulationConfig::default());
    }

    #[test]
    fn zero_frequency_is_invalid() {
        let config = SimulationConfig {
            passengers_frequency: 0,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(SimulationConfig::default().validate().is_ok());
    }
}
