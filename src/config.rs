//! Engine configuration: the courts matches are scheduled onto.

use crate::models::Court;

/// Environment variable holding a comma-separated court list, e.g. `1,2,3`.
pub const COURTS_ENV: &str = "DRAW_COURTS";

/// Errors in the engine configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// Final and bronze need two distinct courts.
    NotEnoughCourts { configured: usize },
    DuplicateCourt(Court),
    /// A court in the environment list is not a positive integer.
    InvalidCourt(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotEnoughCourts { configured } => {
                write!(f, "At least 2 courts are required (configured {})", configured)
            }
            ConfigError::DuplicateCourt(court) => write!(f, "Court {} is listed twice", court),
            ConfigError::InvalidCourt(raw) => write!(f, "Invalid court {:?}", raw),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings for building draws.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    courts: Vec<Court>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            courts: vec![1, 2, 3],
        }
    }
}

impl EngineConfig {
    /// Courts in round-robin order. The first one hosts the final.
    pub fn new(courts: Vec<Court>) -> Result<Self, ConfigError> {
        if courts.len() < 2 {
            return Err(ConfigError::NotEnoughCourts {
                configured: courts.len(),
            });
        }
        for (i, court) in courts.iter().enumerate() {
            if courts[..i].contains(court) {
                return Err(ConfigError::DuplicateCourt(*court));
            }
        }
        Ok(Self { courts })
    }

    /// Read `DRAW_COURTS`; the default court list when unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_courts_var(std::env::var(COURTS_ENV).ok().as_deref())
    }

    fn from_courts_var(raw: Option<&str>) -> Result<Self, ConfigError> {
        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::new(parse_courts(raw)?),
            _ => Ok(Self::default()),
        }
    }

    pub fn courts(&self) -> &[Court] {
        &self.courts
    }

    pub fn final_court(&self) -> Court {
        self.courts[0]
    }

    /// First court other than the final's, so both medal matches can run in parallel.
    pub fn bronze_court(&self) -> Court {
        self.courts[1]
    }
}

fn parse_courts(raw: &str) -> Result<Vec<Court>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .map(|part| match part.parse::<Court>() {
            Ok(court) if court > 0 => Ok(court),
            _ => Err(ConfigError::InvalidCourt(part.to_string())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_courts_are_one_to_three() {
        let config = EngineConfig::default();
        assert_eq!(config.courts(), &[1u32, 2, 3][..]);
        assert_eq!(config.final_court(), 1);
        assert_eq!(config.bronze_court(), 2);
    }

    #[test]
    fn single_court_is_rejected() {
        assert_eq!(
            EngineConfig::new(vec![1]),
            Err(ConfigError::NotEnoughCourts { configured: 1 })
        );
    }

    #[test]
    fn duplicate_court_is_rejected() {
        assert_eq!(EngineConfig::new(vec![1, 2, 1]), Err(ConfigError::DuplicateCourt(1)));
    }

    #[test]
    fn unset_or_blank_courts_fall_back_to_default() {
        assert_eq!(EngineConfig::from_courts_var(None), Ok(EngineConfig::default()));
        assert_eq!(EngineConfig::from_courts_var(Some("")), Ok(EngineConfig::default()));
        assert_eq!(EngineConfig::from_courts_var(Some("  ")), Ok(EngineConfig::default()));
    }

    #[test]
    fn courts_var_is_parsed_and_validated() {
        assert_eq!(
            EngineConfig::from_courts_var(Some("4,5")).map(|c| c.courts().to_vec()),
            Ok(vec![4, 5])
        );
        assert_eq!(
            EngineConfig::from_courts_var(Some("4")),
            Err(ConfigError::NotEnoughCourts { configured: 1 })
        );
    }

    #[test]
    fn from_env_reads_draw_courts() {
        std::env::set_var(COURTS_ENV, "7,8,9");
        let configured = EngineConfig::from_env();
        std::env::remove_var(COURTS_ENV);
        assert_eq!(configured.map(|c| c.courts().to_vec()), Ok(vec![7, 8, 9]));
        assert_eq!(EngineConfig::from_env(), Ok(EngineConfig::default()));
    }

    #[test]
    fn parses_court_list() {
        assert_eq!(parse_courts(" 4, 5 ,6"), Ok(vec![4, 5, 6]));
        assert_eq!(parse_courts("1,x"), Err(ConfigError::InvalidCourt("x".to_string())));
        assert_eq!(parse_courts("0,1"), Err(ConfigError::InvalidCourt("0".to_string())));
    }
}
