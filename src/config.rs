use chrono::NaiveDate;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rules_path: String,
    /// Fixed business date for requests without `asOf` (replays, tests).
    pub business_date: Option<NaiveDate>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let rules_path = env_map
            .get("RULES_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("RULES_PATH".to_string()))?;

        let business_date = env_map
            .get("BUSINESS_DATE")
            .map(|s| {
                NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
                    ConfigError::InvalidValue(
                        "BUSINESS_DATE".to_string(),
                        format!("must be YYYY-MM-DD, got {}", s),
                    )
                })
            })
            .transpose()?;

        Ok(Config {
            port,
            rules_path,
            business_date,
        })
    }

    /// The business date to evaluate against when a request does not name one.
    pub fn default_as_of(&self) -> NaiveDate {
        self.business_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_required_env() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("RULES_PATH".to_string(), "/tmp/rules.json".to_string());
        map
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(setup_required_env()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rules_path, "/tmp/rules.json");
        assert!(config.business_date.is_none());
    }

    #[test]
    fn test_missing_rules_path() {
        let mut env_map = setup_required_env();
        env_map.remove("RULES_PATH");
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "RULES_PATH"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_invalid_port() {
        let mut env_map = setup_required_env();
        env_map.insert("PORT".to_string(), "not_a_number".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_business_date_override() {
        let mut env_map = setup_required_env();
        env_map.insert("BUSINESS_DATE".to_string(), "2024-06-03".to_string());
        let config = Config::from_env_map(env_map).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(config.business_date, Some(expected));
        assert_eq!(config.default_as_of(), expected);
    }

    #[test]
    fn test_invalid_business_date() {
        let mut env_map = setup_required_env();
        env_map.insert("BUSINESS_DATE".to_string(), "03/06/2024".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "BUSINESS_DATE"),
            _ => panic!("Expected InvalidValue error"),
        }
    }
}
