//! Environment configuration
//!
//! Server, token and pricing settings read from environment variables (a
//! `.env` file is loaded by `main`). Unset values fall back to development
//! defaults.

use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

/// Environment configuration
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    /// Labor markup applied to work orders when the request does not set one
    pub default_labor_multiplier: Decimal,
    /// Parts markup applied to work orders when the request does not set one
    pub default_part_multiplier: Decimal,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("⚠️ {} has an invalid value '{}', using default", name, raw);
                default
            }
        },
        Err(_) => default,
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: var_or("ENVIRONMENT", "development"),
            port: parse_or("PORT", 3000),
            host: var_or("HOST", "0.0.0.0"),
            jwt_secret: var_or("JWT_SECRET", "change-me-in-production"),
            jwt_expiration: parse_or("JWT_EXPIRATION", 86_400),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            default_labor_multiplier: parse_or("DEFAULT_LABOR_MULTIPLIER", Decimal::new(175, 2)),
            default_part_multiplier: parse_or("DEFAULT_PART_MULTIPLIER", Decimal::new(14, 1)),
        }
    }
}

impl EnvironmentConfig {
    /// Development mode check
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Production mode check
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Address the server binds to
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Administrator account created at startup when its email is not taken yet
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl AdminBootstrap {
    /// `ADMIN_EMAIL` and `ADMIN_PASSWORD` must both be set
    pub fn from_env() -> Option<Self> {
        let email = env::var("ADMIN_EMAIL").ok().filter(|v| !v.trim().is_empty())?;
        let password = env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty())?;

        Some(Self {
            name: var_or("ADMIN_NAME", "Administrator"),
            email,
            password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_url() {
        let config = EnvironmentConfig {
            environment: "production".to_string(),
            port: 8080,
            host: "127.0.0.1".to_string(),
            jwt_secret: "secret".to_string(),
            jwt_expiration: 60,
            cors_origins: vec![],
            default_labor_multiplier: Decimal::new(175, 2),
            default_part_multiplier: Decimal::new(14, 1),
        };

        assert_eq!(config.server_url(), "127.0.0.1:8080");
        assert!(config.is_production());
        assert!(!config.is_development());
    }

    #[test]
    fn test_parse_or_falls_back() {
        let value: u16 = parse_or("MVMIS_TEST_UNSET_PORT_VARIABLE", 4000);
        assert_eq!(value, 4000);
    }
}
