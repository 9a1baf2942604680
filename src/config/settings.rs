use std::env;

/// Runtime settings loaded from the environment
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub password_pepper: String,
    pub bootstrap_admin: Option<(String, String)>,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

impl Settings {
    /// Load settings from environment variables
    ///
    /// `JWT_SECRET` and `PASSWORD_PEPPER` are required; everything else has
    /// a development default.
    pub fn from_env() -> Result<Self, SettingsError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://iotwatch.db?mode=rwc".to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| SettingsError::MissingVar("JWT_SECRET"))?;
        let password_pepper =
            env::var("PASSWORD_PEPPER").map_err(|_| SettingsError::MissingVar("PASSWORD_PEPPER"))?;

        // Optional one-shot admin seeding for fresh installs
        let bootstrap_admin = match (
            env::var("BOOTSTRAP_ADMIN_USERNAME"),
            env::var("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Ok(u), Ok(p)) => Some((u, p)),
            _ => None,
        };

        Ok(Self {
            database_url,
            bind_addr,
            jwt_secret,
            password_pepper,
            bootstrap_admin,
        })
    }
}
