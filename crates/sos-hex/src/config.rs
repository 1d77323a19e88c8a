use std::env;
use std::path::PathBuf;

/// Service name; also determines the backing database file name.
pub const SERVICE_NAME: &str = "sos";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: String,
    pub db_location: PathBuf,
}

impl Config {
    /// Reads process configuration once at startup. The VCAP_* variables keep
    /// compatibility with platform-injected host/port settings.
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("VCAP_APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = env::var("VCAP_APP_PORT").unwrap_or_else(|_| "80".into());
        let db_location: PathBuf = env::var("SQLITE_DB_LOCATION")
            .unwrap_or_else(|_| "/var/lib/sqlite".into())
            .into();
        Ok(Self {
            host,
            port,
            db_location,
        })
    }

    /// Connection URL for the backing store: `<db_location>/<service>.db`.
    pub fn database_url(&self) -> String {
        let file = self.db_location.join(format!("{SERVICE_NAME}.db"));
        format!("sqlite://{}", file.display())
    }
}
