use crate::error::{BadEnvVarSnafu, ParseNumberSnafu, RosterResult};
use dotenvy::var;
use secrecy::{ExposeSecret, SecretString};
use snafu::ResultExt;
use std::sync::Arc;

const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 15;
const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    db_config: Arc<DbConfig>,
    server_config: Arc<ServerConfig>,
}

impl RuntimeConfiguration {
    pub fn new() -> RosterResult<Self> {
        Ok(Self {
            db_config: Arc::new(DbConfig::new()?),
            server_config: Arc::new(ServerConfig::new()?),
        })
    }

    pub fn db_config(&self) -> Arc<DbConfig> {
        self.db_config.clone()
    }

    pub fn server_config(&self) -> Arc<ServerConfig> {
        self.server_config.clone()
    }
}

#[derive(Debug)]
pub struct DbConfig {
    user: String,
    password: SecretString,
    path: String,
    port: u16,
    database: String,
}

impl DbConfig {
    pub fn new() -> RosterResult<Self> {
        let get_env_var = |name| var(name).context(BadEnvVarSnafu { name });

        Ok(Self {
            user: get_env_var("DB_USER")?,
            password: SecretString::from(get_env_var("DB_PASSWORD")?),
            path: get_env_var("DB_PATH")?,
            port: get_env_var("DB_PORT")?
                .parse()
                .context(ParseNumberSnafu { name: "DB_PORT" })?,
            database: get_env_var("DB_NAME")?,
        })
    }

    pub fn get_db_path(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            self.password.expose_secret(),
            self.path,
            self.port,
            self.database
        )
    }
}

#[derive(Debug)]
pub struct ServerConfig {
    pub server_ip: String,
    pub max_connections: u32,
    pub body_limit: usize,
}

impl ServerConfig {
    pub fn new() -> RosterResult<Self> {
        Ok(Self {
            server_ip: var("ROSTER_SERVER_IP").unwrap_or_else(|_| DEFAULT_SERVER_IP.to_string()),
            max_connections: optional_number("ROSTER_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            body_limit: optional_number("ROSTER_BODY_LIMIT", DEFAULT_BODY_LIMIT)?,
        })
    }
}

fn optional_number<T>(name: &'static str, default: T) -> RosterResult<T>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    match var(name) {
        Ok(raw) => raw.trim().parse().context(ParseNumberSnafu { name }),
        Err(_) => Ok(default),
    }
}
