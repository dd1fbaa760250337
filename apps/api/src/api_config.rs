use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use fleetdesk_core::AppError;
use tracing_subscriber::EnvFilter;

/// What the binary was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCommand {
    /// Run the HTTP server.
    Serve,
    /// Apply migrations and exit.
    Migrate,
    /// Create or reset the super admin and exit.
    BootstrapSuperAdmin,
}

impl ApiCommand {
    fn parse(argument: Option<&str>) -> Result<Self, AppError> {
        match argument {
            None | Some("serve") => Ok(Self::Serve),
            Some("migrate") => Ok(Self::Migrate),
            Some("bootstrap-super-admin") => Ok(Self::BootstrapSuperAdmin),
            Some(other) => Err(AppError::Validation(format!(
                "unknown command '{other}', expected 'serve', 'migrate' or 'bootstrap-super-admin'"
            ))),
        }
    }
}

/// Super admin credentials read by `bootstrap-super-admin`.
#[derive(Debug, Clone)]
pub struct SuperAdminBootstrapConfig {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl SuperAdminBootstrapConfig {
    pub fn load() -> Result<Self, AppError> {
        Ok(Self {
            email: required_non_empty_env("SUPER_ADMIN_EMAIL")?,
            password: required_non_empty_env("SUPER_ADMIN_PASSWORD")?,
            name: env::var("SUPER_ADMIN_NAME").unwrap_or_else(|_| "Super Admin".to_owned()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub command: ApiCommand,
    pub database_url: String,
    pub database_max_connections: u32,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub access_token_ttl: chrono::Duration,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let command = ApiCommand::parse(env::args().nth(1).as_deref())?;

        let database_url = required_env("DATABASE_URL")?;
        let database_max_connections = parsed_env("DATABASE_MAX_CONNECTIONS", 10_u32)?;
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = parsed_env("API_PORT", 3001_u16)?;

        let ttl_hours = parsed_env("ACCESS_TOKEN_TTL_HOURS", 24 * 30_i64)?;
        if ttl_hours <= 0 {
            return Err(AppError::Validation(
                "ACCESS_TOKEN_TTL_HOURS must be positive".to_owned(),
            ));
        }

        Ok(Self {
            command,
            database_url,
            database_max_connections,
            frontend_url,
            api_host,
            api_port,
            access_token_ttl: chrono::Duration::hours(ttl_hours),
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn parsed_env<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}"))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use fleetdesk_core::AppError;

    use super::ApiCommand;

    #[test]
    fn commands_parse_from_the_first_argument() {
        assert_eq!(ApiCommand::parse(None).ok(), Some(ApiCommand::Serve));
        assert_eq!(ApiCommand::parse(Some("migrate")).ok(), Some(ApiCommand::Migrate));
        assert_eq!(
            ApiCommand::parse(Some("bootstrap-super-admin")).ok(),
            Some(ApiCommand::BootstrapSuperAdmin)
        );
        assert!(matches!(
            ApiCommand::parse(Some("seed")),
            Err(AppError::Validation(_))
        ));
    }
}
