use error_stack::{Report, Result};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};

use super::ParseError;
use crate::types::validation::is_valid_email;
use crate::util::figment::FigmentErrorAttachable;

#[derive(Debug, Deserialize)]
pub struct Server {
    /// Address the HTTP server binds to.
    #[serde(default = "Server::default_ip")]
    pub ip: IpAddr,
    #[serde(default = "Server::default_port")]
    pub port: u16,
    /// Amount of actix/tokio workers to spawn.
    #[serde(default = "Server::default_workers")]
    pub workers: usize,
    pub db: super::Database,
    pub auth: super::Auth,
}

impl Server {
    pub fn load() -> Result<Self, ParseError> {
        let config = Self::figment()
            .extract::<Self>()
            .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

        config.validate()?;
        Ok(config)
    }

    /// Checks constraints that serde alone cannot express. Every
    /// offending key is attached to the report so a misconfigured
    /// deployment fails with the full list at once.
    fn validate(&self) -> Result<(), ParseError> {
        let mut problems = Vec::new();

        let secret_len = self.auth.jwt_secret.as_str().len();
        if !(super::Auth::JWT_SECRET_MIN..=super::Auth::JWT_SECRET_MAX).contains(&secret_len) {
            problems.push(format!(
                "auth.jwt_secret must be {} to {} characters long",
                super::Auth::JWT_SECRET_MIN,
                super::Auth::JWT_SECRET_MAX
            ));
        }

        if url::Url::parse(self.db.primary.url.as_str()).is_err() {
            problems.push("db.primary.url is not a valid connection URL".into());
        }

        if let Some(replica) = self.db.replica.as_ref() {
            if url::Url::parse(replica.url.as_str()).is_err() {
                problems.push("db.replica.url is not a valid connection URL".into());
            }
        }

        if let Some(email) = self.auth.admin_email.as_deref() {
            if !is_valid_email(email) {
                problems.push("auth.admin_email is not a valid e-mail address".into());
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            let mut report = Report::new(ParseError);
            for problem in problems {
                report = report.attach_printable(problem);
            }
            Err(report)
        }
    }
}

impl Server {
    const DEFAULT_CONFIG_FILE: &'static str = "quill.yml";

    const fn default_ip() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    const fn default_port() -> u16 {
        3000
    }

    fn default_workers() -> usize {
        std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1)
    }

    /// Creates a default [`figment::Figment`] object to load server
    /// configuration. Separate from [`Server::load`] for testing.
    pub(crate) fn figment() -> figment::Figment {
        use figment::{
            providers::{Env, Format, Yaml},
            Figment,
        };

        Figment::new()
            .merge(Yaml::file(Self::DEFAULT_CONFIG_FILE))
            // The env provider splits on every underscore, so keys that
            // legitimately contain one have to be mapped by hand.
            .merge(Env::prefixed("QUILL_").map(|v| match v.as_str() {
                "DB_PRIMARY_MIN_IDLE" => "db.primary.min_idle".into(),
                "DB_PRIMARY_POOL_SIZE" => "db.primary.pool_size".into(),

                "DB_REPLICA_MIN_IDLE" => "db.replica.min_idle".into(),
                "DB_REPLICA_POOL_SIZE" => "db.replica.pool_size".into(),

                "DB_ENFORCE_TLS" => "db.enforce_tls".into(),
                "DB_TIMEOUT_SECS" => "db.timeout_secs".into(),

                "AUTH_JWT_SECRET" => "auth.jwt_secret".into(),
                "AUTH_ADMIN_EMAIL" => "auth.admin_email".into(),
                "AUTH_TOKEN_DAYS" => "auth.token_days".into(),

                _ => v.as_str().replace('_', ".").into(),
            }))
            // Environment variable aliases
            .merge(Env::raw().map(|v| match v.as_str() {
                "DATABASE_URL" => "db.primary.url".into(),
                "JWT_SECRET" => "auth.jwt_secret".into(),
                _ => v.into(),
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::num::{NonZeroU32, NonZeroU64};

    #[test]
    fn env_aliases() {
        Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "postgres://localhost/quill");
            jail.set_env("JWT_SECRET", "super-secret-signing-key");

            jail.set_env("QUILL_DB_PRIMARY_MIN_IDLE", "100");
            jail.set_env("QUILL_DB_PRIMARY_POOL_SIZE", "100");

            jail.set_env("QUILL_DB_REPLICA_URL", "postgres://replica/quill");
            jail.set_env("QUILL_DB_REPLICA_MIN_IDLE", "589");
            jail.set_env("QUILL_DB_REPLICA_POOL_SIZE", "589");

            jail.set_env("QUILL_DB_ENFORCE_TLS", "false");
            jail.set_env("QUILL_DB_TIMEOUT_SECS", "3030");

            jail.set_env("QUILL_AUTH_ADMIN_EMAIL", "basma@example.com");
            jail.set_env("QUILL_AUTH_TOKEN_DAYS", "7");

            let config: Server = Server::figment().extract()?;
            assert_eq!(config.db.primary.url.as_str(), "postgres://localhost/quill");
            assert_eq!(
                config.db.primary.min_idle.unwrap(),
                NonZeroU32::new(100).unwrap()
            );
            assert_eq!(config.db.primary.pool_size, NonZeroU32::new(100).unwrap());
            assert_eq!(
                config.db.replica.as_ref().unwrap().min_idle.unwrap(),
                NonZeroU32::new(589).unwrap()
            );
            assert_eq!(
                config.db.replica.as_ref().unwrap().pool_size,
                NonZeroU32::new(589).unwrap()
            );

            assert!(!config.db.enforce_tls);
            assert_eq!(config.db.timeout_secs, NonZeroU64::new(3030).unwrap());

            assert_eq!(config.auth.jwt_secret.as_str(), "super-secret-signing-key");
            assert_eq!(config.auth.admin_email.as_deref(), Some("basma@example.com"));
            assert_eq!(config.auth.token_days, NonZeroU64::new(7).unwrap());
            Ok(())
        });
    }

    #[test]
    fn defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "postgres://localhost/quill");
            jail.set_env("JWT_SECRET", "super-secret-signing-key");

            let config: Server = Server::figment().extract()?;
            assert_eq!(config.ip, Server::default_ip());
            assert_eq!(config.port, 3000);
            assert_eq!(config.auth.token_days.get(), 30);
            assert!(config.auth.admin_email.is_none());
            Ok(())
        });
    }

    #[test]
    fn validate_rejects_short_secrets() {
        Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "postgres://localhost/quill");
            jail.set_env("JWT_SECRET", "short");

            let config: Server = Server::figment().extract()?;
            assert!(config.validate().is_err());
            Ok(())
        });
    }

    #[test]
    fn admin_email_check() {
        Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "postgres://localhost/quill");
            jail.set_env("JWT_SECRET", "super-secret-signing-key");
            jail.set_env("QUILL_AUTH_ADMIN_EMAIL", "basma@example.com");

            let config: Server = Server::figment().extract()?;
            assert!(config.auth.is_admin_email("basma@example.com"));
            assert!(config.auth.is_admin_email("Basma@Example.com"));
            assert!(!config.auth.is_admin_email("mona@example.com"));
            Ok(())
        });
    }
}
