//! Server settings loaded via OrthoConfig.
//!
//! Values come from `BLOG_*` environment variables (for example
//! `BLOG_DATABASE_URL`), configuration files, or command-line flags.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Address the server binds to when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Lifetime of a cached global feed page, in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 20;

/// Runtime configuration for the blog server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOG")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Without it the server keeps content in
    /// memory.
    pub database_url: Option<String>,
    /// Redis connection string for the page cache.
    pub redis_url: Option<String>,
    /// Page cache lifetime; `0` disables caching.
    #[ortho_config(default = 20)]
    pub cache_ttl_secs: u64,
    /// Apply pending migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

impl AppSettings {
    /// Parse the configured bind address, falling back to [`DEFAULT_BIND_ADDR`].
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Cache lifetime, or `None` when caching is disabled.
    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_secs > 0).then(|| Duration::from_secs(self.cache_ttl_secs))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "BLOG_BIND_ADDR",
        "BLOG_DATABASE_URL",
        "BLOG_REDIS_URL",
        "BLOG_CACHE_TTL_SECS",
        "BLOG_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("blog")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("valid default")
        );
        assert!(settings.database_url.is_none());
        assert!(settings.redis_url.is_none());
        assert_eq!(settings.cache_ttl_secs, DEFAULT_CACHE_TTL_SECS);
        assert_eq!(settings.cache_ttl(), Some(Duration::from_secs(20)));
        assert!(!settings.run_migrations);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("BLOG_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "BLOG_DATABASE_URL",
                Some("postgres://blog@localhost/blog".to_owned()),
            ),
            ("BLOG_REDIS_URL", Some("redis://localhost:6379".to_owned())),
            ("BLOG_CACHE_TTL_SECS", Some("0".to_owned())),
            ("BLOG_RUN_MIGRATIONS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("valid address")
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://blog@localhost/blog")
        );
        assert_eq!(settings.redis_url.as_deref(), Some("redis://localhost:6379"));
        assert_eq!(settings.cache_ttl(), None);
        assert!(settings.run_migrations);
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let _guard = lock_env([("BLOG_BIND_ADDR", Some("not-an-address".to_owned()))]);

        assert!(load_from_empty_args().bind_addr().is_err());
    }
}
