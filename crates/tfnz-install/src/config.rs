use crate::{err, err_ctx, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Prefix of the environment variables the [`Config`] is loaded from
const ENV_PREFIX: &str = "TFNZ_INSTALL_";

/// Every field has a default, so the installer runs without any
/// environment variables set.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Directory where the primary executable and the alias symlinks are put
    #[serde(default = "default_bin_dir")]
    pub bin_dir: PathBuf,

    /// Section 1 manual pages directory
    #[serde(default = "default_man_dir")]
    pub man_dir: PathBuf,

    /// Host the executable and the manual pages are downloaded from
    #[serde(default = "default_base_url")]
    pub base_url: url::Url,

    #[serde(default = "default_image")]
    pub image: String,

    #[serde(default = "default_image_tag")]
    pub image_tag: String,

    /// Container management CLI used to pull the image
    #[serde(default = "default_container_cli")]
    pub container_cli: String,

    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    pub(crate) fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Result<Self> {
        let config: Self = envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .map_err(err_ctx!(ConfigError::Env { prefix: ENV_PREFIX }))?;

        // Zero would make every request time out immediately
        if config.http_timeout_secs == 0 {
            return Err(err!(ConfigError::InvalidValue {
                var: "TFNZ_INSTALL_HTTP_TIMEOUT_SECS",
                message: "must be a positive number of seconds",
            }));
        }

        Ok(config)
    }

    pub(crate) fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn default_bin_dir() -> PathBuf {
    "/usr/local/bin".into()
}

fn default_man_dir() -> PathBuf {
    "/usr/local/share/man/man1".into()
}

fn default_base_url() -> url::Url {
    url::Url::parse("https://20ft.nz/").unwrap_or_else(|err| {
        panic!("BUG: default base URL must be valid: {err}");
    })
}

fn default_image() -> String {
    "tfnz/tfnz".to_owned()
}

fn default_image_tag() -> String {
    "latest".to_owned()
}

fn default_container_cli() -> String {
    "docker".to_owned()
}

fn default_http_timeout_secs() -> u64 {
    60
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("Couldn't load config from the environment variables with prefix {prefix}")]
    Env {
        prefix: &'static str,
        source: envy::Error,
    },

    #[error("Invalid value of {var}: {message}")]
    InvalidValue {
        var: &'static str,
        message: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    fn vars<const N: usize>(vars: [(&str, &str); N]) -> Vec<(String, String)> {
        vars.into_iter()
            .map(|(key, value)| (key.to_owned(), value.to_owned()))
            .collect()
    }

    #[test]
    fn defaults() {
        let config = Config::from_vars(vars([("PATH", "/usr/bin")])).unwrap();

        let actual = format!(
            "{} {} {} {}:{} {} {:?}",
            config.bin_dir.display(),
            config.man_dir.display(),
            config.base_url,
            config.image,
            config.image_tag,
            config.container_cli,
            config.http_timeout(),
        );

        expect!["/usr/local/bin /usr/local/share/man/man1 https://20ft.nz/ tfnz/tfnz:latest docker 60s"]
            .assert_eq(&actual);
    }

    #[test]
    fn overrides() {
        let config = Config::from_vars(vars([
            ("TFNZ_INSTALL_BIN_DIR", "/opt/tfnz/bin"),
            ("TFNZ_INSTALL_BASE_URL", "http://localhost:8080/mirror/"),
            ("TFNZ_INSTALL_CONTAINER_CLI", "podman"),
            ("TFNZ_INSTALL_HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.bin_dir, PathBuf::from("/opt/tfnz/bin"));
        assert_eq!(config.man_dir, default_man_dir());
        assert_eq!(config.base_url.as_str(), "http://localhost:8080/mirror/");
        assert_eq!(config.container_cli, "podman");
        assert_eq!(config.http_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn invalid_values() {
        let err = Config::from_vars(vars([("TFNZ_INSTALL_HTTP_TIMEOUT_SECS", "soon")]))
            .unwrap_err();

        assert!(
            err.to_string()
                .starts_with("Couldn't load config from the environment variables"),
            "{err}"
        );
    }

    #[test]
    fn zero_http_timeout_is_rejected() {
        let err = Config::from_vars(vars([("TFNZ_INSTALL_HTTP_TIMEOUT_SECS", "0")])).unwrap_err();

        expect!["Invalid value of TFNZ_INSTALL_HTTP_TIMEOUT_SECS: must be a positive number of seconds"]
            .assert_eq(&err.to_string());
    }
}
