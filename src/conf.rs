// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Reddit application configuration.
//!
//! Before a user can log in, Reddit needs to know which registered
//! application is asking. That identity lives in a `praw.ini` file,
//! the same file used by PRAW, the Python Reddit API Wrapper, so an
//! existing setup can be reused as is:
//!
//! ```ini
//! [DEFAULT]
//! user_agent = script:myredditbackup:v0.1.0 (by /u/reddit_user)
//!
//! [bot1]
//! client_id = SI8pN3DSbt0zor
//! client_secret = xaxkj7HNh8kwg8e5t4m6KvSrbTI
//! ```
//!
//! Values are read from the selected section ("site"), falling back to
//! `[DEFAULT]` and then to any keys that appear before the first section.
//! As with PRAW, `praw_client_id`, `praw_client_secret`, and
//! `praw_user_agent` in the environment take precedence over the file.

use crate::http::HTTPService;
use crate::reddit::RedditService;
use config::{Config, File, FileFormat, Value, ValueKind};
use log::debug;
use secrecy::SecretString;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::{env, fs, io};
use thiserror::Error;

/// The section used when no site is selected.
pub const DEFAULT_SITE: &str = "DEFAULT";

/// Where users are sent to request access tokens.
pub const DEFAULT_REDDIT_URL: &str = "https://www.reddit.com";

/// Where authenticated API requests are sent.
pub const DEFAULT_OAUTH_URL: &str = "https://oauth.reddit.com";

/// Identity of a registered Reddit application.
pub struct ClientConfig {
    client_id: String,
    client_secret: SecretString,
    user_agent: String,
    reddit_url: String,
    oauth_url: String,
}

impl ClientConfig {
    /// Creates a configuration for the application identified by
    /// `client_id` and `client_secret`, using the default user agent and
    /// Reddit's public endpoints.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            user_agent: RedditService::user_agent(),
            reddit_url: DEFAULT_REDDIT_URL.to_string(),
            oauth_url: DEFAULT_OAUTH_URL.to_string(),
        }
    }

    /// The application's client ID.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The application's client secret.
    pub fn client_secret(&self) -> &SecretString {
        &self.client_secret
    }

    /// User agent sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Base URL for requesting access tokens.
    pub fn reddit_url(&self) -> &str {
        &self.reddit_url
    }

    /// Base URL for authenticated API requests.
    pub fn oauth_url(&self) -> &str {
        &self.oauth_url
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret)
            .field("user_agent", &self.user_agent)
            .field("reddit_url", &self.reddit_url)
            .field("oauth_url", &self.oauth_url)
            .finish()
    }
}

/// Loads the configuration for `site` from the praw.ini file at `path`.
///
/// The file is only read; nothing is written and the working directory
/// is left alone.
///
/// Returns [`Error::NotFound`] without touching the network if `path`
/// is not a file.
pub fn load(path: impl AsRef<Path>, site: &str) -> Result<ClientConfig, Error> {
    let path = path.as_ref();
    let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    if !path.is_file() {
        return Err(Error::NotFound(path));
    }
    debug!("Using praw.ini file: {}", path.display());

    let text = fs::read_to_string(&path).map_err(|source| Error::Unreadable {
        path: path.clone(),
        source,
    })?;
    let settings = Settings::parse(&text)?;
    settings.client_config(site)
}

/// Key/value pairs from a praw.ini file, with sections and keys
/// normalized to lowercase.
#[derive(Debug, Default)]
struct Settings {
    global: HashMap<String, String>,
    sections: HashMap<String, HashMap<String, String>>,
}

impl Settings {
    fn parse(text: &str) -> Result<Self, Error> {
        let parsed = Config::builder()
            .add_source(File::from_str(text, FileFormat::Ini))
            .build()?;
        let root: HashMap<String, Value> = parsed.try_deserialize()?;

        let mut settings = Settings::default();
        for (key, value) in root {
            let key = key.to_lowercase();
            match value.kind {
                ValueKind::Table(table) => {
                    let section = settings.sections.entry(key).or_default();
                    for (name, value) in table {
                        section.insert(name.to_lowercase(), value.into_string()?);
                    }
                }
                _ => {
                    settings.global.insert(key, value.into_string()?);
                }
            }
        }
        Ok(settings)
    }

    fn client_config(&self, site: &str) -> Result<ClientConfig, Error> {
        let site_key = site.to_lowercase();
        let default_key = DEFAULT_SITE.to_lowercase();
        if site_key != default_key && !self.sections.contains_key(&site_key) {
            return Err(Error::UnknownSite(site.to_string()));
        }

        let lookup = |key: &str| -> Option<String> {
            env::var(format!("praw_{key}"))
                .ok()
                .or_else(|| self.value_in(&site_key, key))
                .or_else(|| self.value_in(&default_key, key))
                .or_else(|| self.global.get(key).cloned())
        };
        let require = |key: &'static str| lookup(key).ok_or(Error::MissingKey(key));

        Ok(ClientConfig {
            client_id: require("client_id")?,
            client_secret: SecretString::from(require("client_secret")?),
            user_agent: lookup("user_agent").unwrap_or_else(RedditService::user_agent),
            reddit_url: lookup("reddit_url").unwrap_or_else(|| DEFAULT_REDDIT_URL.to_string()),
            oauth_url: lookup("oauth_url").unwrap_or_else(|| DEFAULT_OAUTH_URL.to_string()),
        })
    }

    fn value_in(&self, section: &str, key: &str) -> Option<String> {
        self.sections.get(section)?.get(key).cloned()
    }
}

/// An error loading a praw.ini file.
#[derive(Debug, Error)]
pub enum Error {
    /// The given path does not point to a file.
    #[error("Given path is not a file: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("Could not read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid INI.
    #[error("Invalid praw.ini file: {0}")]
    Parse(#[from] config::ConfigError),

    /// The selected site has no section in the file.
    #[error("No [{0}] section in praw.ini")]
    UnknownSite(String),

    /// A required key was not found in the selected site or its defaults.
    #[error("Missing {0} in praw.ini")]
    MissingKey(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use temp_env::{with_var, with_vars_unset};

    const PRAW_ENV: [&str; 3] = ["praw_client_id", "praw_client_secret", "praw_user_agent"];

    fn praw_ini(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn load_unset(path: &Path, site: &str) -> Result<ClientConfig, Error> {
        with_vars_unset(PRAW_ENV, || load(path, site))
    }

    #[test]
    fn it_loads_client_information_from_the_default_section() {
        let file = praw_ini(indoc! {"
            [DEFAULT]
            client_id = SI8pN3DSbt0zor
            client_secret = xaxkj7HNh8kwg8e5t4m6KvSrbTI
            user_agent = script:test:v1.0 (by /u/testuserpleaseignore)
        "});
        let config = load_unset(file.path(), DEFAULT_SITE).unwrap();
        assert_eq!(config.client_id(), "SI8pN3DSbt0zor");
        assert_eq!(
            config.client_secret().expose_secret(),
            "xaxkj7HNh8kwg8e5t4m6KvSrbTI"
        );
        assert_eq!(
            config.user_agent(),
            "script:test:v1.0 (by /u/testuserpleaseignore)"
        );
    }

    #[test]
    fn it_uses_reddit_endpoints_by_default() {
        let file = praw_ini(indoc! {"
            [DEFAULT]
            client_id = id
            client_secret = secret
        "});
        let config = load_unset(file.path(), DEFAULT_SITE).unwrap();
        assert_eq!(config.reddit_url(), DEFAULT_REDDIT_URL);
        assert_eq!(config.oauth_url(), DEFAULT_OAUTH_URL);
    }

    #[test]
    fn it_uses_the_package_user_agent_if_none_is_configured() {
        let file = praw_ini(indoc! {"
            [DEFAULT]
            client_id = id
            client_secret = secret
        "});
        let config = load_unset(file.path(), DEFAULT_SITE).unwrap();
        assert_eq!(config.user_agent(), RedditService::user_agent());
    }

    #[test]
    fn it_prefers_the_selected_site_over_defaults() {
        let file = praw_ini(indoc! {"
            [DEFAULT]
            client_id = default_id
            client_secret = default_secret
            user_agent = default agent

            [bot1]
            client_id = bot1_id
            client_secret = bot1_secret
        "});
        let config = load_unset(file.path(), "bot1").unwrap();
        assert_eq!(config.client_id(), "bot1_id");
        assert_eq!(config.client_secret().expose_secret(), "bot1_secret");
        assert_eq!(config.user_agent(), "default agent");
    }

    #[test]
    fn it_matches_sites_and_keys_regardless_of_case() {
        let file = praw_ini(indoc! {"
            [Bot1]
            Client_ID = bot1_id
            CLIENT_SECRET = bot1_secret
        "});
        let config = load_unset(file.path(), "BOT1").unwrap();
        assert_eq!(config.client_id(), "bot1_id");
        assert_eq!(config.client_secret().expose_secret(), "bot1_secret");
    }

    #[test]
    fn it_prefers_the_environment_over_the_file() {
        let file = praw_ini(indoc! {"
            [DEFAULT]
            client_id = file_id
            client_secret = file_secret
        "});
        let config = with_vars_unset(["praw_client_secret", "praw_user_agent"], || {
            with_var("praw_client_id", Some("env_id"), || {
                load(file.path(), DEFAULT_SITE)
            })
        })
        .unwrap();
        assert_eq!(config.client_id(), "env_id");
        assert_eq!(config.client_secret().expose_secret(), "file_secret");
    }

    #[test]
    fn it_returns_an_error_if_the_file_does_not_exist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("praw.ini");
        let err = load_unset(&path, DEFAULT_SITE).unwrap_err();
        assert!(matches!(err, Error::NotFound(p) if p == path));
    }

    #[test]
    fn it_returns_an_error_if_the_path_is_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_unset(dir.path(), DEFAULT_SITE).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn it_returns_an_error_if_the_client_id_is_missing() {
        let file = praw_ini(indoc! {"
            [DEFAULT]
            client_secret = secret
        "});
        let err = load_unset(file.path(), DEFAULT_SITE).unwrap_err();
        assert!(matches!(err, Error::MissingKey("client_id")));
    }

    #[test]
    fn it_returns_an_error_if_the_client_secret_is_missing() {
        let file = praw_ini(indoc! {"
            [DEFAULT]
            client_id = id
        "});
        let err = load_unset(file.path(), DEFAULT_SITE).unwrap_err();
        assert!(matches!(err, Error::MissingKey("client_secret")));
    }

    #[test]
    fn it_returns_an_error_if_the_site_does_not_exist() {
        let file = praw_ini(indoc! {"
            [DEFAULT]
            client_id = id
            client_secret = secret
        "});
        let err = load_unset(file.path(), "bot2").unwrap_err();
        assert!(matches!(err, Error::UnknownSite(site) if site == "bot2"));
    }

    #[test]
    fn it_returns_an_error_if_the_file_is_malformed() {
        let file = praw_ini(indoc! {"
            [DEFAULT
            client_id = id
        "});
        let err = load_unset(file.path(), DEFAULT_SITE).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn it_does_not_reveal_the_client_secret_when_debugging() {
        let config = ClientConfig::new("id", "hunter2hunter2");
        let debugged = format!("{config:?}");
        assert!(debugged.contains("id"));
        assert!(!debugged.contains("hunter2hunter2"));
    }
}
