//! Logging in to Reddit.
//!
//! Reddit "script" applications log in with the password grant: the
//! application's client ID and secret are sent as HTTP basic auth, and
//! the user's username and password as form data. Reddit answers with a
//! bearer token, or with one of two distinct failures:
//!
//! - **HTTP 401** when the client ID or secret is wrong, and
//! - **HTTP 200 with an `error` field** (usually `invalid_grant`) when
//!   the username or password is wrong.

use crate::http::{HTTPError, HTTPResult};
use crate::reddit::client::Error;
use crate::reddit::thing;
use log::debug;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::io::{self, BufRead, Write};

/// A Reddit user's login information.
///
/// Credentials are never stored; they are only kept around long enough
/// to log in.
#[derive(Debug)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Creates a new set of credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let username = username.into();
        let password = SecretString::from(password.into());
        Self { username, password }
    }

    /// Asks the user for their username and password using `prompt`.
    ///
    /// Neither is validated: empty strings are passed along to Reddit,
    /// which will reject them.
    pub fn prompt(prompt: &impl Prompt) -> io::Result<Self> {
        let username = prompt.username()?;
        let password = prompt.password()?;
        Ok(Self { username, password })
    }

    /// The username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password.
    pub fn password(&self) -> &SecretString {
        &self.password
    }
}

/// A way to ask the user for their login information.
pub trait Prompt {
    /// Asks for a username.
    fn username(&self) -> io::Result<String>;

    /// Asks for a password.
    fn password(&self) -> io::Result<SecretString>;
}

/// Asks for login information on the terminal.
///
/// The username is echoed as it is typed; the password is not.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn username(&self) -> io::Result<String> {
        print!("Username: ");
        io::stdout().flush()?;

        let mut username = String::new();
        io::stdin().lock().read_line(&mut username)?;
        Ok(strip_line_ending(&username).to_string())
    }

    fn password(&self) -> io::Result<SecretString> {
        rpassword::prompt_password("Password: ").map(SecretString::from)
    }
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .unwrap_or(line)
}

/// A bearer token granted by Reddit.
#[derive(Debug)]
pub struct AccessToken(SecretString);

impl AccessToken {
    /// Wraps a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// The raw token, for use in an `Authorization` header.
    pub fn secret(&self) -> &str {
        self.0.expose_secret()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TokenResponse {
    Granted {
        access_token: String,
        #[serde(default)]
        scope: Option<String>,
    },
    Rejected {
        error: String,
    },
}

/// Turns the result of a token request into an access token, classifying
/// failures as bad client information or bad login information.
///
/// Any other failure is passed through as is.
pub fn grant(response: HTTPResult<String>) -> Result<AccessToken, Error> {
    let body = match response {
        Ok(body) => body,
        Err(err) if is_unauthorized_client(&err) => {
            return Err(Error::InvalidClientCredentials(err));
        }
        Err(err) => return Err(Error::Service(err)),
    };

    match serde_json::from_str::<TokenResponse>(&body).map_err(thing::Error::from)? {
        TokenResponse::Granted {
            access_token,
            scope,
        } => {
            debug!("Access token granted with scope {}", scope.as_deref().unwrap_or("?"));
            Ok(AccessToken::new(access_token))
        }
        TokenResponse::Rejected { error } => Err(Error::InvalidLoginCredentials(error)),
    }
}

/// True if `err` came from a rejected client ID or secret.
fn is_unauthorized_client(err: &HTTPError) -> bool {
    err.status() == Some(StatusCode::UNAUTHORIZED)
}
