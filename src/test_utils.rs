use crate::conf::ClientConfig;
use crate::http::{HTTPError, HTTPResult};
use crate::reddit::auth::{AccessToken, Credentials, Prompt};
use crate::reddit::service::Service;
use log::{LevelFilter, Log, Metadata, Record};
use reqwest::StatusCode;
use secrecy::SecretString;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Mutex, Once};

pub fn load_data(file: &str) -> String {
    fs::read_to_string(format!("tests/data/{file}.json")).expect("could not find test data")
}

enum TokenReply {
    File(String),
    Status(StatusCode),
}

/// A Reddit service that answers from JSON fixtures in `tests/data`.
///
/// Resources are looked up as `<last path segment>_<suffix>.json`, with
/// `_<after>` appended for later pages. Missing fixtures are reported as
/// HTTP 404.
pub struct TestService {
    suffix: String,
    token: TokenReply,
    token_requests: Mutex<Vec<String>>,
    resources: Mutex<Vec<String>>,
}

impl TestService {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            token: TokenReply::File(String::from("token_granted")),
            token_requests: Mutex::new(vec![]),
            resources: Mutex::new(vec![]),
        }
    }

    /// Answers token requests with the given fixture.
    pub fn token_file(self, file: &str) -> Self {
        let token = TokenReply::File(file.to_string());
        Self { token, ..self }
    }

    /// Answers token requests with the given HTTP error status.
    pub fn token_status(self, status: StatusCode) -> Self {
        let token = TokenReply::Status(status);
        Self { token, ..self }
    }

    pub fn token_requests(&self) -> usize {
        self.token_requests.lock().unwrap().len()
    }

    pub fn token_request_usernames(&self) -> Vec<String> {
        self.token_requests.lock().unwrap().clone()
    }

    pub fn requested_resources(&self) -> Vec<String> {
        self.resources.lock().unwrap().clone()
    }

    fn fixture(&self, resource: &str, params: &[(&str, String)]) -> String {
        let segment = resource.rsplit('/').next().unwrap_or(resource);
        let after = params.iter().find(|(key, _)| *key == "after");
        match after {
            Some((_, after)) => format!("{segment}_{}_{after}", self.suffix),
            None => format!("{segment}_{}", self.suffix),
        }
    }
}

impl Service for TestService {
    async fn request_token(
        &self,
        _client: &ClientConfig,
        credentials: &Credentials,
    ) -> HTTPResult<String> {
        self.token_requests
            .lock()
            .unwrap()
            .push(credentials.username().to_string());
        match &self.token {
            TokenReply::File(file) => Ok(load_data(file)),
            TokenReply::Status(status) => Err(HTTPError::Http(*status)),
        }
    }

    async fn get_resource(
        &self,
        _token: &AccessToken,
        resource: &str,
        params: &[(&str, String)],
    ) -> HTTPResult<String> {
        let query = params
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        let requested = if query.is_empty() {
            resource.to_string()
        } else {
            format!("{resource}?{query}")
        };
        self.resources.lock().unwrap().push(requested);

        let path = format!("tests/data/{}.json", self.fixture(resource, params));
        if Path::new(&path).is_file() {
            Ok(fs::read_to_string(path).expect("could not read test data"))
        } else {
            Err(HTTPError::Http(StatusCode::NOT_FOUND))
        }
    }
}

/// Answers login prompts with canned credentials.
pub struct TestPrompt {
    username: String,
    password: String,
    asked: Mutex<usize>,
}

impl TestPrompt {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            asked: Mutex::new(0),
        }
    }

    /// How many times the user was asked for something.
    pub fn times_asked(&self) -> usize {
        *self.asked.lock().unwrap()
    }
}

impl Prompt for TestPrompt {
    fn username(&self) -> io::Result<String> {
        *self.asked.lock().unwrap() += 1;
        Ok(self.username.clone())
    }

    fn password(&self) -> io::Result<SecretString> {
        *self.asked.lock().unwrap() += 1;
        Ok(SecretString::from(self.password.clone()))
    }
}

static CAPTURED_LOGS: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct CapturingLogger;

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let line = format!("{} {}: {}", record.level(), record.target(), record.args());
        CAPTURED_LOGS.lock().unwrap().push(line);
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger;

/// Records every log message, at every level, for the rest of the test
/// run. Messages from all tests end up in the same place.
pub fn capture_logs() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("a logger was already installed");
        log::set_max_level(LevelFilter::Trace);
    });
}

pub fn captured_logs() -> Vec<String> {
    CAPTURED_LOGS.lock().unwrap().clone()
}

pub fn praw_ini(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("praw.ini");
    fs::write(
        &path,
        "[DEFAULT]\nclient_id = SI8pN3DSbt0zor\nclient_secret = xaxkj7HNh8kwg8e5t4m6KvSrbTI\n",
    )
    .expect("could not write praw.ini");
    path
}
