//! Services for communicating with APIs using HTTP.

use reqwest::{Client, ClientBuilder, Response, header};
use std::{error, fmt};

/// A general service for making HTTP calls.
///
/// It might be a bit odd to refer to this trait as a "service", since
/// it appears to be more of a _client_ implementation, but think of
/// this as a proxy for a remote _service_ (even though a _client_ is used
/// to communicate with that remote service). A service might not always
/// be remote, such as when the implementation is a deterministic service
/// used for testing.
pub trait HTTPService {
    /// HTTP client that can be used to make HTTP requests.
    ///
    /// `user_agent` is sent with every request. Reddit throttles or
    /// rejects requests that arrive with a generic user agent, so callers
    /// should pass along whatever the user configured, falling back to
    /// [`HTTPService::user_agent()`].
    fn client(user_agent: &str) -> HTTPResult<Client> {
        ClientBuilder::new()
            .user_agent(user_agent)
            .build()
            .map_err(HTTPError::Client)
    }

    /// An appropriate user agent to use when making HTTP requests.
    fn user_agent() -> String {
        format!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

/// Checks that `resp` was successful and carries a JSON body, and returns
/// the raw body.
pub async fn json_body(resp: Response) -> HTTPResult<String> {
    if !resp.status().is_success() {
        return Err(HTTPError::Http(resp.status()));
    }

    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .ok_or(HTTPError::MissingContentType)?
        .to_str()?;
    if !content_type.starts_with("application/json") {
        Err(HTTPError::UnexpectedContentType(content_type.to_string()))
    } else {
        resp.text().await.map_err(HTTPError::Body)
    }
}

/// The result of an HTTP request.
pub type HTTPResult<T> = Result<T, HTTPError>;

/// Indicates an error has occurred when making an HTTP call.
#[derive(Debug)]
pub enum HTTPError {
    /// The HTTP client itself could not be created.
    Client(reqwest::Error),

    /// An error retrieving the body of a response.
    Body(reqwest::Error),

    /// An error that occurred while making an HTTP request.
    Request(reqwest::Error),

    /// An unsuccessful HTTP status code in an HTTP response.
    Http(reqwest::StatusCode),

    /// A missing Content-Type header in a response.
    MissingContentType,

    /// An invalid Content-Type header.
    InvalidContentType(header::ToStrError),

    /// A Content-Type that is not understood by the service.
    UnexpectedContentType(String),
}

impl HTTPError {
    /// The HTTP status code of the response, if the error was caused by
    /// an unsuccessful response.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            HTTPError::Http(status) => Some(*status),
            _ => None,
        }
    }
}

impl From<header::ToStrError> for HTTPError {
    fn from(error: header::ToStrError) -> Self {
        HTTPError::InvalidContentType(error)
    }
}

impl fmt::Display for HTTPError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HTTPError::Client(err) => write!(f, "Could not create HTTP client: {err}"),
            HTTPError::Body(err) => write!(f, "Error retrieving body of HTTP response: {err}"),
            HTTPError::Request(err) => write!(f, "Error while making HTTP request: {err}"),
            HTTPError::Http(status) => write!(f, "Request returned HTTP {status}"),
            HTTPError::MissingContentType => write!(f, "Missing Content-Type header"),
            HTTPError::InvalidContentType(err) => {
                write!(f, "Invalid Content-Type header value: {err}")
            }
            HTTPError::UnexpectedContentType(content_type) => {
                write!(f, "Unexpected content type: {content_type}")
            }
        }
    }
}

impl error::Error for HTTPError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            HTTPError::Client(err) => Some(err),
            HTTPError::Body(err) => Some(err),
            HTTPError::Request(err) => Some(err),
            HTTPError::Http(_) => None,
            HTTPError::MissingContentType => None,
            HTTPError::InvalidContentType(err) => Some(err),
            HTTPError::UnexpectedContentType(_) => None,
        }
    }
}
