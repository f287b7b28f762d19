// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! HTTPS connector for the Reddit API.
//!
//! Service structures in this module provide a low-level way to interact
//! with the Reddit API over HTTPS, essentially a specialized HTTPS client
//! specifically for Reddit. They return raw response bodies; making sense
//! of them is left to [`Session`](crate::reddit::Session).

use crate::conf::ClientConfig;
use crate::http::{self, HTTPError, HTTPResult, HTTPService};
use crate::reddit::auth::{AccessToken, Credentials};
use reqwest::Client;
use secrecy::ExposeSecret;

/// A service for talking to the Reddit API on behalf of a user.
///
/// Using this trait, clients can implement different ways of connecting
/// to the Reddit API, such as an actual connector for production code,
/// and a mocked connector for testing purposes.
pub trait Service {
    /// Asks Reddit for an access token for the application described by
    /// `client`, acting as the user identified by `credentials`.
    ///
    /// Returns the raw body of the token response. Implementations must
    /// make exactly one request and must not retry.
    fn request_token(
        &self,
        client: &ClientConfig,
        credentials: &Credentials,
    ) -> impl Future<Output = HTTPResult<String>> + Send;

    /// Performs an authenticated GET request for `resource`, such as
    /// `/api/v1/me`, and returns the raw body.
    ///
    /// `params` are sent as the query string.
    fn get_resource(
        &self,
        token: &AccessToken,
        resource: &str,
        params: &[(&str, String)],
    ) -> impl Future<Output = HTTPResult<String>> + Send;
}

impl<S: Service> Service for &S {
    fn request_token(
        &self,
        client: &ClientConfig,
        credentials: &Credentials,
    ) -> impl Future<Output = HTTPResult<String>> + Send {
        (**self).request_token(client, credentials)
    }

    fn get_resource(
        &self,
        token: &AccessToken,
        resource: &str,
        params: &[(&str, String)],
    ) -> impl Future<Output = HTTPResult<String>> + Send {
        (**self).get_resource(token, resource, params)
    }
}

/// A service that contacts the Reddit API directly.
#[derive(Debug)]
pub struct RedditService {
    client: Client,
    reddit_url: String,
    oauth_url: String,
}

impl HTTPService for RedditService {}

impl RedditService {
    /// Creates a new Reddit service using the user agent and endpoints
    /// from `config`.
    pub fn new(config: &ClientConfig) -> HTTPResult<Self> {
        let client = Self::client(config.user_agent())?;
        let reddit_url = config.reddit_url().trim_end_matches('/').to_string();
        let oauth_url = config.oauth_url().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            reddit_url,
            oauth_url,
        })
    }

    fn token_uri(&self) -> String {
        format!("{}/api/v1/access_token", self.reddit_url)
    }

    fn uri(&self, resource: &str) -> String {
        format!("{}{resource}", self.oauth_url)
    }
}

impl Service for RedditService {
    async fn request_token(
        &self,
        client: &ClientConfig,
        credentials: &Credentials,
    ) -> HTTPResult<String> {
        let form = [
            ("grant_type", "password"),
            ("username", credentials.username()),
            ("password", credentials.password().expose_secret()),
        ];
        let resp = self
            .client
            .post(self.token_uri())
            .basic_auth(client.client_id(), Some(client.client_secret().expose_secret()))
            .form(&form)
            .send()
            .await
            .map_err(HTTPError::Request)?;
        http::json_body(resp).await
    }

    async fn get_resource(
        &self,
        token: &AccessToken,
        resource: &str,
        params: &[(&str, String)],
    ) -> HTTPResult<String> {
        let resp = self
            .client
            .get(self.uri(resource))
            .bearer_auth(token.secret())
            .query(params)
            .send()
            .await
            .map_err(HTTPError::Request)?;
        http::json_body(resp).await
    }
}
