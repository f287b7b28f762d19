// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Clients for reading an authenticated user's data from the Reddit API.

use crate::conf::ClientConfig;
use crate::http;
use crate::reddit::auth::{self, AccessToken, Credentials};
use crate::reddit::service::Service;
use crate::reddit::thing::{self, Me, Page, Thing};
use log::{debug, trace};
use std::collections::VecDeque;
use thiserror::Error;

/// The most items Reddit will return in a single page of a listing.
pub const PAGE_SIZE: u32 = 100;

/// An authenticated connection to Reddit, acting on behalf of a single
/// user.
///
/// A session is only ever handed out fully logged in: an access token has
/// been granted and the user's identity confirmed.
#[derive(Debug)]
pub struct Session<S> {
    service: S,
    token: AccessToken,
    username: String,
}

impl<S: Service> Session<S> {
    /// Logs in to Reddit as the user identified by `credentials`, using
    /// the application identified by `config`.
    ///
    /// Exactly one login attempt is made. The credentials are dropped as
    /// soon as Reddit has answered.
    ///
    /// Returns [`Error::InvalidClientCredentials`] if Reddit rejects the
    /// application's client ID or secret, and
    /// [`Error::InvalidLoginCredentials`] if it rejects the username or
    /// password. Any other failure is returned as is.
    pub async fn login(
        service: S,
        config: &ClientConfig,
        credentials: Credentials,
    ) -> Result<Self, Error> {
        debug!("Requesting access token for {}", credentials.username());
        let response = service.request_token(config, &credentials).await;
        drop(credentials);
        let token = auth::grant(response)?;

        let me = service.get_resource(&token, "/api/v1/me", &[]).await?;
        let username = Me::parse(&me)?.name().to_string();
        debug!("Login successful for {username}.");

        Ok(Self {
            service,
            token,
            username,
        })
    }

    /// The logged-in user's username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The user's comments, newest first.
    pub fn comments(&self, limit: Option<u32>) -> Listing<'_, S> {
        let resource = format!("/user/{}/comments", self.username);
        Listing::new(self, resource, limit).sort("new")
    }

    /// The user's posts, newest first.
    pub fn submissions(&self, limit: Option<u32>) -> Listing<'_, S> {
        let resource = format!("/user/{}/submitted", self.username);
        Listing::new(self, resource, limit).sort("new")
    }

    /// Comments and posts the user has saved.
    pub fn saved(&self, limit: Option<u32>) -> Listing<'_, S> {
        let resource = format!("/user/{}/saved", self.username);
        Listing::new(self, resource, limit)
    }

    /// Comments and posts the user has upvoted.
    pub fn upvoted(&self, limit: Option<u32>) -> Listing<'_, S> {
        let resource = format!("/user/{}/upvoted", self.username);
        Listing::new(self, resource, limit)
    }

    /// Everything in the user's inbox: private messages as well as
    /// replies and username mentions.
    pub fn inbox(&self, limit: Option<u32>) -> Listing<'_, S> {
        Listing::new(self, "/message/inbox", limit)
    }
}

/// A lazily fetched Reddit listing.
///
/// Pages are requested one at a time as items are consumed, following
/// Reddit's `after` cursor until the listing runs out or `limit` items
/// have been returned.
#[derive(Debug)]
pub struct Listing<'a, S> {
    session: &'a Session<S>,
    resource: String,
    sort: Option<&'static str>,
    remaining: Option<u32>,
    after: Option<String>,
    buffer: VecDeque<Thing>,
    exhausted: bool,
}

impl<'a, S: Service> Listing<'a, S> {
    fn new(session: &'a Session<S>, resource: impl Into<String>, limit: Option<u32>) -> Self {
        Self {
            session,
            resource: resource.into(),
            sort: None,
            remaining: limit,
            after: None,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    fn sort(self, sort: &'static str) -> Self {
        Self {
            sort: Some(sort),
            ..self
        }
    }

    /// Returns the next item in the listing, fetching another page from
    /// Reddit if necessary, or `None` when there is nothing left.
    pub async fn next(&mut self) -> Result<Option<Thing>, Error> {
        loop {
            if self.remaining == Some(0) {
                return Ok(None);
            }
            if let Some(thing) = self.buffer.pop_front() {
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining -= 1;
                }
                return Ok(Some(thing));
            }
            if self.exhausted {
                return Ok(None);
            }
            self.fetch().await?;
        }
    }

    /// Consumes the rest of the listing, returning every remaining item.
    pub async fn collect(mut self) -> Result<Vec<Thing>, Error> {
        let mut things = Vec::new();
        while let Some(thing) = self.next().await? {
            things.push(thing);
        }
        Ok(things)
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let page_size = self.remaining.map_or(PAGE_SIZE, |n| n.min(PAGE_SIZE));
        let mut params = vec![("limit", page_size.to_string())];
        if let Some(sort) = self.sort {
            params.push(("sort", sort.to_string()));
        }
        if let Some(after) = &self.after {
            params.push(("after", after.clone()));
        }
        params
    }

    async fn fetch(&mut self) -> Result<(), Error> {
        let params = self.params();
        trace!("Fetching {} with {:?}", self.resource, params);
        let body = self
            .session
            .service
            .get_resource(&self.session.token, &self.resource, &params)
            .await?;
        let page = Page::parse(&body)?;
        debug!(
            "Fetched {} items from {}; next page: {}",
            page.things.len(),
            self.resource,
            page.after.as_deref().unwrap_or("none")
        );

        self.exhausted = page.after.is_none() || page.things.is_empty();
        self.after = page.after;
        self.buffer.extend(page.things);
        Ok(())
    }
}

/// A client error.
#[derive(Debug, Error)]
pub enum Error {
    /// Reddit rejected the application's client ID or secret.
    #[error("Unauthorized client error: wrong client_id or client_secret in praw.ini")]
    InvalidClientCredentials(#[source] http::HTTPError),

    /// Reddit rejected the user's username or password.
    #[error("Login authentication error: wrong username or password ({0})")]
    InvalidLoginCredentials(String),

    /// An error from the underlying HTTP service.
    #[error("Service error: {0}")]
    Service(#[from] http::HTTPError),

    /// An error parsing data.
    #[error("Parse error: {0}")]
    Parse(#[from] thing::Error),
}
