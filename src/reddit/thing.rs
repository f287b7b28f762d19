// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! A "thing" in the Reddit sense.
//!
//! Historically in the Reddit API and its old source code, a "Thing" was
//! any element of the Reddit system: users, posts, comments, etc. Each
//! thing is tagged with a "kind" such as `t1` (comment) or `t3` (link),
//! and lists of things are returned as "listings", pages of things with
//! a cursor pointing to the next page.

use crate::text;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// A single element of a listing.
#[derive(Clone, Debug, PartialEq)]
pub enum Thing {
    /// A comment (`t1`).
    Comment(Comment),

    /// A link or self post (`t3`).
    Submission(Submission),

    /// A private message (`t4`).
    Message(Message),

    /// Any other kind of thing, identified by its kind.
    Other(String),
}

impl Thing {
    fn from_raw(raw: RawThing) -> Result<Self, Error> {
        let thing = match raw.kind.as_str() {
            "t1" => Thing::Comment(serde_json::from_value(raw.data)?),
            "t3" => Thing::Submission(serde_json::from_value(raw.data)?),
            "t4" => Thing::Message(serde_json::from_value(raw.data)?),
            _ => Thing::Other(raw.kind),
        };
        Ok(thing)
    }

    /// The thing's kind, as used by the Reddit API.
    pub fn kind(&self) -> &str {
        match self {
            Thing::Comment(_) => "t1",
            Thing::Submission(_) => "t3",
            Thing::Message(_) => "t4",
            Thing::Other(kind) => kind,
        }
    }
}

/// A Reddit comment.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Comment {
    id: String,
    body: String,
    subreddit: String,
    created_utc: f64,
}

impl Comment {
    /// The comment's ID, without its kind prefix.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The text of the comment.
    pub fn body(&self) -> String {
        text::decode(&self.body)
    }

    /// The subreddit in which the comment was posted.
    pub fn subreddit(&self) -> &str {
        &self.subreddit
    }

    /// When the comment was posted.
    pub fn created_utc(&self) -> DateTime<Utc> {
        timestamp(self.created_utc)
    }
}

/// A Reddit post.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Submission {
    id: String,
    title: String,
    subreddit: String,
    created_utc: f64,
}

impl Submission {
    /// The post's ID, without its kind prefix.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The post's title.
    pub fn title(&self) -> String {
        text::decode(&self.title)
    }

    /// The subreddit to which the post was submitted.
    pub fn subreddit(&self) -> &str {
        &self.subreddit
    }

    /// When the post was submitted.
    pub fn created_utc(&self) -> DateTime<Utc> {
        timestamp(self.created_utc)
    }
}

/// A private message.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Message {
    id: String,
    author: Option<String>,
    subject: String,
    body: String,
    created_utc: f64,
}

impl Message {
    /// The message's ID, without its kind prefix.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The sender; `None` for messages sent on behalf of a subreddit.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// The message's subject line.
    pub fn subject(&self) -> String {
        text::decode(&self.subject)
    }

    /// The message's text.
    pub fn body(&self) -> String {
        text::decode(&self.body)
    }

    /// When the message was sent.
    pub fn created_utc(&self) -> DateTime<Utc> {
        timestamp(self.created_utc)
    }
}

/// One page of a listing.
#[derive(Debug, PartialEq)]
pub struct Page {
    /// Cursor for the following page, or `None` if this is the last page.
    pub after: Option<String>,

    /// The things on this page.
    pub things: Vec<Thing>,
}

impl Page {
    /// Parses a listing response from the Reddit API.
    pub fn parse(data: &str) -> Result<Self, Error> {
        let listing: RawListing = serde_json::from_str(data)?;
        let things = listing
            .data
            .children
            .into_iter()
            .map(Thing::from_raw)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            after: listing.data.after,
            things,
        })
    }
}

/// The authenticated account, as returned by `/api/v1/me`.
#[derive(Debug, Deserialize)]
pub struct Me {
    name: String,
}

impl Me {
    /// Parses the response from `/api/v1/me`.
    pub fn parse(data: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(data)?)
    }

    /// The account's username.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Deserialize)]
struct RawListing {
    data: RawListingData,
}

#[derive(Deserialize)]
struct RawListingData {
    after: Option<String>,
    children: Vec<RawThing>,
}

#[derive(Deserialize)]
struct RawThing {
    kind: String,
    data: serde_json::Value,
}

fn timestamp(created_utc: f64) -> DateTime<Utc> {
    DateTime::from_timestamp(created_utc.trunc() as i64, 0).unwrap_or_default()
}

/// An error parsing data returned by the Reddit API.
#[derive(Debug, Error)]
pub enum Error {
    /// The response was not the JSON that was expected.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
