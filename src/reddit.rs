//! Reddit API clients and services for communicating with Reddit over HTTP.

pub mod auth;
pub mod client;
pub mod service;
pub mod thing;

pub use auth::{Credentials, Prompt, TerminalPrompt};
pub use client::{Error, Listing, Session};
pub use service::{RedditService, Service};
pub use thing::Thing;
