//! Drives the command-line program.

use crate::conf::{self, ClientConfig};
use crate::http::HTTPResult;
use crate::logging::LogLevel;
use crate::reddit::{
    self, Credentials, Listing, Prompt, RedditService, Service, Session, TerminalPrompt, Thing,
};
use clap::Parser;
use log::{debug, error, info};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

/// Exit code used for failures that are not one of the
/// [`ExitCondition`]s, such as network errors.
pub const FAILURE_EXIT_CODE: u8 = 4;

/// Program configuration.
#[derive(Debug, Parser)]
#[command(version)]
#[command(about = "Logs in to Reddit and lists your comments, posts, saved and upvoted items, and inbox", long_about = None)]
pub struct Config {
    /// praw.ini file which contains the client_id and client_secret
    #[arg(short = 'p', long = "praw-ini", value_name = "PATH")]
    praw_ini: PathBuf,

    /// Show DEBUG level logging messages in the terminal
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Section of the praw.ini file to read
    #[arg(short, long, default_value = conf::DEFAULT_SITE)]
    site: String,

    /// Only list 'n' items of each kind
    #[arg(short = 'n', long)]
    limit: Option<u32>,
}

impl Config {
    /// Path to the praw.ini file.
    pub fn praw_ini(&self) -> &Path {
        &self.praw_ini
    }

    /// How much to log.
    pub fn log_level(&self) -> LogLevel {
        LogLevel::from(self.verbose)
    }

    /// The praw.ini section to read.
    pub fn site(&self) -> &str {
        &self.site
    }

    /// The most items of each kind to list, or `None` for all of them.
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }
}

/// How the program ended, for scripts that call it.
///
/// # Examples
///
/// ```
/// use myredditbackup::cli::ExitCondition;
/// assert_eq!(ExitCondition::Success.code(), 0);
/// assert_eq!(ExitCondition::InvalidClientCredentials.code(), 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitCondition {
    /// Logged in and listed everything.
    Success,

    /// The praw.ini file is missing or unusable.
    InvalidConfigFile,

    /// Reddit rejected the client ID or secret.
    InvalidClientCredentials,

    /// Reddit rejected the username or password.
    InvalidLoginCredentials,
}

impl ExitCondition {
    /// The process exit code for this condition.
    pub fn code(self) -> u8 {
        match self {
            ExitCondition::Success => 0,
            ExitCondition::InvalidConfigFile => 1,
            ExitCondition::InvalidClientCredentials => 2,
            ExitCondition::InvalidLoginCredentials => 3,
        }
    }
}

impl From<ExitCondition> for ExitCode {
    fn from(condition: ExitCondition) -> Self {
        ExitCode::from(condition.code())
    }
}

/// An error that ends the program without a specific [`ExitCondition`].
#[derive(Debug, Error)]
pub enum Error {
    /// The user's login information could not be read.
    #[error("Could not read login information: {0}")]
    Prompt(#[from] io::Error),

    /// Talking to Reddit failed.
    #[error(transparent)]
    Reddit(#[from] reddit::Error),
}

/// Runs the command-line program.
#[derive(Debug)]
pub struct Runner<P = TerminalPrompt> {
    config: Config,
    prompt: P,
}

impl Runner {
    /// Create a new program runner using the given `config` that asks
    /// for login information on the terminal.
    pub fn new(config: Config) -> Self {
        Self::with_prompt(config, TerminalPrompt)
    }

    /// Run the command-line program using its stored configuration options.
    pub async fn run(&self) -> Result<ExitCondition, Error> {
        self.run_with(RedditService::new).await
    }
}

impl<P: Prompt> Runner<P> {
    /// Create a new program runner that asks for login information
    /// using `prompt`.
    pub fn with_prompt(config: Config, prompt: P) -> Self {
        Self { config, prompt }
    }

    /// Runs the program, connecting to Reddit with the service returned
    /// by `connect`.
    ///
    /// Configuration problems and rejected logins are reported as an
    /// [`ExitCondition`]; anything else is returned as an error.
    pub async fn run_with<S, F>(&self, connect: F) -> Result<ExitCondition, Error>
    where
        S: Service,
        F: FnOnce(&ClientConfig) -> HTTPResult<S>,
    {
        let client = match conf::load(self.config.praw_ini(), self.config.site()) {
            Ok(client) => client,
            Err(err) => {
                error!("{err}");
                debug!("{err:?}");
                return Ok(ExitCondition::InvalidConfigFile);
            }
        };

        let credentials = Credentials::prompt(&self.prompt)?;
        let service = connect(&client).map_err(reddit::Error::from)?;

        let session = match Session::login(service, &client, credentials).await {
            Ok(session) => session,
            Err(err @ reddit::Error::InvalidClientCredentials(_)) => {
                error!("{err}");
                debug!("{err:?}");
                return Ok(ExitCondition::InvalidClientCredentials);
            }
            Err(err @ reddit::Error::InvalidLoginCredentials(_)) => {
                error!("{err}");
                debug!("{err:?}");
                return Ok(ExitCondition::InvalidLoginCredentials);
            }
            Err(err) => return Err(err.into()),
        };

        self.run_listings(&session).await?;
        Ok(ExitCondition::Success)
    }

    async fn run_listings<S: Service>(&self, session: &Session<S>) -> Result<(), reddit::Error> {
        let limit = self.config.limit();

        drain(session.comments(limit), |thing| {
            if let Thing::Comment(comment) = thing {
                info!("User comment: {}", comment.body());
            }
        })
        .await?;

        drain(session.submissions(limit), |thing| {
            if let Thing::Submission(post) = thing {
                info!("User submission: {}", post.title());
            }
        })
        .await?;

        drain(session.saved(limit), |thing| match thing {
            Thing::Submission(post) => info!("Saved submission: {}", post.title()),
            Thing::Comment(comment) => info!("Saved comment: {}", comment.body()),
            other => debug!("Skipping saved {}", other.kind()),
        })
        .await?;

        drain(session.upvoted(limit), |thing| match thing {
            Thing::Submission(post) => info!("Upvoted submission: {}", post.title()),
            Thing::Comment(comment) => info!("Upvoted comment: {}", comment.body()),
            other => debug!("Skipping upvoted {}", other.kind()),
        })
        .await?;

        drain(session.inbox(limit), |thing| match thing {
            Thing::Message(message) => info!("Message subject: {}", message.subject()),
            other => debug!("Skipping inbox {}", other.kind()),
        })
        .await
    }
}

async fn drain<S: Service>(
    mut listing: Listing<'_, S>,
    mut log_thing: impl FnMut(Thing),
) -> Result<(), reddit::Error> {
    while let Some(thing) = listing.next().await? {
        log_thing(thing);
    }
    Ok(())
}
