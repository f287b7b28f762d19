// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! myredditbackup is a command-line tool that logs in to your Reddit
//! account and walks through everything you have left behind: your
//! comments, your posts, the comments and posts you saved or upvoted, and
//! your inbox. Each item is written to the log as it is retrieved.
//!
//! # Examples
//!
//! List everything, using the application registered in `praw.ini`:
//!
//! ```bash
//! myredditbackup -p ~/.config/praw.ini
//! ```
//!
//! Use the `[bot1]` section of `praw.ini` and only list the 10 most
//! recent items of each kind:
//!
//! ```bash
//! myredditbackup -p ~/.config/praw.ini --site bot1 --limit 10
//! ```
//!
//! Show debugging output, including why a login failed:
//!
//! ```bash
//! myredditbackup -p ~/.config/praw.ini -v
//! ```
//!
//! Get usage and help for the tool:
//!
//! ```bash
//! myredditbackup --help
//! ```
//!
//! You will be asked for your Reddit username and password. The password
//! is not echoed, is never written to the log, and is forgotten as soon as
//! Reddit has answered.
//!
//! # Reddit API Setup
//!
//! myredditbackup logs in as a Reddit ["script" application]. To set one
//! up:
//!
//! 1. Visit your [app preferences] and create a new app of type "script".
//!    Add your own account as a developer of the app.
//! 2. Copy the client ID (shown under the app's name) and the secret.
//! 3. Save them in a `praw.ini` file:
//!
//!    ```ini
//!    [DEFAULT]
//!    client_id = SI8pN3DSbt0zor
//!    client_secret = xaxkj7HNh8kwg8e5t4m6KvSrbTI
//!    user_agent = script:myredditbackup:v0.1.0 (by /u/reddit_user)
//!    ```
//!
//! The file format is shared with PRAW, so an existing `praw.ini` works
//! as is. See the [`conf`] module for details.
//!
//! # Exit Codes
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | The praw.ini file is missing or invalid              |
//! | 2    | Reddit rejected the client ID or secret              |
//! | 3    | Reddit rejected the username or password             |
//! | 4    | Anything else went wrong, such as a network error    |
//!
//! Invalid command-line arguments are reported by the argument parser,
//! which exits with code 2.
//!
//! # License
//!
//! myredditbackup is licensed under the terms of the [Apache License 2.0].
//! Please see the LICENSE file accompanying this source code or visit the
//! previous link for more information on licensing.
//!
//! [Apache License 2.0]: https://www.apache.org/licenses/LICENSE-2.0
//! ["script" application]: https://github.com/reddit-archive/reddit/wiki/OAuth2-App-Types
//! [app preferences]: https://www.reddit.com/prefs/apps

pub mod cli;
pub mod conf;
pub mod http;
pub mod logging;
pub mod reddit;
pub mod text;

#[cfg(test)]
mod test_utils;
