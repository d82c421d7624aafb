//! Example Marci service.
//!
//! A `users` plugin mounted under a configurable prefix, with an `onRequest`
//! hook that attaches the caller to every request.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod settings;
pub mod users;

use marci::{App, PluginOptions};

pub use settings::{Settings, SettingsError};
pub use users::AuthContext;

/// Builds the app with the users plugin mounted at `prefix`.
#[must_use]
pub fn app(prefix: &str) -> App<AuthContext> {
    let app = App::new();
    app.register(users::routes, PluginOptions::prefix(prefix));
    app
}
