//! # Doorstep (signup, login and welcome pages)
//!
//! `doorstep` is the client side of a small account flow backed by a mock REST
//! `users` collection. Three page controllers drive it:
//!
//! - **Signup** validates the form, checks the collection for a username or email
//!   collision, creates the record and redirects to login.
//! - **Login** scans the collection for an exact username/password match, stores
//!   the session marker and redirects to the welcome page.
//! - **Welcome** restores the session from the marker, renders the account and a
//!   running clock, and offers logout.
//!
//! ## Session Marker
//!
//! The only client-side state is `currentUserId` in durable local storage. It is
//! set on login and cleared on logout or when the stored id can no longer be
//! loaded. There is no expiry.
//!
//! ## Passwords
//!
//! Records carry the password in cleartext and login compares it verbatim. This
//! mirrors the backend contract and is not a recommended practice; form input is
//! kept in `SecretString` until the single point where it is compared or sent.
//!
//! ## Hosts
//!
//! Controllers render through the [`ui::Surface`] trait and navigate through a
//! [`pages::Navigator`]. The `doorstep` binary provides a terminal surface and a
//! development mock of the `users` resource (`doorstep mock-backend`).

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod mock;
pub mod pages;
pub mod session;
pub mod terminal;
pub mod ui;
pub mod users;

pub use errors::AppError;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
