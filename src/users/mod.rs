//! The backend `users` collection: record types and the client that lists,
//! fetches and creates them. The collection is always read wholesale; the
//! backend offers no filtering or pagination.

pub mod directory;
pub mod types;

pub use directory::{UserDirectory, UsersClient};
pub use types::{NewUser, User, UserId};
