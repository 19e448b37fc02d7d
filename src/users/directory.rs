use crate::{
    api::{build_url_with_base, get_json, post_json_response},
    config::{AppConfig, USERS_PATH},
    errors::AppError,
    users::types::{NewUser, User, UserId},
};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

/// Access to the backend `users` collection.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// `GET /users`: every record, unfiltered.
    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    /// `GET /users/{id}`: a single record; a missing id is `Http { status: 404 }`.
    async fn get_user(&self, id: &UserId) -> Result<User, AppError>;

    /// `POST /users`: the created record with its assigned id.
    async fn create_user(&self, user: &NewUser) -> Result<User, AppError>;
}

/// `reqwest`-backed client for the users resource.
#[derive(Clone, Debug)]
pub struct UsersClient {
    client: Client,
    base_url: String,
}

impl UsersClient {
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    fn collection_url(&self) -> String {
        build_url_with_base(&self.base_url, USERS_PATH)
    }

    /// The id becomes a single percent-encoded path segment.
    fn record_url(&self, id: &UserId) -> Result<String, AppError> {
        let mut url = Url::parse(&self.collection_url())
            .map_err(|err| AppError::Config(format!("Invalid API base URL: {err}")))?;
        url.path_segments_mut()
            .map_err(|()| AppError::Config("API base URL cannot carry a path".to_string()))?
            .push(id.as_str().trim());
        Ok(url.into())
    }
}

#[async_trait]
impl UserDirectory for UsersClient {
    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users: Vec<User> = get_json(&self.client, &self.collection_url()).await?;
        debug!(count = users.len(), "users fetched");
        Ok(users)
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: &UserId) -> Result<User, AppError> {
        if id.as_str().trim().is_empty() {
            return Err(AppError::Config("User id is required.".to_string()));
        }

        get_json(&self.client, &self.record_url(id)?).await
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create_user(&self, user: &NewUser) -> Result<User, AppError> {
        let created: User = post_json_response(&self.client, &self.collection_url(), user).await?;
        debug!(id = %created.id, "user created");
        Ok(created)
    }
}
