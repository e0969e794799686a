//! User operations

use super::{send_empty, send_for};
use crate::data_store::DataStore;
use crate::error::Result;
use crate::http::{HttpRequest, RequestContext};
use crate::pagination::CollectionClient;
use crate::resource::{AsResource, Group, User};
use std::sync::Arc;

const USERS: &str = "/api/v1/users";
const USER: &str = "/api/v1/users/{userId}";
const USER_GROUPS: &str = "/api/v1/users/{userId}/groups";
const USER_DEACTIVATE: &str = "/api/v1/users/{userId}/lifecycle/deactivate";

/// Query options for [`UsersClient::list_users`]
#[derive(Debug, Clone, Default)]
pub struct ListUsersOptions {
    /// Prefix match on first name, last name and email
    pub q: Option<String>,
    /// Filter expression, e.g. `status eq "ACTIVE"`
    pub filter: Option<String>,
    /// Search expression, e.g. `profile.department eq "Engineering"`
    pub search: Option<String>,
    /// Page size
    pub limit: Option<u32>,
}

impl ListUsersOptions {
    fn apply(self, request: HttpRequest) -> HttpRequest {
        request
            .query_opt("q", self.q)
            .query_opt("filter", self.filter)
            .query_opt("search", self.search)
            .query_opt("limit", self.limit)
    }
}

/// User CRUD and lifecycle
#[derive(Clone)]
pub struct UsersClient {
    data_store: Arc<dyn DataStore>,
    context: RequestContext,
}

impl UsersClient {
    pub(crate) fn new(data_store: Arc<dyn DataStore>, context: RequestContext) -> Self {
        Self {
            data_store,
            context,
        }
    }

    /// Users of the org, fetched lazily page by page
    pub fn list_users(&self, options: ListUsersOptions) -> CollectionClient<User> {
        CollectionClient::new(
            Arc::clone(&self.data_store),
            options.apply(HttpRequest::get(USERS)),
            self.context.clone(),
        )
    }

    /// Fetch a user by id or login
    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        let request = HttpRequest::get(USER).path_param("userId", user_id);
        send_for(self.data_store.as_ref(), &request, &self.context).await
    }

    /// Create a user, optionally activating it right away
    pub async fn create_user(&self, user: &User, activate: bool) -> Result<User> {
        let request = HttpRequest::post(USERS)
            .query("activate", activate)
            .json(user.to_json());
        send_for(self.data_store.as_ref(), &request, &self.context).await
    }

    /// Replace the profile and credentials of a user
    pub async fn update_user(&self, user_id: &str, user: &User) -> Result<User> {
        let request = HttpRequest::put(USER)
            .path_param("userId", user_id)
            .json(user.to_json());
        send_for(self.data_store.as_ref(), &request, &self.context).await
    }

    pub async fn deactivate_user(&self, user_id: &str) -> Result<()> {
        let request = HttpRequest::post(USER_DEACTIVATE).path_param("userId", user_id);
        send_empty(self.data_store.as_ref(), &request, &self.context).await
    }

    /// Delete a user. Okta only deletes deactivated users; calling this on an
    /// active user deactivates it instead.
    pub async fn delete_user(&self, user_id: &str) -> Result<()> {
        let request = HttpRequest::delete(USER).path_param("userId", user_id);
        send_empty(self.data_store.as_ref(), &request, &self.context).await
    }

    /// Groups the user belongs to
    pub fn list_user_groups(&self, user_id: &str) -> CollectionClient<Group> {
        CollectionClient::new(
            Arc::clone(&self.data_store),
            HttpRequest::get(USER_GROUPS).path_param("userId", user_id),
            self.context.clone(),
        )
    }
}
