//! Group operations

use super::{send_empty, send_for};
use crate::data_store::DataStore;
use crate::error::Result;
use crate::http::{HttpRequest, RequestContext};
use crate::pagination::CollectionClient;
use crate::resource::{AsResource, Group, User};
use std::sync::Arc;

const GROUPS: &str = "/api/v1/groups";
const GROUP: &str = "/api/v1/groups/{groupId}";
const GROUP_USERS: &str = "/api/v1/groups/{groupId}/users";
const GROUP_USER: &str = "/api/v1/groups/{groupId}/users/{userId}";

/// Query options for [`GroupsClient::list_groups`]
#[derive(Debug, Clone, Default)]
pub struct ListGroupsOptions {
    /// Prefix match on the group name
    pub q: Option<String>,
    /// Filter expression, e.g. `type eq "OKTA_GROUP"`
    pub filter: Option<String>,
    /// Embed related resources, e.g. `stats`
    pub expand: Option<String>,
    /// Page size
    pub limit: Option<u32>,
}

impl ListGroupsOptions {
    fn apply(self, request: HttpRequest) -> HttpRequest {
        request
            .query_opt("q", self.q)
            .query_opt("filter", self.filter)
            .query_opt("expand", self.expand)
            .query_opt("limit", self.limit)
    }
}

/// Group CRUD and membership
#[derive(Clone)]
pub struct GroupsClient {
    data_store: Arc<dyn DataStore>,
    context: RequestContext,
}

impl GroupsClient {
    pub(crate) fn new(data_store: Arc<dyn DataStore>, context: RequestContext) -> Self {
        Self {
            data_store,
            context,
        }
    }

    /// Groups of the org, fetched lazily page by page
    pub fn list_groups(&self, options: ListGroupsOptions) -> CollectionClient<Group> {
        self.collection(options.apply(HttpRequest::get(GROUPS)))
    }

    pub async fn get_group(&self, group_id: &str) -> Result<Group> {
        let request = HttpRequest::get(GROUP).path_param("groupId", group_id);
        send_for(self.data_store.as_ref(), &request, &self.context).await
    }

    pub async fn create_group(&self, group: &Group) -> Result<Group> {
        let request = HttpRequest::post(GROUPS).json(group.to_json());
        send_for(self.data_store.as_ref(), &request, &self.context).await
    }

    /// Replace the profile of a group
    pub async fn update_group(&self, group_id: &str, group: &Group) -> Result<Group> {
        let request = HttpRequest::put(GROUP)
            .path_param("groupId", group_id)
            .json(group.to_json());
        send_for(self.data_store.as_ref(), &request, &self.context).await
    }

    pub async fn delete_group(&self, group_id: &str) -> Result<()> {
        let request = HttpRequest::delete(GROUP).path_param("groupId", group_id);
        send_empty(self.data_store.as_ref(), &request, &self.context).await
    }

    /// Members of a group
    pub fn list_group_users(&self, group_id: &str, limit: Option<u32>) -> CollectionClient<User> {
        self.collection(
            HttpRequest::get(GROUP_USERS)
                .path_param("groupId", group_id)
                .query_opt("limit", limit),
        )
    }

    pub async fn add_user_to_group(&self, group_id: &str, user_id: &str) -> Result<()> {
        let request = HttpRequest::put(GROUP_USER)
            .path_param("groupId", group_id)
            .path_param("userId", user_id);
        send_empty(self.data_store.as_ref(), &request, &self.context).await
    }

    pub async fn remove_user_from_group(&self, group_id: &str, user_id: &str) -> Result<()> {
        let request = HttpRequest::delete(GROUP_USER)
            .path_param("groupId", group_id)
            .path_param("userId", user_id);
        send_empty(self.data_store.as_ref(), &request, &self.context).await
    }

    fn collection<T: serde::de::DeserializeOwned>(&self, request: HttpRequest) -> CollectionClient<T> {
        CollectionClient::new(Arc::clone(&self.data_store), request, self.context.clone())
    }
}
