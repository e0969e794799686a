//! Group resources

use super::{AsResource, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile of an Okta group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupProfile(Resource);

resource_wrapper!(GroupProfile);

impl GroupProfile {
    pub fn new(name: impl Into<String>) -> Self {
        let mut profile = Self::default();
        profile.set_name(name);
        profile
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get_string("name")
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.0.set_property("name", name.into());
    }

    pub fn description(&self) -> Option<&str> {
        self.0.get_string("description")
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.0.set_optional_string("description", description);
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.set_description(Some(description.into()));
        self
    }
}

/// An Okta group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group(Resource);

resource_wrapper!(Group);

impl Group {
    /// A new group to be created with the given profile
    pub fn new(profile: GroupProfile) -> Self {
        let mut group = Self::default();
        group.set_profile(profile);
        group
    }

    pub fn id(&self) -> Option<&str> {
        self.0.id()
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.0.get_datetime("created")
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.0.get_datetime("lastUpdated")
    }

    pub fn last_membership_updated(&self) -> Option<DateTime<Utc>> {
        self.0.get_datetime("lastMembershipUpdated")
    }

    pub fn object_class(&self) -> Vec<String> {
        self.0.get_string_list("objectClass")
    }

    /// `OKTA_GROUP`, `APP_GROUP` or `BUILT_IN`
    pub fn group_type(&self) -> Option<&str> {
        self.0.get_string("type")
    }

    pub fn profile(&self) -> Option<GroupProfile> {
        self.0.get_resource("profile")
    }

    pub fn set_profile(&mut self, profile: GroupProfile) {
        self.0.set_property("profile", profile.to_json());
    }
}
