//! User resources

use super::{AsResource, Resource};
use crate::types::JsonValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Staged,
    Provisioned,
    Active,
    Recovery,
    PasswordExpired,
    LockedOut,
    Suspended,
    Deprovisioned,
    #[serde(other)]
    Unknown,
}

/// Profile of an Okta user. Custom attributes defined in the org's profile
/// schema are reachable through [`get_custom`](Self::get_custom).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(Resource);

resource_wrapper!(UserProfile);

impl UserProfile {
    /// A profile with the attributes Okta requires to create a user
    pub fn new(
        login: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        let mut profile = Self::default();
        profile.0.set_property("login", login.into());
        profile.0.set_property("email", email.into());
        profile.0.set_property("firstName", first_name.into());
        profile.0.set_property("lastName", last_name.into());
        profile
    }

    pub fn login(&self) -> Option<&str> {
        self.0.get_string("login")
    }

    pub fn set_login(&mut self, login: impl Into<String>) {
        self.0.set_property("login", login.into());
    }

    pub fn email(&self) -> Option<&str> {
        self.0.get_string("email")
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.0.set_property("email", email.into());
    }

    pub fn first_name(&self) -> Option<&str> {
        self.0.get_string("firstName")
    }

    pub fn set_first_name(&mut self, first_name: Option<String>) {
        self.0.set_optional_string("firstName", first_name);
    }

    pub fn last_name(&self) -> Option<&str> {
        self.0.get_string("lastName")
    }

    pub fn set_last_name(&mut self, last_name: Option<String>) {
        self.0.set_optional_string("lastName", last_name);
    }

    pub fn second_email(&self) -> Option<&str> {
        self.0.get_string("secondEmail")
    }

    pub fn set_second_email(&mut self, second_email: Option<String>) {
        self.0.set_optional_string("secondEmail", second_email);
    }

    pub fn mobile_phone(&self) -> Option<&str> {
        self.0.get_string("mobilePhone")
    }

    pub fn set_mobile_phone(&mut self, mobile_phone: Option<String>) {
        self.0.set_optional_string("mobilePhone", mobile_phone);
    }

    pub fn get_custom(&self, key: &str) -> Option<&JsonValue> {
        self.0.get_property(key)
    }

    pub fn set_custom(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.0.set_property(key, value);
    }
}

/// An Okta user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User(Resource);

resource_wrapper!(User);

impl User {
    /// A new user to be created with the given profile
    pub fn new(profile: UserProfile) -> Self {
        let mut user = Self::default();
        user.set_profile(profile);
        user
    }

    pub fn id(&self) -> Option<&str> {
        self.0.id()
    }

    pub fn status(&self) -> Option<UserStatus> {
        self.0
            .get_property("status")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.0.get_datetime("created")
    }

    pub fn activated(&self) -> Option<DateTime<Utc>> {
        self.0.get_datetime("activated")
    }

    pub fn status_changed(&self) -> Option<DateTime<Utc>> {
        self.0.get_datetime("statusChanged")
    }

    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.0.get_datetime("lastLogin")
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.0.get_datetime("lastUpdated")
    }

    pub fn password_changed(&self) -> Option<DateTime<Utc>> {
        self.0.get_datetime("passwordChanged")
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.0.get_resource("profile")
    }

    pub fn set_profile(&mut self, profile: UserProfile) {
        self.0.set_property("profile", profile.to_json());
    }
}
