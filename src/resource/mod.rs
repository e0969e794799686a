//! Resource model
//!
//! Okta resources are JSON objects with many optional and org-specific
//! properties. [`Resource`] keeps the raw object; typed wrappers such as
//! [`Group`] and [`User`] add named accessors on top of it and serialize
//! back to exactly the same JSON.

/// Implements the wrapper plumbing for a `struct Name(Resource)` newtype
macro_rules! resource_wrapper {
    ($name:ident) => {
        impl From<$crate::resource::Resource> for $name {
            fn from(resource: $crate::resource::Resource) -> Self {
                Self(resource)
            }
        }

        impl $crate::resource::AsResource for $name {
            fn resource(&self) -> &$crate::resource::Resource {
                &self.0
            }

            fn resource_mut(&mut self) -> &mut $crate::resource::Resource {
                &mut self.0
            }
        }
    };
}

mod base;
mod group;
mod user;

pub use base::{AsResource, Resource};
pub use group::{Group, GroupProfile};
pub use user::{User, UserProfile, UserStatus};
