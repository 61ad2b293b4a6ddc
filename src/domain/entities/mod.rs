//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Playground`] - A realm-scoped code playground configuration
//! - [`AuthenticatedUser`] - The resolved identity behind an API request
//! - [`RealmRole`] - Membership role within a realm
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! `NewPlayground` carries the fields of a record before the store assigns
//! its id and timestamp.

pub mod playground;
pub mod user;

pub use playground::{NewPlayground, Playground};
pub use user::{AuthenticatedUser, RealmRole};
