//! Member descriptions and binding identity.
//!
//! This module holds the data model of the interception layer: what a declared member
//! looks like ([`MemberDescriptor`]), its explicit kind tag ([`MemberKind`]), the
//! registration-time modifier and filter flags, and the handle that identifies one
//! interception binding ([`BindingId`]).
//!
//! # Key Types
//!
//! - [`MemberDescriptor`] - Immutable description of one declared member
//! - [`MemberKind`] - Explicit kind tag (constructor, method, property/indexer get/set)
//! - [`MemberModifiers`] / [`Visibility`] - Registration-time tags the filter policy reads
//! - [`MemberFilter`] - Which declared members an enumeration pass admits
//! - [`BindingId`] - Kind-tagged handle of one interception binding

/// Implementation of the binding identity handle
pub mod binding;
/// Implementation of the member description record
pub mod descriptor;
/// Implementation of the member kind tag
pub mod kinds;
/// Implementation of modifier, visibility, and filter flags
pub mod types;

pub use binding::BindingId;
pub use descriptor::{MemberDescriptor, Param};
pub use kinds::MemberKind;
pub use types::{MemberFilter, MemberModifiers, Visibility};
