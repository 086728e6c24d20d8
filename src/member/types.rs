//! Member modifier flags, visibility, and the enumeration filter.
//!
//! Weaving does not inspect naming conventions or attributes at run time; every member
//! description carries explicit tags. [`MemberModifiers`] holds the registration-time tags
//! the filtering policy consults, [`Visibility`] is the two-state visibility of a member,
//! and [`MemberFilter`] expresses which declared members an enumeration pass admits.

use bitflags::bitflags;

use crate::member::MemberDescriptor;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Registration-time tags of a described member
    pub struct MemberModifiers: u32 {
        /// Defined on the type, else per instance
        const STATIC = 0x0001;
        /// Synthesized by a compiler rather than declared by hand
        const COMPILER_GENERATED = 0x0002;
        /// Backs a property or indexer accessor
        const ACCESSOR = 0x0004;
        /// Produces a lazily-consumed sequence or other deferred result
        const DEFERRED = 0x0008;
        /// Declared on an ancestor type rather than the described type
        const INHERITED = 0x0010;
    }
}

/// Visibility of a described member.
///
/// Visibility affects only which members an enumeration pass admits, never how an
/// admitted member is intercepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Accessible outside the declaring type
    Public,
    /// Any non-public accessibility level
    NonPublic,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Selects which declared members an enumeration pass admits
    pub struct MemberFilter: u32 {
        /// Admit instance members
        const INSTANCE = 0x0001;
        /// Admit static members
        const STATIC = 0x0002;
        /// Admit public members
        const PUBLIC = 0x0004;
        /// Admit non-public members
        const NON_PUBLIC = 0x0008;
        /// Exclude members inherited from ancestor types
        const DECLARED_ONLY = 0x0010;
    }
}

impl MemberFilter {
    /// The filter weaving uses: instance and static, public and non-public,
    /// declared members only.
    #[must_use]
    pub fn declared() -> Self {
        MemberFilter::INSTANCE
            | MemberFilter::STATIC
            | MemberFilter::PUBLIC
            | MemberFilter::NON_PUBLIC
            | MemberFilter::DECLARED_ONLY
    }

    /// Whether this filter admits the given member description
    #[must_use]
    pub fn admits(&self, descriptor: &MemberDescriptor) -> bool {
        let staticness = if descriptor.is_static() {
            MemberFilter::STATIC
        } else {
            MemberFilter::INSTANCE
        };
        if !self.contains(staticness) {
            return false;
        }

        let visibility = match descriptor.visibility {
            Visibility::Public => MemberFilter::PUBLIC,
            Visibility::NonPublic => MemberFilter::NON_PUBLIC,
        };
        if !self.contains(visibility) {
            return false;
        }

        if self.contains(MemberFilter::DECLARED_ONLY) && descriptor.is_inherited() {
            return false;
        }

        true
    }
}
