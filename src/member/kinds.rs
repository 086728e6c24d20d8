use strum::{Display, EnumCount, EnumIter, FromRepr};

/// The kind tag of a registered member.
///
/// Every interception binding carries an explicit kind rather than inferring the member's
/// role from naming conventions: the kind selects the implementation shape that was captured
/// at registration time and the formatting convention its call records use. The discriminant
/// is the one-byte tag embedded in the high byte of a [`crate::member::BindingId`].
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, FromRepr)]
#[repr(u8)]
pub enum MemberKind {
    /// An instance constructor; its call record uses the declaring type as the member name
    Constructor = 0x01,
    /// An ordinary method, void or result-bearing
    Method = 0x02,
    /// The read side of a named property
    PropertyGet = 0x03,
    /// The write side of a named property
    PropertySet = 0x04,
    /// The read side of an indexer
    IndexerGet = 0x05,
    /// The write side of an indexer
    IndexerSet = 0x06,
}

impl MemberKind {
    /// Returns the one-byte tag used inside [`crate::member::BindingId`]
    #[must_use]
    pub fn tag(&self) -> u8 {
        *self as u8
    }

    /// Resolves a kind from its one-byte tag, `None` for unknown tags
    #[must_use]
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::from_repr(tag)
    }

    /// Returns true for the two property kinds
    #[must_use]
    pub fn is_property(&self) -> bool {
        matches!(self, MemberKind::PropertyGet | MemberKind::PropertySet)
    }

    /// Returns true for the two indexer kinds
    #[must_use]
    pub fn is_indexer(&self) -> bool {
        matches!(self, MemberKind::IndexerGet | MemberKind::IndexerSet)
    }

    /// Returns true for kinds whose descriptor must carry a non-void value type
    #[must_use]
    pub fn requires_value_type(&self) -> bool {
        self.is_property() || self.is_indexer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn test_tag_round_trip() {
        for kind in MemberKind::iter() {
            assert_eq!(MemberKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_tags_rejected() {
        assert_eq!(MemberKind::from_tag(0x00), None);
        assert_eq!(MemberKind::from_tag(0x07), None);
        assert_eq!(MemberKind::from_tag(0xFF), None);
    }

    #[test]
    fn test_kind_count() {
        assert_eq!(MemberKind::COUNT, 6);
        assert_eq!(MemberKind::iter().count(), MemberKind::COUNT);
    }

    #[test]
    fn test_value_type_requirements() {
        assert!(MemberKind::PropertyGet.requires_value_type());
        assert!(MemberKind::PropertySet.requires_value_type());
        assert!(MemberKind::IndexerGet.requires_value_type());
        assert!(MemberKind::IndexerSet.requires_value_type());
        assert!(!MemberKind::Constructor.requires_value_type());
        assert!(!MemberKind::Method.requires_value_type());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(MemberKind::Constructor.to_string(), "Constructor");
        assert_eq!(MemberKind::PropertySet.to_string(), "PropertySet");
        assert_eq!(MemberKind::IndexerGet.to_string(), "IndexerGet");
    }
}
