use std::fmt;

use crate::member::MemberKind;

/// A handle identifying one interception binding.
///
/// Binding ids are 32-bit values where:
/// - The high byte (bits 24-31) is the member kind tag
/// - The low 24 bits (bits 0-23) are a sequence number assigned at weave time
///
/// Ids are allocated once while a type is woven and are stable for the life of the
/// process; the ordered binding map of the weaver is keyed by them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BindingId(u32);

impl BindingId {
    /// Creates a binding id from a kind tag and a weave-time sequence number.
    ///
    /// The sequence number is truncated to 24 bits.
    #[must_use]
    pub fn new(kind: MemberKind, sequence: u32) -> Self {
        BindingId((u32::from(kind.tag()) << 24) | (sequence & 0x00FF_FFFF))
    }

    /// Returns the raw 32-bit value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the member kind from the high byte, `None` for corrupt values
    #[must_use]
    pub fn kind(&self) -> Option<MemberKind> {
        MemberKind::from_tag((self.0 >> 24) as u8)
    }

    /// Extracts the weave-time sequence number from the low 24 bits
    #[must_use]
    pub fn sequence(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }
}

impl fmt::Debug for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BindingId(0x{:08x}, kind: 0x{:02x}, sequence: {})",
            self.0,
            self.0 >> 24,
            self.sequence()
        )
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_packs_kind_and_sequence() {
        let id = BindingId::new(MemberKind::Method, 5);
        assert_eq!(id.value(), 0x02000005);
        assert_eq!(id.kind(), Some(MemberKind::Method));
        assert_eq!(id.sequence(), 5);
    }

    #[test]
    fn test_sequence_truncated_to_24_bits() {
        let id = BindingId::new(MemberKind::Constructor, 0xFFFF_FFFF);
        assert_eq!(id.kind(), Some(MemberKind::Constructor));
        assert_eq!(id.sequence(), 0x00FF_FFFF);
    }

    #[test]
    fn test_kind_rejects_corrupt_high_byte() {
        let id = BindingId(0x7F000001);
        assert_eq!(id.kind(), None);
    }

    #[test]
    fn test_ordering_groups_by_kind() {
        let ctor = BindingId::new(MemberKind::Constructor, 9);
        let method = BindingId::new(MemberKind::Method, 1);
        let getter = BindingId::new(MemberKind::PropertyGet, 1);
        assert!(ctor < method);
        assert!(method < getter);
    }

    #[test]
    fn test_display() {
        let id = BindingId::new(MemberKind::PropertySet, 1);
        assert_eq!(format!("{}", id), "0x04000001");
    }

    #[test]
    fn test_debug_contains_fields() {
        let id = BindingId::new(MemberKind::IndexerGet, 3);
        let debug = format!("{:?}", id);
        assert!(debug.contains("0x05000003"));
        assert!(debug.contains("sequence: 3"));
    }
}
