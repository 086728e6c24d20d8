use crate::member::{MemberKind, MemberModifiers, Visibility};

/// A positional parameter of a described member.
///
/// Position is what dispatch and formatting rely on; the name is informational and
/// optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Zero-based position in the parameter list
    pub position: usize,
    /// Declared parameter name, if the description carries one
    pub name: Option<String>,
}

impl Param {
    /// Creates a named parameter at the given position
    #[must_use]
    pub fn named(position: usize, name: &str) -> Self {
        Param {
            position,
            name: Some(name.to_string()),
        }
    }

    /// Creates an unnamed parameter at the given position
    #[must_use]
    pub fn anonymous(position: usize) -> Self {
        Param {
            position,
            name: None,
        }
    }
}

/// The immutable description of one declared member.
///
/// Descriptors are produced by the type description step, consumed by the weaving pass,
/// and kept unchanged behind each interception binding afterwards. The value type is a
/// host-level type label; `None` means void, which is legal only for constructors and
/// void methods; a void property or indexer is a configuration-contract violation.
#[derive(Debug, Clone)]
pub struct MemberDescriptor {
    /// Name of the declaring type
    pub declaring_type: String,
    /// Member name; the declaring type's name for constructors, `this` for indexers
    pub name: String,
    /// The explicit kind tag of this member
    pub kind: MemberKind,
    /// Ordered parameter list; index parameters for indexers
    pub params: Vec<Param>,
    /// Declared value or return type label, `None` for void
    pub value_type: Option<String>,
    /// Registration-time modifier tags
    pub modifiers: MemberModifiers,
    /// Two-state visibility; affects enumeration only
    pub visibility: Visibility,
}

impl MemberDescriptor {
    /// Number of declared parameters; dispatch keys use this as the member's arity
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Whether the member is defined on the type rather than per instance
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(MemberModifiers::STATIC)
    }

    /// Whether the member was synthesized by a compiler
    #[must_use]
    pub fn is_compiler_generated(&self) -> bool {
        self.modifiers.contains(MemberModifiers::COMPILER_GENERATED)
    }

    /// Whether the member backs a property or indexer accessor
    #[must_use]
    pub fn is_accessor(&self) -> bool {
        self.modifiers.contains(MemberModifiers::ACCESSOR)
    }

    /// Whether the member produces a deferred result
    #[must_use]
    pub fn is_deferred(&self) -> bool {
        self.modifiers.contains(MemberModifiers::DEFERRED)
    }

    /// Whether the member is declared on an ancestor type
    #[must_use]
    pub fn is_inherited(&self) -> bool {
        self.modifiers.contains(MemberModifiers::INHERITED)
    }

    /// Whether the description reports no value type
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.value_type.is_none()
    }
}
