//! Type weaving: enumeration, filtering, and binding registration.
//!
//! The [`Weaver`] is the type-preparation side of the crate. Applied to a
//! [`TypeDescriptor`] it enumerates the declared members under the full member filter,
//! applies the filtering policy, and registers exactly one interception binding per
//! qualifying member. The resulting [`WovenType`] is the indirection point application
//! code calls afterwards.
//!
//! # Key Types
//!
//! - [`Weaver`] - Applies interception to described types, once per type
//! - [`TypeDescriptor`] / [`TypeDescriptorBuilder`] - The registration surface
//! - [`WovenType`] - A type whose members route through interception
//! - [`WeaveStats`] - Per-kind binding counts across all woven types
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use callscope::prelude::*;
//!
//! let sink = Arc::new(BufferSink::new());
//! let weaver = Weaver::new(sink.clone());
//!
//! let descriptor = TypeDescriptor::builder("Echo")
//!     .method("Repeat", |m| {
//!         m.parameter("word").returns("string").body(|_, args| {
//!             Ok(Some(boxed(arg::<&str>(args, 0)?.to_string())))
//!         })
//!     })
//!     .build()?;
//!
//! let woven = weaver.apply_to_type(descriptor)?;
//! let result = woven.call(None, "Repeat", &[boxed("hi")])?.unwrap();
//!
//! assert_eq!(result.to_string(), "hi");
//! assert_eq!(
//!     sink.lines(),
//!     vec![
//!         "Entering Echo.Repeat(hi)".to_string(),
//!         "Exiting Echo.Repeat(hi) with result hi".to_string(),
//!     ]
//! );
//! # Ok::<(), callscope::Error>(())
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;
use strum::{EnumCount, IntoEnumIterator};

use crate::interception::{TraceInterceptor, TraceSink, TracingSink};
use crate::member::{BindingId, MemberFilter, MemberKind};
use crate::{Error, Result};

/// Implementation of type descriptions and their builders
pub mod typedesc;
/// Implementation of bindings and the woven-type invocation surface
pub mod woven;

pub use typedesc::{
    ConstructorBuilder, IndexerBuilder, MethodBuilder, PropertyBuilder, TypeDescriptor,
    TypeDescriptorBuilder, INDEXER_MEMBER,
};
pub use woven::{BindingList, MemberBinding, WovenType};

/// A map that holds the mapping of [`BindingId`] to registered [`MemberBinding`]
pub type BindingMap = SkipMap<BindingId, Arc<MemberBinding>>;

/// Applies interception to described types.
///
/// One weaver owns one interceptor (and through it, one trace sink) and keeps the
/// registry of everything it has woven: an ordered map of all bindings by id and the
/// woven types by name. Weaving happens once per type, before application code uses
/// the type; afterwards the registry is only read.
pub struct Weaver {
    interceptor: Arc<TraceInterceptor>,
    bindings: BindingMap,
    types: DashMap<String, Arc<WovenType>>,
    sequence: AtomicU32,
}

impl Weaver {
    /// Creates a weaver whose interceptor writes to the given sink
    #[must_use]
    pub fn new(sink: Arc<dyn TraceSink>) -> Self {
        Weaver {
            interceptor: Arc::new(TraceInterceptor::new(sink)),
            bindings: SkipMap::new(),
            types: DashMap::new(),
            sequence: AtomicU32::new(0),
        }
    }

    /// Registers interception bindings for every qualifying member of the described
    /// type and returns the woven type.
    ///
    /// The member filter admits instance and static, public and non-public, declared
    /// members. On top of the filter, the policy skips:
    /// - compiler-generated constructors,
    /// - accessor methods (their property or indexer is wrapped instead, so one
    ///   logical access produces one pair of trace lines, not two),
    /// - deferred-sequence methods (an `Exiting` line before the sequence is consumed
    ///   would misrepresent timing).
    ///
    /// # Errors
    ///
    /// - [`Error::TypeAlreadyWoven`] if the type name was woven before
    /// - [`Error::VoidValueType`] if a property or indexer reports no value type
    /// - [`Error::DuplicateBinding`] if the description registers a member twice
    ///
    /// A failed weave publishes nothing: no binding of the faulty description becomes
    /// callable and no trace line is emitted.
    pub fn apply_to_type(&self, descriptor: TypeDescriptor) -> Result<Arc<WovenType>> {
        if self.types.contains_key(descriptor.name()) {
            return Err(Error::TypeAlreadyWoven(descriptor.name().to_string()));
        }

        let filter = MemberFilter::declared();
        let (name, members) = descriptor.into_parts();
        let woven = WovenType::new(name.clone(), self.interceptor.clone());
        let mut staged = Vec::new();

        for member in members {
            let desc = &member.descriptor;
            if !filter.admits(desc) {
                continue;
            }
            match desc.kind {
                MemberKind::Constructor if desc.is_compiler_generated() => continue,
                MemberKind::Method if desc.is_accessor() || desc.is_deferred() => continue,
                _ => {}
            }
            if desc.kind.requires_value_type() && desc.is_void() {
                return Err(Error::VoidValueType {
                    type_name: desc.declaring_type.clone(),
                    member: desc.name.clone(),
                });
            }

            let id = BindingId::new(desc.kind, self.next_sequence());
            let binding = Arc::new(woven::MemberBinding::new(
                id,
                member.descriptor,
                member.implementation,
            ));
            woven.insert(binding.clone())?;
            staged.push(binding);
        }

        let woven = Arc::new(woven);
        match self.types.entry(name) {
            dashmap::mapref::entry::Entry::Occupied(entry) => {
                return Err(Error::TypeAlreadyWoven(entry.key().clone()));
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(woven.clone());
            }
        }
        for binding in staged {
            self.bindings.insert(binding.id(), binding);
        }

        Ok(woven)
    }

    /// Looks up a woven type by name
    #[must_use]
    pub fn woven_type(&self, name: &str) -> Option<Arc<WovenType>> {
        self.types.get(name).map(|entry| entry.value().clone())
    }

    /// Looks up a binding by id
    #[must_use]
    pub fn binding(&self, id: BindingId) -> Option<Arc<MemberBinding>> {
        self.bindings.get(&id).map(|entry| entry.value().clone())
    }

    /// Number of bindings across all woven types
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Per-kind binding counts across all woven types
    #[must_use]
    pub fn stats(&self) -> WeaveStats {
        let mut counts = [0_usize; MemberKind::COUNT];
        for entry in self.bindings.iter() {
            if let Some(kind) = entry.key().kind() {
                counts[usize::from(kind.tag()) - 1] += 1;
            }
        }
        WeaveStats { counts }
    }

    fn next_sequence(&self) -> u32 {
        self.sequence.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl Default for Weaver {
    fn default() -> Self {
        Weaver::new(Arc::new(TracingSink::new()))
    }
}

/// Per-kind binding counts across everything a weaver has woven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaveStats {
    counts: [usize; MemberKind::COUNT],
}

impl WeaveStats {
    /// Number of bindings of the given kind
    #[must_use]
    pub fn bound(&self, kind: MemberKind) -> usize {
        self.counts[usize::from(kind.tag()) - 1]
    }

    /// Total number of bindings
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl fmt::Display for WeaveStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for kind in MemberKind::iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", kind, self.bound(kind))?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interception::{boxed, BufferSink};
    use std::any::Any;

    fn weaver() -> (Weaver, Arc<BufferSink>) {
        let sink = Arc::new(BufferSink::new());
        (Weaver::new(sink.clone()), sink)
    }

    fn sample_descriptor() -> TypeDescriptor {
        TypeDescriptor::builder("Sample")
            .constructor(|c| c.body(|_| Ok(Box::new(()) as Box<dyn Any>)))
            .method("Run", |m| m.returns("int").body(|_, _| Ok(Some(boxed(1_i32)))))
            .build()
            .unwrap()
    }

    #[test]
    fn test_apply_to_type_binds_members() {
        let (weaver, _) = weaver();
        let woven = weaver.apply_to_type(sample_descriptor()).unwrap();

        assert_eq!(woven.binding_count(), 2);
        assert!(woven.has_binding(MemberKind::Constructor, "Sample", 0));
        assert!(woven.has_binding(MemberKind::Method, "Run", 0));
        assert_eq!(weaver.binding_count(), 2);
    }

    #[test]
    fn test_weaving_twice_rejected() {
        let (weaver, _) = weaver();
        weaver.apply_to_type(sample_descriptor()).unwrap();
        let error = weaver.apply_to_type(sample_descriptor()).err().unwrap();

        assert!(matches!(error, Error::TypeAlreadyWoven(name) if name == "Sample"));
    }

    #[test]
    fn test_compiler_generated_constructor_skipped() {
        let (weaver, _) = weaver();
        let descriptor = TypeDescriptor::builder("Implicit")
            .constructor(|c| {
                c.compiler_generated()
                    .body(|_| Ok(Box::new(()) as Box<dyn Any>))
            })
            .build()
            .unwrap();

        let woven = weaver.apply_to_type(descriptor).unwrap();
        assert_eq!(woven.binding_count(), 0);
        assert!(!woven.has_binding(MemberKind::Constructor, "Implicit", 0));
    }

    #[test]
    fn test_accessor_and_deferred_methods_skipped() {
        let (weaver, _) = weaver();
        let descriptor = TypeDescriptor::builder("Filtered")
            .method("get_X", |m| {
                m.returns("int").accessor().body(|_, _| Ok(None))
            })
            .method("Numbers", |m| {
                m.returns("seq").deferred().body(|_, _| Ok(None))
            })
            .method("Plain", |m| m.body(|_, _| Ok(None)))
            .build()
            .unwrap();

        let woven = weaver.apply_to_type(descriptor).unwrap();
        assert_eq!(woven.binding_count(), 1);
        assert!(woven.has_binding(MemberKind::Method, "Plain", 0));
        assert!(!woven.has_binding(MemberKind::Method, "get_X", 0));
        assert!(!woven.has_binding(MemberKind::Method, "Numbers", 0));
    }

    #[test]
    fn test_inherited_member_excluded_by_declared_filter() {
        let (weaver, _) = weaver();
        let descriptor = TypeDescriptor::builder("Derived")
            .method("FromBase", |m| m.inherited().body(|_, _| Ok(None)))
            .build()
            .unwrap();

        let woven = weaver.apply_to_type(descriptor).unwrap();
        assert_eq!(woven.binding_count(), 0);
    }

    #[test]
    fn test_void_property_aborts_weaving() {
        let (weaver, sink) = weaver();
        let descriptor = TypeDescriptor::builder("Broken")
            .property("X", |p| p.getter(|_, _| Ok(boxed(0_i32))))
            .build()
            .unwrap();

        let error = weaver.apply_to_type(descriptor).err().unwrap();

        assert!(matches!(error, Error::VoidValueType { .. }));
        assert!(sink.lines().is_empty());
        assert!(weaver.woven_type("Broken").is_none());
    }

    #[test]
    fn test_binding_ids_registered_globally() {
        let (weaver, _) = weaver();
        let woven = weaver.apply_to_type(sample_descriptor()).unwrap();

        for binding in woven.bindings() {
            let registered = weaver.binding(binding.id()).unwrap();
            assert_eq!(registered.descriptor().name, binding.descriptor().name);
        }
    }

    #[test]
    fn test_stats_count_per_kind() {
        let (weaver, _) = weaver();
        weaver.apply_to_type(sample_descriptor()).unwrap();
        let descriptor = TypeDescriptor::builder("WithProperty")
            .property("X", |p| {
                p.value_type("int")
                    .getter(|_, _| Ok(boxed(0_i32)))
                    .setter(|_, _, _| Ok(()))
            })
            .build()
            .unwrap();
        weaver.apply_to_type(descriptor).unwrap();

        let stats = weaver.stats();
        assert_eq!(stats.bound(MemberKind::Constructor), 1);
        assert_eq!(stats.bound(MemberKind::Method), 1);
        assert_eq!(stats.bound(MemberKind::PropertyGet), 1);
        assert_eq!(stats.bound(MemberKind::PropertySet), 1);
        assert_eq!(stats.total(), 4);
    }

    #[test]
    fn test_stats_display() {
        let (weaver, _) = weaver();
        weaver.apply_to_type(sample_descriptor()).unwrap();
        let rendered = weaver.stats().to_string();

        assert!(rendered.contains("Constructor: 1"));
        assert!(rendered.contains("Method: 1"));
        assert!(rendered.contains("IndexerSet: 0"));
    }
}
