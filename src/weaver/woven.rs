use std::any::Any;
use std::sync::Arc;

use dashmap::DashMap;

use crate::interception::{BoxedValue, MemberImpl, TraceInterceptor};
use crate::member::{BindingId, MemberDescriptor, MemberKind};
use crate::weaver::typedesc::INDEXER_MEMBER;
use crate::{Error, Result};

/// A vector that holds a woven type's bindings in weave order
pub type BindingList = Arc<boxcar::Vec<Arc<MemberBinding>>>;

/// One interception binding: a member description paired with its captured
/// implementation and its weave-time id.
///
/// Bindings are created while a type is woven and immutable afterwards; every later
/// invocation of the member reads the same binding.
pub struct MemberBinding {
    id: BindingId,
    descriptor: MemberDescriptor,
    implementation: MemberImpl,
}

impl MemberBinding {
    pub(crate) fn new(
        id: BindingId,
        descriptor: MemberDescriptor,
        implementation: MemberImpl,
    ) -> Self {
        MemberBinding {
            id,
            descriptor,
            implementation,
        }
    }

    /// The binding's weave-time id
    #[must_use]
    pub fn id(&self) -> BindingId {
        self.id
    }

    /// The bound member's description
    #[must_use]
    pub fn descriptor(&self) -> &MemberDescriptor {
        &self.descriptor
    }

    pub(crate) fn implementation(&self) -> &MemberImpl {
        &self.implementation
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DispatchKey {
    kind: MemberKind,
    name: String,
    arity: usize,
}

impl DispatchKey {
    fn of(descriptor: &MemberDescriptor) -> Self {
        DispatchKey {
            kind: descriptor.kind,
            name: descriptor.name.clone(),
            arity: descriptor.arity(),
        }
    }
}

/// A type whose members route through interception.
///
/// This is the sole indirection point: application code invokes the type's bound
/// members through the operations below instead of calling the implementations
/// directly, and every operation brackets the real call with the two trace lines.
/// Members the weaving filter policy excluded have no binding here; looking them up
/// fails with [`Error::MemberNotFound`], which is how the policy is observable.
///
/// Members are dispatched by kind, name, and arity; overloads that differ in
/// parameter count coexist. Static members are invoked with no receiver.
pub struct WovenType {
    name: String,
    bindings: BindingList,
    dispatch: DashMap<DispatchKey, Arc<MemberBinding>>,
    interceptor: Arc<TraceInterceptor>,
}

impl WovenType {
    pub(crate) fn new(name: String, interceptor: Arc<TraceInterceptor>) -> Self {
        WovenType {
            name,
            bindings: Arc::new(boxcar::Vec::new()),
            dispatch: DashMap::new(),
            interceptor,
        }
    }

    pub(crate) fn insert(&self, binding: Arc<MemberBinding>) -> Result<()> {
        let key = DispatchKey::of(binding.descriptor());
        match self.dispatch.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(Error::DuplicateBinding {
                type_name: self.name.clone(),
                member: binding.descriptor().name.clone(),
                kind: binding.descriptor().kind,
            }),
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(binding.clone());
                self.bindings.push(binding);
                Ok(())
            }
        }
    }

    /// The woven type's name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of interception bindings on this type
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings.count()
    }

    /// Iterates the bindings in weave order
    pub fn bindings(&self) -> impl Iterator<Item = &Arc<MemberBinding>> {
        self.bindings.iter().map(|(_, binding)| binding)
    }

    /// Whether a binding exists for the given kind, member name, and arity
    #[must_use]
    pub fn has_binding(&self, kind: MemberKind, name: &str, arity: usize) -> bool {
        self.dispatch.contains_key(&DispatchKey {
            kind,
            name: name.to_string(),
            arity,
        })
    }

    /// Invokes the bound constructor matching the argument count.
    ///
    /// # Errors
    ///
    /// [`Error::MemberNotFound`] if no constructor of that arity is bound; otherwise
    /// whatever the implementation raises.
    pub fn construct(&self, args: &[BoxedValue]) -> Result<Box<dyn Any>> {
        let binding = self.lookup(MemberKind::Constructor, &self.name, args.len())?;
        match binding.implementation() {
            MemberImpl::Constructor(implementation) => {
                self.interceptor
                    .constructor(binding.descriptor(), args, implementation)
            }
            _ => unreachable!("constructor binding carries a non-constructor implementation"),
        }
    }

    /// Invokes a bound method by name and argument count.
    ///
    /// # Errors
    ///
    /// [`Error::MemberNotFound`] if no such method is bound; otherwise whatever the
    /// implementation raises.
    pub fn call(
        &self,
        receiver: Option<&mut dyn Any>,
        name: &str,
        args: &[BoxedValue],
    ) -> Result<Option<BoxedValue>> {
        let binding = self.lookup(MemberKind::Method, name, args.len())?;
        match binding.implementation() {
            MemberImpl::Method(implementation) => {
                self.interceptor
                    .method(binding.descriptor(), receiver, args, implementation)
            }
            _ => unreachable!("method binding carries a non-method implementation"),
        }
    }

    /// Reads a bound property.
    ///
    /// # Errors
    ///
    /// [`Error::MemberNotFound`] if the property's read side is not bound; otherwise
    /// whatever the implementation raises.
    pub fn property_get(&self, receiver: Option<&dyn Any>, name: &str) -> Result<BoxedValue> {
        let binding = self.lookup(MemberKind::PropertyGet, name, 0)?;
        match binding.implementation() {
            MemberImpl::Getter(implementation) => {
                self.interceptor
                    .property_get(binding.descriptor(), receiver, implementation)
            }
            _ => unreachable!("property-get binding carries a non-getter implementation"),
        }
    }

    /// Writes a bound property.
    ///
    /// # Errors
    ///
    /// [`Error::MemberNotFound`] if the property's write side is not bound; otherwise
    /// whatever the implementation raises.
    pub fn property_set(
        &self,
        receiver: Option<&mut dyn Any>,
        name: &str,
        value: BoxedValue,
    ) -> Result<()> {
        let binding = self.lookup(MemberKind::PropertySet, name, 0)?;
        match binding.implementation() {
            MemberImpl::Setter(implementation) => {
                self.interceptor
                    .property_set(binding.descriptor(), receiver, value, implementation)
            }
            _ => unreachable!("property-set binding carries a non-setter implementation"),
        }
    }

    /// Reads the bound indexer matching the index argument count.
    ///
    /// # Errors
    ///
    /// [`Error::MemberNotFound`] if no indexer read side of that arity is bound;
    /// otherwise whatever the implementation raises.
    pub fn indexer_get(&self, receiver: Option<&dyn Any>, args: &[BoxedValue]) -> Result<BoxedValue> {
        let binding = self.lookup(MemberKind::IndexerGet, INDEXER_MEMBER, args.len())?;
        match binding.implementation() {
            MemberImpl::Getter(implementation) => {
                self.interceptor
                    .indexer_get(binding.descriptor(), receiver, args, implementation)
            }
            _ => unreachable!("indexer-get binding carries a non-getter implementation"),
        }
    }

    /// Writes the bound indexer matching the index argument count.
    ///
    /// # Errors
    ///
    /// [`Error::MemberNotFound`] if no indexer write side of that arity is bound;
    /// otherwise whatever the implementation raises.
    pub fn indexer_set(
        &self,
        receiver: Option<&mut dyn Any>,
        args: &[BoxedValue],
        value: BoxedValue,
    ) -> Result<()> {
        let binding = self.lookup(MemberKind::IndexerSet, INDEXER_MEMBER, args.len())?;
        match binding.implementation() {
            MemberImpl::Setter(implementation) => {
                self.interceptor
                    .indexer_set(binding.descriptor(), receiver, args, value, implementation)
            }
            _ => unreachable!("indexer-set binding carries a non-setter implementation"),
        }
    }

    fn lookup(&self, kind: MemberKind, name: &str, arity: usize) -> Result<Arc<MemberBinding>> {
        self.dispatch
            .get(&DispatchKey {
                kind,
                name: name.to_string(),
                arity,
            })
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::MemberNotFound {
                type_name: self.name.clone(),
                member: name.to_string(),
                kind,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interception::{boxed, BufferSink};
    use crate::member::{MemberModifiers, Param, Visibility};

    fn woven() -> WovenType {
        let sink = Arc::new(BufferSink::new());
        WovenType::new(
            "Sample".to_string(),
            Arc::new(TraceInterceptor::new(sink)),
        )
    }

    fn method_binding(name: &str, arity: usize, sequence: u32) -> Arc<MemberBinding> {
        let params = (0..arity).map(Param::anonymous).collect();
        Arc::new(MemberBinding::new(
            BindingId::new(MemberKind::Method, sequence),
            MemberDescriptor {
                declaring_type: "Sample".to_string(),
                name: name.to_string(),
                kind: MemberKind::Method,
                params,
                value_type: Some("int".to_string()),
                modifiers: MemberModifiers::empty(),
                visibility: Visibility::Public,
            },
            MemberImpl::Method(Box::new(|_, _| Ok(Some(boxed(1_i32))))),
        ))
    }

    #[test]
    fn test_insert_and_dispatch() {
        let woven = woven();
        woven.insert(method_binding("Run", 0, 1)).unwrap();

        assert_eq!(woven.binding_count(), 1);
        assert!(woven.has_binding(MemberKind::Method, "Run", 0));

        let result = woven.call(None, "Run", &[]).unwrap().unwrap();
        assert_eq!(result.to_string(), "1");
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let woven = woven();
        woven.insert(method_binding("Run", 0, 1)).unwrap();
        let error = woven.insert(method_binding("Run", 0, 2)).unwrap_err();

        assert!(matches!(error, Error::DuplicateBinding { .. }));
        assert_eq!(woven.binding_count(), 1);
    }

    #[test]
    fn test_overloads_by_arity_coexist() {
        let woven = woven();
        woven.insert(method_binding("Run", 0, 1)).unwrap();
        woven.insert(method_binding("Run", 2, 2)).unwrap();

        assert!(woven.has_binding(MemberKind::Method, "Run", 0));
        assert!(woven.has_binding(MemberKind::Method, "Run", 2));
    }

    #[test]
    fn test_missing_member_lookup() {
        let woven = woven();
        let error = woven.call(None, "Absent", &[]).err().unwrap();

        assert!(matches!(
            error,
            Error::MemberNotFound {
                kind: MemberKind::Method,
                ..
            }
        ));
    }
}
