//! Type descriptions and their fluent builders.
//!
//! A [`TypeDescriptor`] is the registration-side view of one host type: every declared
//! constructor, method, property, and indexer, each paired with its captured
//! implementation. Descriptions are assembled through [`TypeDescriptorBuilder`] and the
//! per-member sub-builders, then handed to [`crate::weaver::Weaver::apply_to_type`].

use std::any::Any;

use crate::interception::{BoxedValue, MemberImpl};
use crate::member::{MemberDescriptor, MemberKind, MemberModifiers, Param, Visibility};
use crate::{Error, Result};

/// Member name under which indexers are described and dispatched
pub const INDEXER_MEMBER: &str = "this";

/// One described member paired with its captured implementation.
pub(crate) struct RegisteredMember {
    pub(crate) descriptor: MemberDescriptor,
    pub(crate) implementation: MemberImpl,
}

/// The declarative description of one host type's callable members.
///
/// A descriptor is inert data: nothing is intercepted until it is woven. Descriptors
/// list all declared members, including those the weaving filter policy will skip
/// (compiler-generated constructors, accessor methods, deferred-sequence methods);
/// exclusion is the weaver's decision, not the description's.
///
/// # Examples
///
/// ```rust
/// use callscope::prelude::*;
///
/// let descriptor = TypeDescriptor::builder("Greeter")
///     .method("Greet", |m| {
///         m.parameter("name").returns("string").body(|_, args| {
///             let name = arg::<&str>(args, 0)?;
///             Ok(Some(boxed(format!("hello {}", name))))
///         })
///     })
///     .build()?;
///
/// assert_eq!(descriptor.name(), "Greeter");
/// assert_eq!(descriptor.member_count(), 1);
/// # Ok::<(), callscope::Error>(())
/// ```
pub struct TypeDescriptor {
    name: String,
    members: Vec<RegisteredMember>,
}

impl TypeDescriptor {
    /// Starts a builder for a type with the given name
    #[must_use]
    pub fn builder(name: &str) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder::new(name)
    }

    /// The described type's name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of described members (property and indexer sides count separately)
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Iterates the member descriptions
    pub fn descriptors(&self) -> impl Iterator<Item = &MemberDescriptor> {
        self.members.iter().map(|member| &member.descriptor)
    }

    pub(crate) fn into_parts(self) -> (String, Vec<RegisteredMember>) {
        (self.name, self.members)
    }
}

struct PendingMember {
    descriptor: MemberDescriptor,
    implementation: Option<MemberImpl>,
}

/// Fluent builder for [`TypeDescriptor`].
///
/// Each member is configured through a sub-builder closure; the sub-builders capture
/// the member's implementation alongside its description.
///
/// # Examples
///
/// ```rust
/// use callscope::prelude::*;
///
/// let descriptor = TypeDescriptor::builder("Counter")
///     .constructor(|c| {
///         c.parameter("start")
///             .body(|args| Ok(Box::new(*arg::<i32>(args, 0)?) as Box<dyn std::any::Any>))
///     })
///     .property("Value", |p| {
///         p.value_type("int")
///             .getter(|receiver, _| Ok(boxed(*receiver_ref::<i32>(receiver)?)))
///     })
///     .build()?;
///
/// assert_eq!(descriptor.member_count(), 2);
/// # Ok::<(), callscope::Error>(())
/// ```
pub struct TypeDescriptorBuilder {
    name: String,
    members: Vec<PendingMember>,
}

impl TypeDescriptorBuilder {
    /// Creates a builder for a type with the given name
    #[must_use]
    pub fn new(name: &str) -> Self {
        TypeDescriptorBuilder {
            name: name.to_string(),
            members: Vec::new(),
        }
    }

    /// Describes a constructor.
    ///
    /// The member name of a constructor is the type name itself.
    #[must_use]
    pub fn constructor<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(ConstructorBuilder) -> ConstructorBuilder,
    {
        let builder = configure(ConstructorBuilder::new());
        self.members.push(PendingMember {
            descriptor: MemberDescriptor {
                declaring_type: self.name.clone(),
                name: self.name.clone(),
                kind: MemberKind::Constructor,
                params: builder.params,
                value_type: None,
                modifiers: builder.modifiers,
                visibility: builder.visibility,
            },
            implementation: builder.implementation.map(MemberImpl::Constructor),
        });
        self
    }

    /// Describes a method.
    #[must_use]
    pub fn method<F>(mut self, name: &str, configure: F) -> Self
    where
        F: FnOnce(MethodBuilder) -> MethodBuilder,
    {
        let builder = configure(MethodBuilder::new());
        self.members.push(PendingMember {
            descriptor: MemberDescriptor {
                declaring_type: self.name.clone(),
                name: name.to_string(),
                kind: MemberKind::Method,
                params: builder.params,
                value_type: builder.value_type,
                modifiers: builder.modifiers,
                visibility: builder.visibility,
            },
            implementation: builder.implementation.map(MemberImpl::Method),
        });
        self
    }

    /// Describes a named property; each configured side becomes its own member.
    #[must_use]
    pub fn property<F>(mut self, name: &str, configure: F) -> Self
    where
        F: FnOnce(PropertyBuilder) -> PropertyBuilder,
    {
        let builder = configure(PropertyBuilder::new());
        let descriptor = |kind| MemberDescriptor {
            declaring_type: self.name.clone(),
            name: name.to_string(),
            kind,
            params: Vec::new(),
            value_type: builder.value_type.clone(),
            modifiers: builder.modifiers,
            visibility: builder.visibility,
        };

        let mut described = false;
        if let Some(getter) = builder.getter {
            self.members.push(PendingMember {
                descriptor: descriptor(MemberKind::PropertyGet),
                implementation: Some(MemberImpl::Getter(getter)),
            });
            described = true;
        }
        if let Some(setter) = builder.setter {
            self.members.push(PendingMember {
                descriptor: descriptor(MemberKind::PropertySet),
                implementation: Some(MemberImpl::Setter(setter)),
            });
            described = true;
        }
        if !described {
            self.members.push(PendingMember {
                descriptor: descriptor(MemberKind::PropertyGet),
                implementation: None,
            });
        }
        self
    }

    /// Describes an indexer; each configured side becomes its own member.
    #[must_use]
    pub fn indexer<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(IndexerBuilder) -> IndexerBuilder,
    {
        let builder = configure(IndexerBuilder::new());
        let descriptor = |kind| MemberDescriptor {
            declaring_type: self.name.clone(),
            name: INDEXER_MEMBER.to_string(),
            kind,
            params: builder.params.clone(),
            value_type: builder.value_type.clone(),
            modifiers: builder.modifiers,
            visibility: builder.visibility,
        };

        let mut described = false;
        if let Some(getter) = builder.getter {
            self.members.push(PendingMember {
                descriptor: descriptor(MemberKind::IndexerGet),
                implementation: Some(MemberImpl::Getter(getter)),
            });
            described = true;
        }
        if let Some(setter) = builder.setter {
            self.members.push(PendingMember {
                descriptor: descriptor(MemberKind::IndexerSet),
                implementation: Some(MemberImpl::Setter(setter)),
            });
            described = true;
        }
        if !described {
            self.members.push(PendingMember {
                descriptor: descriptor(MemberKind::IndexerGet),
                implementation: None,
            });
        }
        self
    }

    /// Finalizes the description.
    ///
    /// # Errors
    ///
    /// [`Error::MissingImplementation`] if any described member did not capture an
    /// implementation.
    pub fn build(self) -> Result<TypeDescriptor> {
        let mut members = Vec::with_capacity(self.members.len());
        for pending in self.members {
            let implementation =
                pending
                    .implementation
                    .ok_or_else(|| Error::MissingImplementation {
                        type_name: pending.descriptor.declaring_type.clone(),
                        member: pending.descriptor.name.clone(),
                    })?;
            members.push(RegisteredMember {
                descriptor: pending.descriptor,
                implementation,
            });
        }
        Ok(TypeDescriptor {
            name: self.name,
            members,
        })
    }
}

/// Sub-builder for one constructor description.
pub struct ConstructorBuilder {
    params: Vec<Param>,
    modifiers: MemberModifiers,
    visibility: Visibility,
    implementation: Option<crate::interception::ConstructorFn>,
}

impl ConstructorBuilder {
    fn new() -> Self {
        ConstructorBuilder {
            params: Vec::new(),
            modifiers: MemberModifiers::empty(),
            visibility: Visibility::Public,
            implementation: None,
        }
    }

    /// Appends a named parameter
    #[must_use]
    pub fn parameter(mut self, name: &str) -> Self {
        let position = self.params.len();
        self.params.push(Param::named(position, name));
        self
    }

    /// Tags the constructor as compiler-synthesized; the weaver will skip it
    #[must_use]
    pub fn compiler_generated(mut self) -> Self {
        self.modifiers |= MemberModifiers::COMPILER_GENERATED;
        self
    }

    /// Makes the constructor non-public
    #[must_use]
    pub fn non_public(mut self) -> Self {
        self.visibility = Visibility::NonPublic;
        self
    }

    /// Captures the constructor's implementation
    #[must_use]
    pub fn body<F>(mut self, implementation: F) -> Self
    where
        F: Fn(&[BoxedValue]) -> Result<Box<dyn Any>> + Send + Sync + 'static,
    {
        self.implementation = Some(Box::new(implementation));
        self
    }
}

/// Sub-builder for one method description.
pub struct MethodBuilder {
    params: Vec<Param>,
    value_type: Option<String>,
    modifiers: MemberModifiers,
    visibility: Visibility,
    implementation: Option<crate::interception::MethodFn>,
}

impl MethodBuilder {
    fn new() -> Self {
        MethodBuilder {
            params: Vec::new(),
            value_type: None,
            modifiers: MemberModifiers::empty(),
            visibility: Visibility::Public,
            implementation: None,
        }
    }

    /// Appends a named parameter
    #[must_use]
    pub fn parameter(mut self, name: &str) -> Self {
        let position = self.params.len();
        self.params.push(Param::named(position, name));
        self
    }

    /// Declares the return type; methods without one are void
    #[must_use]
    pub fn returns(mut self, value_type: &str) -> Self {
        self.value_type = Some(value_type.to_string());
        self
    }

    /// Tags the method as static
    #[must_use]
    pub fn static_member(mut self) -> Self {
        self.modifiers |= MemberModifiers::STATIC;
        self
    }

    /// Tags the method as a property or indexer accessor; the weaver will skip it
    #[must_use]
    pub fn accessor(mut self) -> Self {
        self.modifiers |= MemberModifiers::ACCESSOR;
        self
    }

    /// Tags the method as producing a deferred result; the weaver will skip it
    #[must_use]
    pub fn deferred(mut self) -> Self {
        self.modifiers |= MemberModifiers::DEFERRED;
        self
    }

    /// Tags the method as inherited from an ancestor type
    #[must_use]
    pub fn inherited(mut self) -> Self {
        self.modifiers |= MemberModifiers::INHERITED;
        self
    }

    /// Makes the method non-public
    #[must_use]
    pub fn non_public(mut self) -> Self {
        self.visibility = Visibility::NonPublic;
        self
    }

    /// Captures the method's implementation; return `Ok(None)` from void methods
    #[must_use]
    pub fn body<F>(mut self, implementation: F) -> Self
    where
        F: Fn(Option<&mut dyn Any>, &[BoxedValue]) -> Result<Option<BoxedValue>>
            + Send
            + Sync
            + 'static,
    {
        self.implementation = Some(Box::new(implementation));
        self
    }
}

/// Sub-builder for one property description.
pub struct PropertyBuilder {
    value_type: Option<String>,
    modifiers: MemberModifiers,
    visibility: Visibility,
    getter: Option<crate::interception::GetterFn>,
    setter: Option<crate::interception::SetterFn>,
}

impl PropertyBuilder {
    fn new() -> Self {
        PropertyBuilder {
            value_type: None,
            modifiers: MemberModifiers::empty(),
            visibility: Visibility::Public,
            getter: None,
            setter: None,
        }
    }

    /// Declares the property's value type; omitting it leaves a void description,
    /// which weaving rejects
    #[must_use]
    pub fn value_type(mut self, value_type: &str) -> Self {
        self.value_type = Some(value_type.to_string());
        self
    }

    /// Tags the property as static
    #[must_use]
    pub fn static_member(mut self) -> Self {
        self.modifiers |= MemberModifiers::STATIC;
        self
    }

    /// Makes the property non-public
    #[must_use]
    pub fn non_public(mut self) -> Self {
        self.visibility = Visibility::NonPublic;
        self
    }

    /// Captures the read side's implementation
    #[must_use]
    pub fn getter<F>(mut self, implementation: F) -> Self
    where
        F: Fn(Option<&dyn Any>, &[BoxedValue]) -> Result<BoxedValue> + Send + Sync + 'static,
    {
        self.getter = Some(Box::new(implementation));
        self
    }

    /// Captures the write side's implementation
    #[must_use]
    pub fn setter<F>(mut self, implementation: F) -> Self
    where
        F: Fn(Option<&mut dyn Any>, &[BoxedValue], BoxedValue) -> Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.setter = Some(Box::new(implementation));
        self
    }
}

/// Sub-builder for one indexer description.
pub struct IndexerBuilder {
    params: Vec<Param>,
    value_type: Option<String>,
    modifiers: MemberModifiers,
    visibility: Visibility,
    getter: Option<crate::interception::GetterFn>,
    setter: Option<crate::interception::SetterFn>,
}

impl IndexerBuilder {
    fn new() -> Self {
        IndexerBuilder {
            params: Vec::new(),
            value_type: None,
            modifiers: MemberModifiers::empty(),
            visibility: Visibility::Public,
            getter: None,
            setter: None,
        }
    }

    /// Appends a named index parameter
    #[must_use]
    pub fn parameter(mut self, name: &str) -> Self {
        let position = self.params.len();
        self.params.push(Param::named(position, name));
        self
    }

    /// Declares the indexer's element type; omitting it leaves a void description,
    /// which weaving rejects
    #[must_use]
    pub fn value_type(mut self, value_type: &str) -> Self {
        self.value_type = Some(value_type.to_string());
        self
    }

    /// Makes the indexer non-public
    #[must_use]
    pub fn non_public(mut self) -> Self {
        self.visibility = Visibility::NonPublic;
        self
    }

    /// Captures the read side's implementation; arguments are the index values
    #[must_use]
    pub fn getter<F>(mut self, implementation: F) -> Self
    where
        F: Fn(Option<&dyn Any>, &[BoxedValue]) -> Result<BoxedValue> + Send + Sync + 'static,
    {
        self.getter = Some(Box::new(implementation));
        self
    }

    /// Captures the write side's implementation; the trailing operand is the
    /// assigned value
    #[must_use]
    pub fn setter<F>(mut self, implementation: F) -> Self
    where
        F: Fn(Option<&mut dyn Any>, &[BoxedValue], BoxedValue) -> Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.setter = Some(Box::new(implementation));
        self
    }
}
