use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::interception::{
    invoke::{ConstructorFn, GetterFn, MethodFn, SetterFn},
    record::CallRecord,
    sink::TraceSink,
    value::BoxedValue,
};
use crate::member::MemberDescriptor;
use crate::{Error, Result};

/// The stateless call interception strategy.
///
/// One interceptor serves every binding of a weaver. Per invocation it builds a
/// [`CallRecord`], emits `Entering {description}`, delegates to the captured
/// implementation, emits `Exiting {description}` (with the result appended for
/// result-bearing kinds), and returns whatever the implementation produced, unchanged.
///
/// The interceptor holds no state beyond a shared handle to the trace sink: it does
/// not alter arguments, does not retry, and does not catch failures. An `Err` from
/// the implementation propagates to the caller and the `Exiting` line is not emitted,
/// so an `Entering` line with no matching `Exiting` line marks an abnormally
/// terminated call in the trace stream.
pub struct TraceInterceptor {
    sink: Arc<dyn TraceSink>,
}

impl TraceInterceptor {
    /// Creates an interceptor writing to the given sink
    #[must_use]
    pub fn new(sink: Arc<dyn TraceSink>) -> Self {
        TraceInterceptor { sink }
    }

    /// The sink this interceptor writes to
    #[must_use]
    pub fn sink(&self) -> &Arc<dyn TraceSink> {
        &self.sink
    }

    /// Intercepts a constructor call.
    ///
    /// The new instance passes through without being logged; constructors have no
    /// result in the trace stream.
    ///
    /// # Errors
    ///
    /// Whatever the captured implementation raises, unchanged.
    pub fn constructor(
        &self,
        descriptor: &MemberDescriptor,
        args: &[BoxedValue],
        implementation: &ConstructorFn,
    ) -> Result<Box<dyn Any>> {
        let record = CallRecord::invocation(&descriptor.declaring_type, &descriptor.name, args);

        self.enter(&record);

        let instance = implementation(args)?;

        self.exit(&record);

        Ok(instance)
    }

    /// Intercepts a method call.
    ///
    /// A `Some` result is logged on the `Exiting` line and returned unchanged; a
    /// `None` result marks a void method and exits without a result clause.
    ///
    /// # Errors
    ///
    /// Whatever the captured implementation raises, unchanged.
    pub fn method(
        &self,
        descriptor: &MemberDescriptor,
        receiver: Option<&mut dyn Any>,
        args: &[BoxedValue],
        implementation: &MethodFn,
    ) -> Result<Option<BoxedValue>> {
        let record = CallRecord::invocation(&descriptor.declaring_type, &descriptor.name, args);

        self.enter(&record);

        let result = implementation(receiver, args)?;

        match &result {
            Some(value) => self.exit_with(&record, &**value),
            None => self.exit(&record),
        }

        Ok(result)
    }

    /// Intercepts a property read.
    ///
    /// # Errors
    ///
    /// [`Error::VoidValueType`] if the descriptor reports no value type (raised before
    /// any trace line is emitted); otherwise whatever the implementation raises.
    pub fn property_get(
        &self,
        descriptor: &MemberDescriptor,
        receiver: Option<&dyn Any>,
        implementation: &GetterFn,
    ) -> Result<BoxedValue> {
        Self::ensure_value_type(descriptor)?;

        let record = CallRecord::property_get(&descriptor.declaring_type, &descriptor.name);

        self.enter(&record);

        let value = implementation(receiver, &[])?;

        self.exit_with(&record, &*value);

        Ok(value)
    }

    /// Intercepts a property write.
    ///
    /// # Errors
    ///
    /// [`Error::VoidValueType`] if the descriptor reports no value type (raised before
    /// any trace line is emitted); otherwise whatever the implementation raises.
    pub fn property_set(
        &self,
        descriptor: &MemberDescriptor,
        receiver: Option<&mut dyn Any>,
        value: BoxedValue,
        implementation: &SetterFn,
    ) -> Result<()> {
        Self::ensure_value_type(descriptor)?;

        let record =
            CallRecord::property_set(&descriptor.declaring_type, &descriptor.name, &*value);

        self.enter(&record);

        implementation(receiver, &[], value)?;

        self.exit(&record);

        Ok(())
    }

    /// Intercepts an indexer read.
    ///
    /// # Errors
    ///
    /// [`Error::VoidValueType`] if the descriptor reports no value type (raised before
    /// any trace line is emitted); otherwise whatever the implementation raises.
    pub fn indexer_get(
        &self,
        descriptor: &MemberDescriptor,
        receiver: Option<&dyn Any>,
        args: &[BoxedValue],
        implementation: &GetterFn,
    ) -> Result<BoxedValue> {
        Self::ensure_value_type(descriptor)?;

        let record = CallRecord::indexer_get(&descriptor.declaring_type, args);

        self.enter(&record);

        let value = implementation(receiver, args)?;

        self.exit_with(&record, &*value);

        Ok(value)
    }

    /// Intercepts an indexer write.
    ///
    /// # Errors
    ///
    /// [`Error::VoidValueType`] if the descriptor reports no value type (raised before
    /// any trace line is emitted); otherwise whatever the implementation raises.
    pub fn indexer_set(
        &self,
        descriptor: &MemberDescriptor,
        receiver: Option<&mut dyn Any>,
        args: &[BoxedValue],
        value: BoxedValue,
        implementation: &SetterFn,
    ) -> Result<()> {
        Self::ensure_value_type(descriptor)?;

        let record = CallRecord::indexer_set(&descriptor.declaring_type, args, &*value);

        self.enter(&record);

        implementation(receiver, args, value)?;

        self.exit(&record);

        Ok(())
    }

    fn ensure_value_type(descriptor: &MemberDescriptor) -> Result<()> {
        if descriptor.is_void() {
            return Err(Error::VoidValueType {
                type_name: descriptor.declaring_type.clone(),
                member: descriptor.name.clone(),
            });
        }
        Ok(())
    }

    fn enter(&self, record: &CallRecord) {
        self.sink.write_line(&format!("Entering {}", record));
    }

    fn exit(&self, record: &CallRecord) {
        self.sink.write_line(&format!("Exiting {}", record));
    }

    fn exit_with<D: fmt::Display + ?Sized>(&self, record: &CallRecord, result: &D) {
        self.sink
            .write_line(&format!("Exiting {} with result {}", record, result));
    }
}
