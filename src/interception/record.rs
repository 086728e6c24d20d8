use std::fmt;

use crate::interception::value::BoxedValue;

/// The formatted description of one invocation.
///
/// Records are built fresh for every call, feed the two trace lines that bracket the
/// real invocation, and are dropped when the call completes; nothing retains them.
/// All member kinds share one grammar:
///
/// - constructors and methods render as `Type.Member(arg1, arg2)`, zero-argument
///   calls as `Type.Member()`
/// - properties render as `Type.Name.get()` / `Type.Name.set(value)`
/// - indexers render as `Type.this.get(idx1, idx2)` / `Type.this.set(idx1, idx2, value)`
///
/// Arguments and assigned values render through their `Display` implementation; for
/// setters the assigned value is the last formatted argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord(String);

impl CallRecord {
    /// Describes a constructor or method call
    #[must_use]
    pub fn invocation(type_name: &str, member: &str, args: &[BoxedValue]) -> Self {
        CallRecord(format!("{}.{}({})", type_name, member, join_args(args)))
    }

    /// Describes a property read
    #[must_use]
    pub fn property_get(type_name: &str, property: &str) -> Self {
        CallRecord(format!("{}.{}.get()", type_name, property))
    }

    /// Describes a property write
    #[must_use]
    pub fn property_set<V: fmt::Display + ?Sized>(
        type_name: &str,
        property: &str,
        value: &V,
    ) -> Self {
        CallRecord(format!("{}.{}.set({})", type_name, property, value))
    }

    /// Describes an indexer read
    #[must_use]
    pub fn indexer_get(type_name: &str, args: &[BoxedValue]) -> Self {
        CallRecord(format!("{}.this.get({})", type_name, join_args(args)))
    }

    /// Describes an indexer write; the assigned value trails the index arguments
    #[must_use]
    pub fn indexer_set<V: fmt::Display + ?Sized>(
        type_name: &str,
        args: &[BoxedValue],
        value: &V,
    ) -> Self {
        let indices = join_args(args);
        if indices.is_empty() {
            CallRecord(format!("{}.this.set({})", type_name, value))
        } else {
            CallRecord(format!("{}.this.set({}, {})", type_name, indices, value))
        }
    }

    /// Returns the rendered description
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn join_args(args: &[BoxedValue]) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interception::value::boxed;

    #[test]
    fn test_invocation_with_args() {
        let record = CallRecord::invocation("Point", "Point", &[boxed(3), boxed(4)]);
        assert_eq!(record.as_str(), "Point.Point(3, 4)");
    }

    #[test]
    fn test_invocation_without_args() {
        let record = CallRecord::invocation("Point", "DistanceFromOrigin", &[]);
        assert_eq!(record.as_str(), "Point.DistanceFromOrigin()");
    }

    #[test]
    fn test_property_get() {
        let record = CallRecord::property_get("Point", "X");
        assert_eq!(record.as_str(), "Point.X.get()");
    }

    #[test]
    fn test_property_set() {
        let record = CallRecord::property_set("Point", "X", &7);
        assert_eq!(record.as_str(), "Point.X.set(7)");
    }

    #[test]
    fn test_indexer_get() {
        let record = CallRecord::indexer_get("Grid", &[boxed(1), boxed(2)]);
        assert_eq!(record.as_str(), "Grid.this.get(1, 2)");
    }

    #[test]
    fn test_indexer_set_appends_value() {
        let record = CallRecord::indexer_set("Grid", &[boxed(1), boxed(2)], &9);
        assert_eq!(record.as_str(), "Grid.this.set(1, 2, 9)");
    }

    #[test]
    fn test_indexer_set_without_indices() {
        let record = CallRecord::indexer_set("Grid", &[], &9);
        assert_eq!(record.as_str(), "Grid.this.set(9)");
    }

    #[test]
    fn test_display_matches_as_str() {
        let record = CallRecord::invocation("Point", "Translate", &[boxed(-1), boxed("up")]);
        assert_eq!(format!("{}", record), "Point.Translate(-1, up)");
    }
}
