//! Per-input metadata declared by consuming nodes.

use crate::kind::DataKind;

/// Immutable description of a node input.
///
/// Owned by the node definition; the graph compiler reads it once per link to
/// decide whether the upstream result needs a type conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputDescriptor {
    /// The data kind this input requires.
    pub kind: DataKind,
    /// Whether the input prefers a single broadcastable value. This is a hint
    /// for the graph compiler's domain logic and has no effect on type
    /// conversion.
    pub expects_single_value: bool,
}

impl InputDescriptor {
    /// Descriptor for an input of the given kind.
    #[inline]
    pub const fn new(kind: DataKind) -> Self {
        Self {
            kind,
            expects_single_value: false,
        }
    }

    /// Marks the input as preferring single values.
    #[inline]
    pub const fn single_value(mut self) -> Self {
        self.expects_single_value = true;
        self
    }
}
