//! The node contract exposed to the graph evaluator.

use comp_core::OpResult;

use crate::context::Context;
use crate::GraphResult;

/// A single-input/single-output graph operation.
///
/// The evaluator owns every result in the graph. It hands an operation its
/// upstream result by reference and receives the freshly produced output by
/// value; operations never mutate their input. Each operation is executed
/// exactly once per graph evaluation, in the order the evaluator establishes
/// (after its source, before its consumer).
pub trait Operation {
    /// Stable name for diagnostics.
    fn name(&self) -> &'static str;

    /// Produces this operation's output from its bound input.
    fn execute(&self, context: &Context, input: &OpResult) -> GraphResult<OpResult>;
}
