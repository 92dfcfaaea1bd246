//! Operation graph layer for the comp-rs node compositor.
//!
//! This crate implements the result type-conversion subsystem: the bridge
//! inserted on every graph link whose upstream data kind does not match what
//! the consuming node's input declares.
//!
//! # Architecture
//!
//! ```text
//! ConversionOperation (graph node, one per mismatched link)
//!     └── ConversionKernel (per ordered kind pair)
//!             ├── single rule  (constant fold, O(1))
//!             ├── cpu rule     (rayon element loop)
//!             └── gpu shader   (wgpu compute dispatch)
//! ```
//!
//! The graph compiler calls [`ConversionOperation::construct_if_needed`] once
//! per input link; when the kinds differ it inserts the returned operation
//! upstream of the consumer. At evaluation time the operation's
//! [`Operation::execute`] picks one of the three strategies and produces a
//! new result of the destination kind.
//!
//! # Example
//!
//! ```rust
//! use comp_core::{DataKind, InputDescriptor, OpResult};
//! use comp_graph::{Context, ConversionOperation, Operation};
//!
//! let context = Context::cpu();
//! let upstream = OpResult::single(DataKind::Scalar, [0.5, 0.0, 0.0, 0.0]);
//! let descriptor = InputDescriptor::new(DataKind::Color4);
//!
//! let conversion = ConversionOperation::construct_if_needed(&upstream, &descriptor)
//!     .expect("scalar -> color4 needs a conversion");
//! let converted = conversion.execute(&context, &upstream)?;
//!
//! assert_eq!(converted.kind(), DataKind::Color4);
//! assert_eq!(converted.single_value(), Some([0.5, 0.5, 0.5, 1.0]));
//! # Ok::<(), comp_graph::GraphError>(())
//! ```

pub mod context;
pub mod conversion;
pub mod operation;
mod shaders;

#[cfg(feature = "wgpu")]
pub mod gpu;

pub use context::{Backend, Context};
pub use conversion::{ConversionKernel, ConversionOperation, ConversionPair};
pub use operation::Operation;
pub use shaders::ShaderSource;

#[cfg(feature = "wgpu")]
pub use gpu::GpuContext;

use thiserror::Error;

/// Errors surfaced by graph execution.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Core buffer error (allocation, shape, bounds).
    #[error(transparent)]
    Core(#[from] comp_core::Error),

    /// No suitable GPU adapter found.
    #[error("no suitable GPU adapter found")]
    NoAdapter,

    /// Requested backend cannot be used in this build or on this system.
    #[error("backend not available: {0}")]
    BackendNotAvailable(String),

    /// GPU device creation failed.
    #[error("failed to create device: {0}")]
    DeviceCreation(String),

    /// Conversion shader failed to compile.
    #[error("failed to compile shader {label}: {message}")]
    ShaderCompilation {
        /// Stable shader identifier.
        label: &'static str,
        /// Driver-reported failure.
        message: String,
    },

    /// GPU dispatch or readback failed. Fatal to the current evaluation.
    #[error("GPU operation failed: {0}")]
    OperationFailed(String),
}

/// Result type alias using [`GraphError`].
pub type GraphResult<T> = Result<T, GraphError>;
