//! Result type conversion between the pixel data kinds.
//!
//! Before a graph executes, every link whose upstream kind differs from the
//! kind its consumer declares gets a [`ConversionOperation`] inserted by the
//! graph compiler. The factory [`ConversionOperation::construct_if_needed`]
//! makes that decision; execution reinterprets elements according to the
//! fixed per-pair rules below.
//!
//! # Conversion rules
//!
//! | Source -> Dest     | Rule                                                  |
//! |--------------------|-------------------------------------------------------|
//! | scalar -> vector4  | components 0-2 = scalar, component 3 = 1              |
//! | scalar -> color4   | channels 0-2 = scalar, alpha = 1                      |
//! | color4 -> scalar   | mean of channels 0-2, alpha ignored                   |
//! | color4 -> vector4  | unchanged copy                                        |
//! | vector4 -> scalar  | mean of components 0-2                                |
//! | vector4 -> color4  | channels 0-2 = components 0-2, alpha = 1              |
//!
//! Each rule exists in three lockstep implementations held together in a
//! [`ConversionKernel`]: the single-value fold, the CPU loop and the GPU
//! shader. They must stay numerically identical; change one, change all
//! three.

use comp_core::{DataKind, InputDescriptor, OpResult};
use rayon::prelude::*;
use std::fmt;
use tracing::trace;

use crate::context::Context;
use crate::operation::Operation;
use crate::shaders::{self, ShaderSource};
use crate::GraphResult;

#[cfg(feature = "wgpu")]
use crate::gpu::GpuContext;

// ============================================================================
// Conversion pairs
// ============================================================================

/// The six ordered kind pairs that require bridging.
///
/// Same-kind pairs are never represented; [`ConversionPair::between`] is the
/// only constructor the graph compiler needs and it covers the whole valid
/// enumeration domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionPair {
    /// Scalar to vector4.
    ScalarToVector4,
    /// Scalar to color4.
    ScalarToColor4,
    /// Color4 to scalar.
    Color4ToScalar,
    /// Color4 to vector4.
    Color4ToVector4,
    /// Vector4 to scalar.
    Vector4ToScalar,
    /// Vector4 to color4.
    Vector4ToColor4,
}

impl ConversionPair {
    /// All supported pairs.
    pub const ALL: [ConversionPair; 6] = [
        Self::ScalarToVector4,
        Self::ScalarToColor4,
        Self::Color4ToScalar,
        Self::Color4ToVector4,
        Self::Vector4ToScalar,
        Self::Vector4ToColor4,
    ];

    /// The pair bridging `source` to `destination`, or `None` when the kinds
    /// already match.
    pub fn between(source: DataKind, destination: DataKind) -> Option<Self> {
        use DataKind::*;
        match (source, destination) {
            (Scalar, Scalar) | (Vector4, Vector4) | (Color4, Color4) => None,
            (Scalar, Vector4) => Some(Self::ScalarToVector4),
            (Scalar, Color4) => Some(Self::ScalarToColor4),
            (Color4, Scalar) => Some(Self::Color4ToScalar),
            (Color4, Vector4) => Some(Self::Color4ToVector4),
            (Vector4, Scalar) => Some(Self::Vector4ToScalar),
            (Vector4, Color4) => Some(Self::Vector4ToColor4),
        }
    }

    /// The kind this pair consumes.
    pub const fn source_kind(self) -> DataKind {
        match self {
            Self::ScalarToVector4 | Self::ScalarToColor4 => DataKind::Scalar,
            Self::Color4ToScalar | Self::Color4ToVector4 => DataKind::Color4,
            Self::Vector4ToScalar | Self::Vector4ToColor4 => DataKind::Vector4,
        }
    }

    /// The kind this pair produces.
    pub const fn destination_kind(self) -> DataKind {
        match self {
            Self::Vector4ToScalar | Self::Color4ToScalar => DataKind::Scalar,
            Self::ScalarToVector4 | Self::Color4ToVector4 => DataKind::Vector4,
            Self::ScalarToColor4 | Self::Vector4ToColor4 => DataKind::Color4,
        }
    }

    /// The kernel holding this pair's three rule implementations.
    pub fn kernel(self) -> &'static ConversionKernel {
        match self {
            Self::ScalarToVector4 => &SCALAR_TO_VECTOR4,
            Self::ScalarToColor4 => &SCALAR_TO_COLOR4,
            Self::Color4ToScalar => &COLOR4_TO_SCALAR,
            Self::Color4ToVector4 => &COLOR4_TO_VECTOR4,
            Self::Vector4ToScalar => &VECTOR4_TO_SCALAR,
            Self::Vector4ToColor4 => &VECTOR4_TO_COLOR4,
        }
    }
}

impl fmt::Display for ConversionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source_kind(), self.destination_kind())
    }
}

// ============================================================================
// Kernels
// ============================================================================

/// The three lockstep implementations of one conversion rule.
///
/// `single` folds one broadcast value, `cpu` transforms a whole interleaved
/// buffer and `shader` is the WGSL equivalent dispatched per pixel. For any
/// element the three must produce the same value.
pub struct ConversionKernel {
    /// Single-value rule over a four-lane padded value.
    pub single: fn([f32; 4]) -> [f32; 4],
    /// CPU rule over interleaved source and destination buffers.
    pub cpu: fn(&[f32], &mut [f32]),
    /// Compute shader implementing the identical transform.
    pub shader: ShaderSource,
}

static SCALAR_TO_VECTOR4: ConversionKernel = ConversionKernel {
    single: |v| [v[0], v[0], v[0], 1.0],
    cpu: |src, dst| {
        dst.par_chunks_mut(4).zip(src.par_iter()).for_each(|(out, &v)| {
            out[0] = v;
            out[1] = v;
            out[2] = v;
            out[3] = 1.0;
        });
    },
    shader: shaders::SCALAR_TO_VECTOR4,
};

static SCALAR_TO_COLOR4: ConversionKernel = ConversionKernel {
    single: |v| [v[0], v[0], v[0], 1.0],
    cpu: |src, dst| {
        dst.par_chunks_mut(4).zip(src.par_iter()).for_each(|(out, &v)| {
            out[0] = v;
            out[1] = v;
            out[2] = v;
            out[3] = 1.0;
        });
    },
    shader: shaders::SCALAR_TO_COLOR4,
};

static COLOR4_TO_SCALAR: ConversionKernel = ConversionKernel {
    single: |v| [(v[0] + v[1] + v[2]) / 3.0, 0.0, 0.0, 0.0],
    cpu: |src, dst| {
        dst.par_iter_mut().zip(src.par_chunks(4)).for_each(|(out, inp)| {
            *out = (inp[0] + inp[1] + inp[2]) / 3.0;
        });
    },
    shader: shaders::COLOR4_TO_SCALAR,
};

static COLOR4_TO_VECTOR4: ConversionKernel = ConversionKernel {
    single: |v| v,
    cpu: |src, dst| {
        dst.par_chunks_mut(4).zip(src.par_chunks(4)).for_each(|(out, inp)| {
            out.copy_from_slice(inp);
        });
    },
    shader: shaders::COLOR4_TO_VECTOR4,
};

static VECTOR4_TO_SCALAR: ConversionKernel = ConversionKernel {
    single: |v| [(v[0] + v[1] + v[2]) / 3.0, 0.0, 0.0, 0.0],
    cpu: |src, dst| {
        dst.par_iter_mut().zip(src.par_chunks(4)).for_each(|(out, inp)| {
            *out = (inp[0] + inp[1] + inp[2]) / 3.0;
        });
    },
    shader: shaders::VECTOR4_TO_SCALAR,
};

static VECTOR4_TO_COLOR4: ConversionKernel = ConversionKernel {
    single: |v| [v[0], v[1], v[2], 1.0],
    cpu: |src, dst| {
        dst.par_chunks_mut(4).zip(src.par_chunks(4)).for_each(|(out, inp)| {
            out[0] = inp[0];
            out[1] = inp[1];
            out[2] = inp[2];
            out[3] = 1.0;
        });
    },
    shader: shaders::VECTOR4_TO_COLOR4,
};

// ============================================================================
// Conversion operation
// ============================================================================

/// The graph node bridging one mismatched link.
///
/// Constructed by [`construct_if_needed`](Self::construct_if_needed) at
/// graph-build time, owned by the graph compiler for the graph's lifetime
/// and executed exactly once per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionOperation {
    pair: ConversionPair,
}

impl ConversionOperation {
    /// Decide whether a link needs a conversion.
    ///
    /// Returns `None` when the upstream result already has the kind the
    /// input descriptor requires; the caller then wires the result through
    /// unchanged. Otherwise returns the operation for the mismatched pair,
    /// owned by the caller.
    pub fn construct_if_needed(
        input_result: &OpResult,
        input_descriptor: &InputDescriptor,
    ) -> Option<Self> {
        ConversionPair::between(input_result.kind(), input_descriptor.kind)
            .map(|pair| Self { pair })
    }

    /// Operation for a specific pair.
    pub const fn new(pair: ConversionPair) -> Self {
        Self { pair }
    }

    /// The pair this operation bridges.
    pub const fn pair(&self) -> ConversionPair {
        self.pair
    }

    /// Constant fold: convert the broadcast value once.
    fn execute_single(&self, value: [f32; 4]) -> OpResult {
        let converted = (self.pair.kernel().single)(value);
        OpResult::single(self.pair.destination_kind(), converted)
    }

    /// Sequential-domain CPU path, element-parallel via rayon.
    fn execute_cpu(&self, input: &OpResult) -> GraphResult<OpResult> {
        let destination = self.pair.destination_kind();
        let mut dst = vec![0.0f32; input.pixel_count() * destination.channels()];
        (self.pair.kernel().cpu)(input.data(), &mut dst);
        Ok(OpResult::from_f32(dst, destination, input.domain())?)
    }

    /// GPU path: dispatch the conversion shader over the full domain.
    #[cfg(feature = "wgpu")]
    fn execute_gpu(&self, gpu: &GpuContext, input: &OpResult) -> GraphResult<OpResult> {
        let destination = self.pair.destination_kind();
        let domain = input.domain();
        let dst = gpu.dispatch_conversion(
            &self.pair.kernel().shader,
            input.data(),
            domain.width,
            domain.height,
            destination.channels(),
        )?;
        Ok(OpResult::from_f32(dst, destination, domain)?)
    }
}

impl Operation for ConversionOperation {
    fn name(&self) -> &'static str {
        self.pair.kernel().shader.label
    }

    fn execute(&self, context: &Context, input: &OpResult) -> GraphResult<OpResult> {
        debug_assert_eq!(input.kind(), self.pair.source_kind());

        if let Some(value) = input.single_value() {
            trace!(pair = %self.pair, path = "single", "converting");
            return Ok(self.execute_single(value));
        }

        #[cfg(feature = "wgpu")]
        if let Some(gpu) = context.gpu() {
            trace!(pair = %self.pair, path = "gpu", "converting");
            return self.execute_gpu(gpu, input);
        }

        trace!(pair = %self.pair, path = "cpu", "converting");
        let _ = context;
        self.execute_cpu(input)
    }
}
