//! Execution context shared by every operation in a graph.
//!
//! The context carries the active execution backend. Operations query it
//! with [`Context::use_gpu`] to pick between their CPU and GPU paths; the
//! rest of the device handling lives in [`crate::gpu`] behind the `wgpu`
//! feature.

use tracing::debug;

use crate::GraphResult;

#[cfg(feature = "wgpu")]
use crate::gpu::GpuContext;

/// Available execution backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Auto-select the best available (GPU when present, else CPU).
    #[default]
    Auto,
    /// CPU execution using rayon for per-pixel parallelism.
    Cpu,
    /// GPU execution through wgpu compute shaders.
    Gpu,
}

impl Backend {
    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Cpu => "cpu",
            Self::Gpu => "gpu",
        }
    }
}

/// Execution context for one or more graph evaluations.
///
/// Shared read-only across all operations in a graph; safe to reuse across
/// evaluations. The GPU device and queue handles, when present, are owned
/// here.
pub struct Context {
    #[cfg(feature = "wgpu")]
    gpu: Option<GpuContext>,
}

impl Context {
    /// Creates a context for the requested backend.
    ///
    /// `Backend::Gpu` fails when the `wgpu` feature is disabled or no
    /// adapter is available; `Backend::Auto` silently falls back to CPU
    /// instead.
    pub fn new(backend: Backend) -> GraphResult<Self> {
        match backend {
            Backend::Cpu => Ok(Self::cpu()),
            Backend::Gpu => {
                #[cfg(feature = "wgpu")]
                {
                    let gpu = GpuContext::new()?;
                    debug!(adapter = gpu.adapter_name(), "created GPU context");
                    Ok(Self { gpu: Some(gpu) })
                }
                #[cfg(not(feature = "wgpu"))]
                {
                    Err(crate::GraphError::BackendNotAvailable(
                        "wgpu feature not enabled".to_string(),
                    ))
                }
            }
            Backend::Auto => {
                #[cfg(feature = "wgpu")]
                {
                    if GpuContext::is_available() {
                        return Self::new(Backend::Gpu);
                    }
                }
                debug!("auto backend selection fell back to cpu");
                Ok(Self::cpu())
            }
        }
    }

    /// Creates a CPU-only context. Never fails.
    pub fn cpu() -> Self {
        Self {
            #[cfg(feature = "wgpu")]
            gpu: None,
        }
    }

    /// Creates a context with the best available backend.
    pub fn auto() -> Self {
        // Auto cannot fail: the GPU probe either succeeds or we run on CPU.
        Self::new(Backend::Auto).unwrap_or_else(|_| Self::cpu())
    }

    /// Whether GPU execution is active for this context.
    #[inline]
    pub fn use_gpu(&self) -> bool {
        #[cfg(feature = "wgpu")]
        {
            self.gpu.is_some()
        }
        #[cfg(not(feature = "wgpu"))]
        {
            false
        }
    }

    /// The GPU context, when GPU execution is active.
    #[cfg(feature = "wgpu")]
    #[inline]
    pub fn gpu(&self) -> Option<&GpuContext> {
        self.gpu.as_ref()
    }

    /// Name of the active backend.
    pub fn backend_name(&self) -> &'static str {
        if self.use_gpu() { "gpu" } else { "cpu" }
    }
}
