//! wgpu execution context for conversion compute dispatch.
//!
//! Owns the device and queue shared read-only by every operation in a graph,
//! plus the compute pipeline cache keyed by stable shader label. The cache is
//! lock-guarded so concurrent graph evaluations can look pipelines up safely;
//! after first use a given shader is only ever read.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bytemuck::{Pod, Zeroable};
use tracing::{debug, trace};
use wgpu::util::DeviceExt;

use crate::shaders::ShaderSource;
use crate::{GraphError, GraphResult};

/// Domain dimensions uniform: [width, height, 0, 0].
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct DimsUniform {
    dims: [u32; 4],
}

/// GPU device state for one or more graph evaluations.
pub struct GpuContext {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    pipelines: Mutex<HashMap<&'static str, Arc<wgpu::ComputePipeline>>>,
    adapter_name: String,
}

impl GpuContext {
    /// Check if a GPU adapter is available.
    pub fn is_available() -> bool {
        pollster::block_on(async {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::all(),
                ..Default::default()
            });
            instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::HighPerformance,
                    compatible_surface: None,
                    force_fallback_adapter: false,
                })
                .await
                .is_some()
        })
    }

    /// Create a new GPU context.
    pub fn new() -> GraphResult<Self> {
        pollster::block_on(Self::new_async())
    }

    /// Create a new GPU context asynchronously.
    pub async fn new_async() -> GraphResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GraphError::NoAdapter)?;

        let adapter_name = adapter.get_info().name;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("comp_graph_device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: adapter.limits(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    ..Default::default()
                },
                None,
            )
            .await
            .map_err(|e| GraphError::DeviceCreation(e.to_string()))?;

        debug!(adapter = %adapter_name, "GPU device created");

        Ok(Self {
            device: Arc::new(device),
            queue: Arc::new(queue),
            pipelines: Mutex::new(HashMap::new()),
            adapter_name,
        })
    }

    /// Name of the adapter backing this context.
    pub fn adapter_name(&self) -> &str {
        &self.adapter_name
    }

    /// Look up or compile the compute pipeline for a shader.
    pub fn pipeline(&self, shader: &ShaderSource) -> GraphResult<Arc<wgpu::ComputePipeline>> {
        let mut cache = self
            .pipelines
            .lock()
            .map_err(|_| GraphError::OperationFailed("pipeline cache poisoned".into()))?;

        if let Some(pipeline) = cache.get(shader.label) {
            return Ok(Arc::clone(pipeline));
        }

        trace!(label = shader.label, "compiling conversion pipeline");
        let module = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(shader.label),
                source: wgpu::ShaderSource::Wgsl(shader.wgsl.into()),
            });

        let pipeline = Arc::new(self.device.create_compute_pipeline(
            &wgpu::ComputePipelineDescriptor {
                label: Some(shader.label),
                layout: None, // Auto layout
                module: &module,
                entry_point: Some("main"),
                compilation_options: Default::default(),
                cache: None,
            },
        ));

        cache.insert(shader.label, Arc::clone(&pipeline));
        Ok(pipeline)
    }

    /// Run a conversion shader over a `width` x `height` domain.
    ///
    /// Uploads `input`, dispatches one invocation per pixel and reads back
    /// `width * height * dst_channels` floats. The call is synchronous from
    /// the caller's perspective.
    pub fn dispatch_conversion(
        &self,
        shader: &ShaderSource,
        input: &[f32],
        width: u32,
        height: u32,
        dst_channels: usize,
    ) -> GraphResult<Vec<f32>> {
        let pipeline = self.pipeline(shader)?;
        let total = width * height;
        let dst_bytes = (total as u64) * (dst_channels as u64) * 4;

        let src_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("conversion_src"),
                contents: bytemuck::cast_slice(input),
                usage: wgpu::BufferUsages::STORAGE,
            });

        let dst_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("conversion_dst"),
            size: dst_bytes,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });

        let dims = DimsUniform {
            dims: [width, height, 0, 0],
        };
        let dims_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("conversion_dims"),
                contents: bytemuck::bytes_of(&dims),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let layout = pipeline.get_bind_group_layout(0);
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(shader.label),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: src_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: dst_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: dims_buffer.as_entire_binding(),
                },
            ],
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("conversion_encoder"),
            });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some(shader.label),
                timestamp_writes: None,
            });
            pass.set_pipeline(&pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.dispatch_workgroups(total.div_ceil(256), 1, 1);
        }

        let staging = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("conversion_staging"),
            size: dst_bytes,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        encoder.copy_buffer_to_buffer(&dst_buffer, 0, &staging, 0, dst_bytes);
        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |r| {
            let _ = tx.send(r);
        });
        self.device.poll(wgpu::Maintain::Wait);

        rx.recv()
            .map_err(|_| GraphError::OperationFailed("map channel closed".into()))?
            .map_err(|e| GraphError::OperationFailed(format!("map failed: {e}")))?;

        let data = slice.get_mapped_range();
        let result: Vec<f32> = bytemuck::cast_slice(&data).to_vec();
        drop(data);
        staging.unmap();

        Ok(result)
    }
}
