//! WGSL shader sources for the conversion compute pipelines.
//!
//! One shader per ordered kind pair. Each shader is the GPU half of the
//! per-pair rule co-located in [`crate::conversion`]; the arithmetic must
//! match the single-value and CPU rules exactly.

/// A compute shader source with its stable pipeline-cache identifier.
#[derive(Debug, Clone, Copy)]
pub struct ShaderSource {
    /// Stable identifier; the pipeline cache keys on this.
    pub label: &'static str,
    /// WGSL source text.
    pub wgsl: &'static str,
}

/// Scalar to vector4: components 0-2 = scalar, component 3 = 1.
pub const SCALAR_TO_VECTOR4: ShaderSource = ShaderSource {
    label: "convert_scalar_to_vector4",
    wgsl: r#"
@group(0) @binding(0) var<storage, read> src: array<f32>;
@group(0) @binding(1) var<storage, read_write> dst: array<f32>;
@group(0) @binding(2) var<uniform> dims: vec4<u32>;  // w, h, 0, 0

@compute @workgroup_size(256)
fn main(@builtin(global_invocation_id) id: vec3<u32>) {
    let px = id.x;
    let total = dims.x * dims.y;
    if px >= total { return; }

    let v = src[px];
    let base = px * 4u;
    dst[base] = v;
    dst[base + 1u] = v;
    dst[base + 2u] = v;
    dst[base + 3u] = 1.0;
}
"#,
};

/// Scalar to color4: channels 0-2 = scalar, alpha = 1.
pub const SCALAR_TO_COLOR4: ShaderSource = ShaderSource {
    label: "convert_scalar_to_color4",
    wgsl: r#"
@group(0) @binding(0) var<storage, read> src: array<f32>;
@group(0) @binding(1) var<storage, read_write> dst: array<f32>;
@group(0) @binding(2) var<uniform> dims: vec4<u32>;  // w, h, 0, 0

@compute @workgroup_size(256)
fn main(@builtin(global_invocation_id) id: vec3<u32>) {
    let px = id.x;
    let total = dims.x * dims.y;
    if px >= total { return; }

    let v = src[px];
    let base = px * 4u;
    dst[base] = v;
    dst[base + 1u] = v;
    dst[base + 2u] = v;
    dst[base + 3u] = 1.0;
}
"#,
};

/// Color4 to scalar: mean of the three color channels, alpha ignored.
pub const COLOR4_TO_SCALAR: ShaderSource = ShaderSource {
    label: "convert_color4_to_scalar",
    wgsl: r#"
@group(0) @binding(0) var<storage, read> src: array<f32>;
@group(0) @binding(1) var<storage, read_write> dst: array<f32>;
@group(0) @binding(2) var<uniform> dims: vec4<u32>;  // w, h, 0, 0

@compute @workgroup_size(256)
fn main(@builtin(global_invocation_id) id: vec3<u32>) {
    let px = id.x;
    let total = dims.x * dims.y;
    if px >= total { return; }

    let base = px * 4u;
    dst[px] = (src[base] + src[base + 1u] + src[base + 2u]) / 3.0;
}
"#,
};

/// Color4 to vector4: exact copy of the four channels.
pub const COLOR4_TO_VECTOR4: ShaderSource = ShaderSource {
    label: "convert_color4_to_vector4",
    wgsl: r#"
@group(0) @binding(0) var<storage, read> src: array<f32>;
@group(0) @binding(1) var<storage, read_write> dst: array<f32>;
@group(0) @binding(2) var<uniform> dims: vec4<u32>;  // w, h, 0, 0

@compute @workgroup_size(256)
fn main(@builtin(global_invocation_id) id: vec3<u32>) {
    let px = id.x;
    let total = dims.x * dims.y;
    if px >= total { return; }

    let base = px * 4u;
    dst[base] = src[base];
    dst[base + 1u] = src[base + 1u];
    dst[base + 2u] = src[base + 2u];
    dst[base + 3u] = src[base + 3u];
}
"#,
};

/// Vector4 to scalar: mean of the first three components.
pub const VECTOR4_TO_SCALAR: ShaderSource = ShaderSource {
    label: "convert_vector4_to_scalar",
    wgsl: r#"
@group(0) @binding(0) var<storage, read> src: array<f32>;
@group(0) @binding(1) var<storage, read_write> dst: array<f32>;
@group(0) @binding(2) var<uniform> dims: vec4<u32>;  // w, h, 0, 0

@compute @workgroup_size(256)
fn main(@builtin(global_invocation_id) id: vec3<u32>) {
    let px = id.x;
    let total = dims.x * dims.y;
    if px >= total { return; }

    let base = px * 4u;
    dst[px] = (src[base] + src[base + 1u] + src[base + 2u]) / 3.0;
}
"#,
};

/// Vector4 to color4: components 0-2 copied, component 3 discarded, alpha = 1.
pub const VECTOR4_TO_COLOR4: ShaderSource = ShaderSource {
    label: "convert_vector4_to_color4",
    wgsl: r#"
@group(0) @binding(0) var<storage, read> src: array<f32>;
@group(0) @binding(1) var<storage, read_write> dst: array<f32>;
@group(0) @binding(2) var<uniform> dims: vec4<u32>;  // w, h, 0, 0

@compute @workgroup_size(256)
fn main(@builtin(global_invocation_id) id: vec3<u32>) {
    let px = id.x;
    let total = dims.x * dims.y;
    if px >= total { return; }

    let base = px * 4u;
    dst[base] = src[base];
    dst[base + 1u] = src[base + 1u];
    dst[base + 2u] = src[base + 2u];
    dst[base + 3u] = 1.0;
}
"#,
};
