//! Camera-frustum wireframe GPU rendering resources.

use glam::{Vec3, Vec4};
use wgpu::util::DeviceExt;

/// GPU resources for rendering one wireframe frustum as a line list.
pub struct FrustumRenderData {
    /// Per-line-vertex positions, edges flattened to [tail, tip] pairs.
    pub edge_vertex_buffer: wgpu::Buffer,
    /// Uniform buffer for frustum settings.
    pub uniform_buffer: wgpu::Buffer,
    /// Bind group for this frustum.
    pub bind_group: wgpu::BindGroup,
    /// Number of edges.
    pub num_edges: u32,
}

/// Uniforms for frustum rendering. 16 bytes, matches the WGSL layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrustumUniforms {
    pub color: [f32; 4],
}

impl Default for FrustumUniforms {
    fn default() -> Self {
        Self {
            color: [1.0, 0.2, 0.2, 1.0],
        }
    }
}

impl FrustumRenderData {
    /// Creates new render data from wireframe nodes and edge index pairs.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        nodes: &[Vec3],
        edges: &[[u32; 2]],
    ) -> Self {
        let num_edges = edges.len() as u32;

        // Flatten edges into a storage buffer of line vertices, padded to vec4.
        let vertex_data: Vec<f32> = edges
            .iter()
            .flat_map(|&[a, b]| {
                let pa = nodes[a as usize];
                let pb = nodes[b as usize];
                [pa.x, pa.y, pa.z, 0.0, pb.x, pb.y, pb.z, 0.0]
            })
            .collect();
        let edge_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("frustum edge vertices"),
            contents: bytemuck::cast_slice(&vertex_data),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        });

        let uniforms = FrustumUniforms::default();
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("frustum uniforms"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frustum bind group"),
            layout: bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: edge_vertex_buffer.as_entire_binding(),
                },
            ],
        });

        Self {
            edge_vertex_buffer,
            uniform_buffer,
            bind_group,
            num_edges,
        }
    }

    /// Updates the frustum color.
    pub fn update_uniforms(&self, queue: &wgpu::Queue, color: Vec4) {
        let uniforms = FrustumUniforms {
            color: color.to_array(),
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frustum_uniforms_size_matches_shader_layout() {
        assert_eq!(std::mem::size_of::<FrustumUniforms>(), 16);
    }
}
