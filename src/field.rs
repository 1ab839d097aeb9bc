use rand::Rng;

/// Static per-particle record. Generated once at startup and uploaded
/// verbatim as the per-instance vertex buffer; the shader recomputes the
/// world position from it every frame, so no position is stored here.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Particle {
    /// Resting angle around the field axis, radians in [0, 2π).
    pub angle: f32,
    /// Fixed band height, world units.
    pub height: f32,
}

impl Particle {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Particle>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<f32>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

/// Draws the static field layout: `count` independent angle/height pairs,
/// angles uniform over the full turn, heights uniform over
/// [-height_range/2, height_range/2]. A count of zero yields an empty
/// field, which renders as nothing but is otherwise valid.
pub fn generate(count: usize, height_range: f32, rng: &mut impl Rng) -> Vec<Particle> {
    let half = height_range / 2.0;
    (0..count)
        .map(|_| Particle {
            angle: rng.random_range(0.0..std::f32::consts::TAU),
            height: rng.random_range(-half..=half),
        })
        .collect()
}
