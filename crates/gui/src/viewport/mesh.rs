use glam::{Mat4, Quat, Vec3};

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub const STRIDE: usize = 9;

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / Self::STRIDE
    }

    pub fn position(&self, i: usize) -> Vec3 {
        let b = i * Self::STRIDE;
        Vec3::new(self.vertices[b], self.vertices[b + 1], self.vertices[b + 2])
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_mesh(self)
    }

    /// Translate so the bounding box is centered on the origin
    pub fn centered(mut self) -> Self {
        if self.vertex_count() == 0 {
            return self;
        }
        let center = self.aabb().center();
        for v in self.vertices.chunks_exact_mut(Self::STRIDE) {
            v[0] -= center.x;
            v[1] -= center.y;
            v[2] -= center.z;
        }
        self
    }

    /// Append another mesh, offsetting its indices
    pub fn append(&mut self, other: &MeshData) {
        let base = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }
}

/// Textured quad data: interleaved [pos.x, pos.y, pos.z, u, v]
#[derive(Clone, Debug, Default)]
pub struct TexturedMesh {
    /// 5 floats per vertex: position(3) + uv(2)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_mesh(data: &MeshData) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for i in 0..data.vertex_count() {
            let p = data.position(i);
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

// ── Shirt ─────────────────────────────────────────────────────

/// Blocky tee used when the shirt asset cannot be loaded.
/// Front face sits just behind the decal plane.
pub fn fallback_tee(color: [f32; 3]) -> MeshData {
    let mut mesh = box_mesh(Vec3::new(0.0, -0.02, 0.0), Vec3::new(0.23, 0.33, 0.12), 0.0, color);
    for side in [-1.0_f32, 1.0] {
        let sleeve = box_mesh(
            Vec3::new(side * 0.31, 0.18, 0.0),
            Vec3::new(0.12, 0.07, 0.1),
            side * -0.6,
            color,
        );
        mesh.append(&sleeve);
    }
    mesh
}

/// Axis-aligned box rotated around Z, then moved to `center`
pub fn box_mesh(center: Vec3, half: Vec3, rotation_z: f32, color: [f32; 3]) -> MeshData {
    let (hw, hh, hd) = (half.x, half.y, half.z);
    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(-hw, -hh, hd), Vec3::new(hw, -hh, hd), Vec3::new(hw, hh, hd), Vec3::new(-hw, hh, hd)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(hw, -hh, -hd), Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, hh, -hd), Vec3::new(hw, hh, -hd)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(hw, -hh, hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, hh, -hd), Vec3::new(hw, hh, hd)], Vec3::X),
        // Left (-X)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, -hh, hd), Vec3::new(-hw, hh, hd), Vec3::new(-hw, hh, -hd)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(-hw, hh, hd), Vec3::new(hw, hh, hd), Vec3::new(hw, hh, -hd), Vec3::new(-hw, hh, -hd)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, -hh, hd), Vec3::new(-hw, -hh, hd)], Vec3::NEG_Y),
    ];

    let rotation = Quat::from_rotation_z(rotation_z);
    let transform = Mat4::from_rotation_translation(rotation, center);

    let mut vertices = Vec::with_capacity(24 * MeshData::STRIDE);
    let mut indices = Vec::with_capacity(36);
    for (quad, normal) in &faces {
        let base = (vertices.len() / MeshData::STRIDE) as u32;
        let n = rotation * *normal;
        for v in quad {
            let p = transform.transform_point3(*v);
            push_vert(&mut vertices, p, n, color);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    MeshData { vertices, indices }
}

// ── Staging ───────────────────────────────────────────────────

/// Square facing +Z with uv (0,0) at the top-left
pub fn textured_quad(center: Vec3, size: f32) -> TexturedMesh {
    let h = size * 0.5;
    let (x, y, z) = (center.x, center.y, center.z);
    TexturedMesh {
        vertices: vec![
            x - h, y - h, z, 0.0, 1.0,
            x + h, y - h, z, 1.0, 1.0,
            x + h, y + h, z, 1.0, 0.0,
            x - h, y + h, z, 0.0, 0.0,
        ],
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Decal sticker on the shirt front
pub fn decal_quad() -> TexturedMesh {
    textured_quad(super::rig::DECAL_POSITION, super::rig::DECAL_SCALE)
}

/// Shadow-catching backdrop plane behind the shirt
pub fn backdrop() -> TexturedMesh {
    textured_quad(
        Vec3::new(0.0, 0.0, super::rig::BACKDROP_Z),
        super::rig::BACKDROP_SCALE,
    )
}

fn push_vert(v: &mut Vec<f32>, p: Vec3, n: Vec3, c: [f32; 3]) {
    v.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, c[0], c[1], c[2]]);
}
