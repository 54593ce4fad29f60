//! Sanity checks for imported shirt meshes before they reach the GPU.

use crate::viewport::mesh::{Aabb, MeshData};

/// Largest extent a shirt may have and still fit the camera framing
pub const MAX_EXTENT: f32 = 2.0;

pub struct MeshValidator<'a> {
    mesh: &'a MeshData,
}

impl<'a> MeshValidator<'a> {
    pub fn new(mesh: &'a MeshData) -> Self {
        Self { mesh }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertices.len() / MeshData::STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.indices.len() / 3
    }

    pub fn is_stride_valid(&self) -> bool {
        self.mesh.vertices.len() % MeshData::STRIDE == 0
    }

    pub fn is_index_stride_valid(&self) -> bool {
        self.mesh.indices.len() % 3 == 0
    }

    pub fn are_indices_in_range(&self) -> bool {
        let max_idx = self.vertex_count() as u32;
        self.mesh.indices.iter().all(|&i| i < max_idx)
    }

    pub fn are_positions_finite(&self) -> bool {
        self.mesh
            .vertices
            .chunks_exact(MeshData::STRIDE)
            .all(|v| v[..3].iter().all(|c| c.is_finite()))
    }

    /// All vertex normals have unit length (within epsilon)
    pub fn are_normals_normalized(&self, epsilon: f32) -> bool {
        self.mesh.vertices.chunks_exact(MeshData::STRIDE).all(|v| {
            let len = (v[3] * v[3] + v[4] * v[4] + v[5] * v[5]).sqrt();
            (len - 1.0).abs() <= epsilon
        })
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_mesh(self.mesh)
    }

    pub fn dimensions(&self) -> [f32; 3] {
        self.aabb().size().to_array()
    }

    /// Run all checks. An empty list means the mesh can be rendered.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.triangle_count() == 0 {
            errors.push("Mesh has no triangles".to_string());
        }
        if !self.is_stride_valid() {
            errors.push(format!(
                "Vertex buffer length {} is not a multiple of {}",
                self.mesh.vertices.len(),
                MeshData::STRIDE
            ));
        }
        if !self.is_index_stride_valid() {
            errors.push(format!(
                "Index buffer length {} is not a multiple of 3",
                self.mesh.indices.len()
            ));
        }
        if !self.are_indices_in_range() {
            let max_idx = self.vertex_count() as u32;
            let out_of_range: Vec<_> = self
                .mesh
                .indices
                .iter()
                .filter(|&&i| i >= max_idx)
                .take(5)
                .collect();
            errors.push(format!(
                "Indices out of range (vertex_count={}): {:?}",
                max_idx, out_of_range
            ));
        }
        if !self.are_positions_finite() {
            errors.push("Some positions are not finite".to_string());
        } else if self.vertex_count() > 0 {
            let dims = self.dimensions();
            if dims.iter().any(|d| *d > MAX_EXTENT) {
                errors.push(format!("Mesh is too large for the stage: {dims:?}"));
            }
        }
        if self.vertex_count() > 0 && !self.are_normals_normalized(0.1) {
            errors.push("Some normals are not unit-length (epsilon=0.1)".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::mesh::fallback_tee;

    fn simple_triangle() -> MeshData {
        MeshData {
            vertices: vec![
                0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0,
                0.1, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0,
                0.0, 0.1, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0,
            ],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn test_valid_triangle() {
        let mesh = simple_triangle();
        let v = MeshValidator::new(&mesh);
        assert_eq!(v.vertex_count(), 3);
        assert_eq!(v.triangle_count(), 1);
        assert!(v.validate_all().is_empty());
    }

    #[test]
    fn test_fallback_tee_is_valid() {
        let tee = fallback_tee([1.0; 3]);
        assert!(MeshValidator::new(&tee).validate_all().is_empty());
    }

    #[test]
    fn test_empty_mesh_rejected() {
        let mesh = MeshData::default();
        let errors = MeshValidator::new(&mesh).validate_all();
        assert_eq!(errors, vec!["Mesh has no triangles".to_string()]);
    }

    #[test]
    fn test_indices_out_of_range() {
        let mut mesh = simple_triangle();
        mesh.indices = vec![0, 1, 7];
        let v = MeshValidator::new(&mesh);
        assert!(!v.are_indices_in_range());
        assert_eq!(v.validate_all().len(), 1);
    }

    #[test]
    fn test_oversized_mesh() {
        let mut mesh = simple_triangle();
        mesh.vertices[9] = 50.0;
        let errors = MeshValidator::new(&mesh).validate_all();
        assert!(errors[0].contains("too large"));
    }

    #[test]
    fn test_bad_normals() {
        let mut mesh = simple_triangle();
        mesh.vertices[5] = 3.0;
        assert!(!MeshValidator::new(&mesh).are_normals_normalized(0.1));
    }
}
