//! Loading of the shirt mesh, decal textures and environment lighting.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use shared::Decal;

use crate::validation::MeshValidator;
use crate::viewport::mesh::MeshData;

/// GLB magic number: "glTF"
const GLB_MAGIC: u32 = 0x46546C67;
const GLB_VERSION: u32 = 2;
const CHUNK_TYPE_JSON: u32 = 0x4E4F534A;
const CHUNK_TYPE_BIN: u32 = 0x004E4942;

/// glTF component types
const UNSIGNED_BYTE: u32 = 5121;
const UNSIGNED_SHORT: u32 = 5123;
const UNSIGNED_INT: u32 = 5125;
const FLOAT: u32 = 5126;

/// Node holding the shirt geometry in the stock asset
pub const SHIRT_NODE: &str = "T_Shirt_male";

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid GLB: {0}")]
    Glb(String),
    #[error("invalid glTF JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("mesh failed validation: {0}")]
    InvalidMesh(String),
}

/// Map a site path such as `/react.png` into the assets directory
pub fn resolve_asset(assets_dir: &Path, site_path: &str) -> PathBuf {
    assets_dir.join(site_path.trim_start_matches('/'))
}

fn read(path: &Path) -> Result<Vec<u8>, AssetError> {
    std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ── Mesh ──────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Gltf {
    #[serde(default)]
    nodes: Vec<GltfNode>,
    #[serde(default)]
    meshes: Vec<GltfMesh>,
    #[serde(default)]
    accessors: Vec<Accessor>,
    #[serde(default)]
    buffer_views: Vec<BufferView>,
}

#[derive(Deserialize)]
struct GltfNode {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    mesh: Option<usize>,
}

#[derive(Deserialize)]
struct GltfMesh {
    primitives: Vec<GltfPrimitive>,
}

#[derive(Deserialize)]
struct GltfPrimitive {
    attributes: HashMap<String, usize>,
    #[serde(default)]
    indices: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Accessor {
    #[serde(default)]
    buffer_view: Option<usize>,
    #[serde(default)]
    byte_offset: usize,
    component_type: u32,
    count: usize,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BufferView {
    #[serde(default)]
    byte_offset: usize,
    byte_length: usize,
    #[serde(default)]
    byte_stride: Option<usize>,
}

/// Load the shirt from a GLB file, centered on the origin
pub fn load_glb_mesh(path: &Path) -> Result<MeshData, AssetError> {
    parse_glb_mesh(&read(path)?)
}

/// Parse a binary glTF and return the shirt primitive as white geometry.
///
/// Uses the node named [`SHIRT_NODE`] when present, otherwise the first mesh.
/// Node transforms are ignored.
pub fn parse_glb_mesh(bytes: &[u8]) -> Result<MeshData, AssetError> {
    let (json, bin) = split_glb(bytes)?;
    let gltf: Gltf = serde_json::from_slice(json)?;

    let mesh_index = gltf
        .nodes
        .iter()
        .find(|n| n.name.as_deref() == Some(SHIRT_NODE))
        .and_then(|n| n.mesh)
        .unwrap_or(0);
    let primitive = gltf
        .meshes
        .get(mesh_index)
        .and_then(|m| m.primitives.first())
        .ok_or_else(|| AssetError::Glb("no mesh primitives".into()))?;

    let position_accessor = *primitive
        .attributes
        .get("POSITION")
        .ok_or_else(|| AssetError::Glb("primitive has no POSITION".into()))?;
    let positions = read_vec3(&gltf, bin, position_accessor)?;

    let indices = match primitive.indices {
        Some(accessor) => read_indices(&gltf, bin, accessor)?,
        None => (0..positions.len() as u32).collect(),
    };

    let normals = match primitive.attributes.get("NORMAL") {
        Some(&accessor) => read_vec3(&gltf, bin, accessor)?,
        None => smooth_normals(&positions, &indices),
    };
    if normals.len() != positions.len() {
        return Err(AssetError::Glb("NORMAL and POSITION counts differ".into()));
    }

    let mut vertices = Vec::with_capacity(positions.len() * MeshData::STRIDE);
    for (p, n) in positions.iter().zip(&normals) {
        let n = normalize_or_up(*n);
        vertices.extend_from_slice(&[p[0], p[1], p[2], n[0], n[1], n[2], 1.0, 1.0, 1.0]);
    }
    let mesh = MeshData { vertices, indices }.centered();

    let errors = MeshValidator::new(&mesh).validate_all();
    if !errors.is_empty() {
        return Err(AssetError::InvalidMesh(errors.join("; ")));
    }
    Ok(mesh)
}

fn split_glb(bytes: &[u8]) -> Result<(&[u8], &[u8]), AssetError> {
    let word = |offset: usize| -> Result<u32, AssetError> {
        bytes
            .get(offset..offset + 4)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .ok_or_else(|| AssetError::Glb("truncated file".into()))
    };

    if word(0)? != GLB_MAGIC {
        return Err(AssetError::Glb("bad magic".into()));
    }
    if word(4)? != GLB_VERSION {
        return Err(AssetError::Glb(format!("unsupported version {}", word(4)?)));
    }

    let mut json = None;
    let mut bin: &[u8] = &[];
    let mut offset = 12;
    while offset + 8 <= bytes.len() {
        let length = word(offset)? as usize;
        let kind = word(offset + 4)?;
        let data = bytes
            .get(offset + 8..offset + 8 + length)
            .ok_or_else(|| AssetError::Glb("chunk exceeds file".into()))?;
        match kind {
            CHUNK_TYPE_JSON => json = Some(data),
            CHUNK_TYPE_BIN => bin = data,
            _ => {}
        }
        offset += 8 + length;
    }
    let json = json.ok_or_else(|| AssetError::Glb("missing JSON chunk".into()))?;
    Ok((json, bin))
}

/// Byte slices for each element of an accessor
fn element_slices<'a>(
    bin: &'a [u8],
    view: &BufferView,
    accessor: &Accessor,
    element_size: usize,
) -> Result<Vec<&'a [u8]>, AssetError> {
    let stride = view.byte_stride.unwrap_or(element_size);
    let start = view.byte_offset + accessor.byte_offset;
    let view_end = view.byte_offset + view.byte_length;
    (0..accessor.count)
        .map(|i| {
            let begin = start + i * stride;
            let end = begin + element_size;
            if end > view_end {
                return Err(AssetError::Glb("accessor exceeds buffer view".into()));
            }
            bin.get(begin..end)
                .ok_or_else(|| AssetError::Glb("buffer view exceeds BIN chunk".into()))
        })
        .collect()
}

fn accessor_view<'g>(gltf: &'g Gltf, index: usize) -> Result<(&'g Accessor, &'g BufferView), AssetError> {
    let accessor = gltf
        .accessors
        .get(index)
        .ok_or_else(|| AssetError::Glb(format!("accessor {index} missing")))?;
    let view = accessor
        .buffer_view
        .and_then(|v| gltf.buffer_views.get(v))
        .ok_or_else(|| AssetError::Glb(format!("accessor {index} has no buffer view")))?;
    Ok((accessor, view))
}

fn read_vec3(gltf: &Gltf, bin: &[u8], index: usize) -> Result<Vec<[f32; 3]>, AssetError> {
    let (accessor, view) = accessor_view(gltf, index)?;
    if accessor.component_type != FLOAT || accessor.kind != "VEC3" {
        return Err(AssetError::Glb(format!(
            "accessor {index} is not a float VEC3"
        )));
    }
    let elements = element_slices(bin, view, accessor, 12)?;
    Ok(elements
        .into_iter()
        .map(|e| {
            let f = |o: usize| f32::from_le_bytes([e[o], e[o + 1], e[o + 2], e[o + 3]]);
            [f(0), f(4), f(8)]
        })
        .collect())
}

fn read_indices(gltf: &Gltf, bin: &[u8], index: usize) -> Result<Vec<u32>, AssetError> {
    let (accessor, view) = accessor_view(gltf, index)?;
    if accessor.kind != "SCALAR" {
        return Err(AssetError::Glb(format!("index accessor {index} is not SCALAR")));
    }
    let size = match accessor.component_type {
        UNSIGNED_BYTE => 1,
        UNSIGNED_SHORT => 2,
        UNSIGNED_INT => 4,
        other => return Err(AssetError::Glb(format!("unsupported index type {other}"))),
    };
    let elements = element_slices(bin, view, accessor, size)?;
    Ok(elements
        .into_iter()
        .map(|e| match size {
            1 => e[0] as u32,
            2 => u16::from_le_bytes([e[0], e[1]]) as u32,
            _ => u32::from_le_bytes([e[0], e[1], e[2], e[3]]),
        })
        .collect())
}

/// Area-weighted vertex normals
fn smooth_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals = vec![glam::Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let pa = glam::Vec3::from_array(positions[a]);
        let pb = glam::Vec3::from_array(positions[b]);
        let pc = glam::Vec3::from_array(positions[c]);
        let n = (pb - pa).cross(pc - pa);
        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }
    normals.into_iter().map(|n| n.to_array()).collect()
}

fn normalize_or_up(n: [f32; 3]) -> [f32; 3] {
    glam::Vec3::from_array(n)
        .try_normalize()
        .unwrap_or(glam::Vec3::Y)
        .to_array()
}

// ── Textures ──────────────────────────────────────────────────

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaTexture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

pub fn load_texture(path: &Path) -> Result<RgbaTexture, AssetError> {
    decode_texture(&read(path)?)
}

pub fn decode_texture(bytes: &[u8]) -> Result<RgbaTexture, AssetError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    Ok(RgbaTexture {
        width: image.width(),
        height: image.height(),
        pixels: image.into_raw(),
    })
}

/// Load every decal image; missing files are logged and skipped
pub fn load_decal_textures(assets_dir: &Path) -> HashMap<Decal, RgbaTexture> {
    Decal::ALL
        .iter()
        .filter_map(|decal| {
            let path = resolve_asset(assets_dir, &decal.asset_path());
            match load_texture(&path) {
                Ok(texture) => Some((*decal, texture)),
                Err(e) => {
                    tracing::warn!("Decal {} unavailable: {e}", decal.id());
                    None
                }
            }
        })
        .collect()
}

// ── Environment ───────────────────────────────────────────────

/// Average colour of an HDR environment map, scaled so the brightest channel is 1
pub fn load_environment_tint(path: &Path) -> Result<[f32; 3], AssetError> {
    let image = image::load_from_memory(&read(path)?)?.to_rgb32f();
    let count = (image.width() as usize * image.height() as usize).max(1) as f32;
    let mut sum = [0.0f32; 3];
    for pixel in image.pixels() {
        for (s, c) in sum.iter_mut().zip(pixel.0) {
            *s += c.max(0.0);
        }
    }
    Ok(normalize_tint(sum.map(|s| s / count)))
}

pub fn normalize_tint(mean: [f32; 3]) -> [f32; 3] {
    let peak = mean.iter().cloned().fold(0.0f32, f32::max);
    if peak <= f32::EPSILON || !peak.is_finite() {
        return [1.0; 3];
    }
    mean.map(|c| c / peak)
}
