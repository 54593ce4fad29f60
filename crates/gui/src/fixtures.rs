//! Factory functions for test data: sample DTOs, encoded images and GLB files.

use std::io::Cursor;

use shared::{DeliveryAddress, SessionUser, SignInResponse};

use crate::viewport::mesh::MeshData;

// ── DTO factories ───────────────────────────────────────────────

pub fn sample_user(name: &str) -> SessionUser {
    SessionUser {
        id: format!("user-{}", name.to_lowercase()),
        name: name.to_string(),
        image: None,
    }
}

pub fn sign_in_response(name: &str) -> SignInResponse {
    SignInResponse {
        token: format!("token-{}", name.to_lowercase()),
        user: sample_user(name),
    }
}

pub fn sample_address(id: &str) -> DeliveryAddress {
    DeliveryAddress {
        id: id.to_string(),
        street: "12 Market St".into(),
        city: "Portland".into(),
        state: "OR".into(),
        zip: "97201".into(),
    }
}

// ── Encoded assets ──────────────────────────────────────────────

/// Solid-colour PNG
pub fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Result<Vec<u8>, image::ImageError> {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

/// GLB magic number: "glTF"
const GLB_MAGIC: u32 = 0x46546C67;
const GLB_VERSION: u32 = 2;
const CHUNK_TYPE_JSON: u32 = 0x4E4F534A;
const CHUNK_TYPE_BIN: u32 = 0x004E4942;
const FLOAT: u32 = 5126;
const UNSIGNED_INT: u32 = 5125;

/// Single-node GLB with POSITION, NORMAL and u32 indices
pub fn glb_from_mesh(node_name: &str, mesh: &MeshData) -> Vec<u8> {
    let vertex_count = mesh.vertex_count();
    let mut bin = Vec::new();
    for v in mesh.vertices.chunks_exact(MeshData::STRIDE) {
        for f in &v[..3] {
            bin.extend_from_slice(&f.to_le_bytes());
        }
    }
    let normal_offset = bin.len();
    for v in mesh.vertices.chunks_exact(MeshData::STRIDE) {
        for f in &v[3..6] {
            bin.extend_from_slice(&f.to_le_bytes());
        }
    }
    let index_offset = bin.len();
    for i in &mesh.indices {
        bin.extend_from_slice(&i.to_le_bytes());
    }

    let json = serde_json::json!({
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "name": node_name, "mesh": 0 }],
        "meshes": [{
            "primitives": [{
                "attributes": { "POSITION": 0, "NORMAL": 1 },
                "indices": 2
            }]
        }],
        "accessors": [
            { "bufferView": 0, "componentType": FLOAT, "count": vertex_count, "type": "VEC3" },
            { "bufferView": 1, "componentType": FLOAT, "count": vertex_count, "type": "VEC3" },
            { "bufferView": 2, "componentType": UNSIGNED_INT, "count": mesh.indices.len(), "type": "SCALAR" }
        ],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": normal_offset },
            { "buffer": 0, "byteOffset": normal_offset, "byteLength": index_offset - normal_offset },
            { "buffer": 0, "byteOffset": index_offset, "byteLength": bin.len() - index_offset }
        ],
        "buffers": [{ "byteLength": bin.len() }]
    });

    let mut json_bytes = json.to_string().into_bytes();
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }
    while bin.len() % 4 != 0 {
        bin.push(0);
    }

    let total = 12 + 8 + json_bytes.len() + 8 + bin.len();
    let mut glb = Vec::with_capacity(total);
    glb.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    glb.extend_from_slice(&GLB_VERSION.to_le_bytes());
    glb.extend_from_slice(&(total as u32).to_le_bytes());
    glb.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
    glb.extend_from_slice(&CHUNK_TYPE_JSON.to_le_bytes());
    glb.extend_from_slice(&json_bytes);
    glb.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    glb.extend_from_slice(&CHUNK_TYPE_BIN.to_le_bytes());
    glb.extend_from_slice(&bin);
    glb
}
