use std::collections::HashMap;

use glam::{Mat4, Vec3};
use glow::HasContext;
use shared::Decal;

use super::mesh::{self, MeshData, TexturedMesh};
use super::rig::{AMBIENT_INTENSITY, LIGHTS};
use crate::asset::RgbaTexture;

// ── Frame parameters ─────────────────────────────────────────

/// Everything the scene needs for one frame
pub struct FrameParams {
    /// Viewport rectangle [x, y, width, height] in pixels
    pub viewport: [f32; 4],
    pub model: Mat4,
    pub view_projection: Mat4,
    pub shirt_color: [f32; 3],
    pub backdrop_color: [f32; 3],
    /// Ambient tint taken from the environment map
    pub environment_tint: [f32; 3],
    pub decal: Decal,
    pub clear_color: [f32; 3],
}

// ── GPU handles ──────────────────────────────────────────────

struct GpuMesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ibo: glow::Buffer,
    index_count: i32,
}

impl GpuMesh {
    unsafe fn delete(&self, gl: &glow::Context) {
        gl.delete_vertex_array(self.vao);
        gl.delete_buffer(self.vbo);
        gl.delete_buffer(self.ibo);
    }
}

// ── Renderer ─────────────────────────────────────────────────

pub struct GlRenderer {
    shirt_program: glow::Program,
    quad_program: glow::Program,
    shirt: GpuMesh,
    decal_quad: GpuMesh,
    backdrop: GpuMesh,
    decal_textures: HashMap<Decal, glow::Texture>,
}

impl GlRenderer {
    pub fn new(
        gl: &glow::Context,
        shirt: &MeshData,
        decals: &HashMap<Decal, RgbaTexture>,
    ) -> Result<Self, String> {
        let shirt_program = compile_program(gl, SHIRT_VERT, SHIRT_FRAG)?;
        let quad_program = compile_program(gl, QUAD_VERT, QUAD_FRAG)?;

        let shirt = upload_mesh(gl, shirt)?;
        let decal_quad = upload_textured(gl, &mesh::decal_quad())?;
        let backdrop = upload_textured(gl, &mesh::backdrop())?;

        let mut decal_textures = HashMap::new();
        for (decal, texture) in decals {
            decal_textures.insert(*decal, upload_texture(gl, texture)?);
        }

        tracing::info!(
            "GL renderer ready: {} shirt triangles, {} decal textures",
            shirt.index_count / 3,
            decal_textures.len()
        );

        Ok(Self {
            shirt_program,
            quad_program,
            shirt,
            decal_quad,
            backdrop,
            decal_textures,
        })
    }

    pub fn paint(&self, gl: &glow::Context, params: &FrameParams) {
        let [x, y, w, h] = params.viewport.map(|v| v as i32);
        let mvp = params.view_projection * params.model;

        unsafe {
            gl.viewport(x, y, w, h);
            gl.scissor(x, y, w, h);
            gl.enable(glow::SCISSOR_TEST);

            let [r, g, b] = params.clear_color;
            gl.clear_color(r, g, b, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);

            // Backdrop shadow first, without depth writes
            gl.disable(glow::DEPTH_TEST);
            gl.use_program(Some(self.quad_program));
            set_uniform_mat4(gl, self.quad_program, "u_mvp", &mvp);
            set_uniform_vec3(gl, self.quad_program, "u_tint", &Vec3::from(params.backdrop_color));
            set_uniform_i32(gl, self.quad_program, "u_shadow", 1);
            draw(gl, &self.backdrop);

            // Shirt
            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LESS);
            gl.use_program(Some(self.shirt_program));
            set_uniform_mat4(gl, self.shirt_program, "u_mvp", &mvp);
            set_uniform_mat4(gl, self.shirt_program, "u_model", &params.model);
            set_uniform_vec3(gl, self.shirt_program, "u_tint", &Vec3::from(params.shirt_color));
            let ambient = Vec3::from(params.environment_tint) * AMBIENT_INTENSITY;
            set_uniform_vec3(gl, self.shirt_program, "u_ambient", &ambient);
            for (i, (position, intensity)) in LIGHTS.iter().enumerate() {
                set_uniform_vec3(gl, self.shirt_program, &format!("u_light_dir[{i}]"), &position.normalize());
                set_uniform_f32(gl, self.shirt_program, &format!("u_light_intensity[{i}]"), *intensity);
            }
            draw(gl, &self.shirt);

            // Decal, depth-tested against the shirt front
            if let Some(texture) = self.decal_textures.get(&params.decal) {
                gl.depth_func(glow::LEQUAL);
                gl.use_program(Some(self.quad_program));
                set_uniform_mat4(gl, self.quad_program, "u_mvp", &mvp);
                set_uniform_vec3(gl, self.quad_program, "u_tint", &Vec3::ONE);
                set_uniform_i32(gl, self.quad_program, "u_shadow", 0);
                gl.active_texture(glow::TEXTURE0);
                gl.bind_texture(glow::TEXTURE_2D, Some(*texture));
                set_uniform_i32(gl, self.quad_program, "u_texture", 0);
                draw(gl, &self.decal_quad);
                gl.bind_texture(glow::TEXTURE_2D, None);
            }

            gl.disable(glow::BLEND);
            gl.disable(glow::DEPTH_TEST);
            gl.disable(glow::SCISSOR_TEST);
            gl.use_program(None);
        }
    }

    #[allow(dead_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.shirt_program);
            gl.delete_program(self.quad_program);
            self.shirt.delete(gl);
            self.decal_quad.delete(gl);
            self.backdrop.delete(gl);
            for texture in self.decal_textures.values() {
                gl.delete_texture(*texture);
            }
        }
    }
}

// ── GPU upload ───────────────────────────────────────────────

fn upload_mesh(gl: &glow::Context, data: &MeshData) -> Result<GpuMesh, String> {
    // position(3) + normal(3) + color(3)
    upload(gl, &data.vertices, &data.indices, &[3, 3, 3])
}

fn upload_textured(gl: &glow::Context, data: &TexturedMesh) -> Result<GpuMesh, String> {
    // position(3) + uv(2)
    upload(gl, &data.vertices, &data.indices, &[3, 2])
}

fn upload(
    gl: &glow::Context,
    vertices: &[f32],
    indices: &[u32],
    layout: &[i32],
) -> Result<GpuMesh, String> {
    let floats: i32 = layout.iter().sum();
    let stride = floats * 4;
    unsafe {
        let vao = gl.create_vertex_array()?;
        gl.bind_vertex_array(Some(vao));

        let vbo = gl.create_buffer()?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, bytemuck_cast_slice(vertices), glow::STATIC_DRAW);

        let mut offset = 0;
        for (location, size) in layout.iter().enumerate() {
            gl.enable_vertex_attrib_array(location as u32);
            gl.vertex_attrib_pointer_f32(location as u32, *size, glow::FLOAT, false, stride, offset * 4);
            offset += size;
        }

        let ibo = gl.create_buffer()?;
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
        gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck_cast_slice(indices),
            glow::STATIC_DRAW,
        );

        gl.bind_vertex_array(None);

        Ok(GpuMesh {
            vao,
            vbo,
            ibo,
            index_count: indices.len() as i32,
        })
    }
}

fn upload_texture(gl: &glow::Context, texture: &RgbaTexture) -> Result<glow::Texture, String> {
    unsafe {
        let handle = gl.create_texture()?;
        gl.bind_texture(glow::TEXTURE_2D, Some(handle));
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA as i32,
            texture.width as i32,
            texture.height as i32,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelUnpackData::Slice(Some(&texture.pixels)),
        );
        gl.bind_texture(glow::TEXTURE_2D, None);
        Ok(handle)
    }
}

// ── Draw calls ───────────────────────────────────────────────

unsafe fn draw(gl: &glow::Context, mesh: &GpuMesh) {
    gl.bind_vertex_array(Some(mesh.vao));
    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(mesh.ibo));
    gl.draw_elements(glow::TRIANGLES, mesh.index_count, glow::UNSIGNED_INT, 0);
    gl.bind_vertex_array(None);
}

// ── Shader compilation ───────────────────────────────────────

fn compile_program(gl: &glow::Context, vert_src: &str, frag_src: &str) -> Result<glow::Program, String> {
    unsafe {
        let program = gl.create_program()?;
        let mut shaders = Vec::with_capacity(2);
        for (kind, src) in [(glow::VERTEX_SHADER, vert_src), (glow::FRAGMENT_SHADER, frag_src)] {
            let shader = gl.create_shader(kind)?;
            gl.shader_source(shader, src);
            gl.compile_shader(shader);
            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                gl.delete_program(program);
                return Err(format!("shader compile error: {log}"));
            }
            gl.attach_shader(program, shader);
            shaders.push(shader);
        }

        gl.link_program(program);
        for shader in shaders {
            gl.detach_shader(program, shader);
            gl.delete_shader(shader);
        }
        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(format!("program link error: {log}"));
        }
        Ok(program)
    }
}

// ── Uniform setters ──────────────────────────────────────────

fn set_uniform_mat4(gl: &glow::Context, program: glow::Program, name: &str, mat: &Mat4) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_matrix_4_f32_slice(loc.as_ref(), false, &mat.to_cols_array());
    }
}

fn set_uniform_vec3(gl: &glow::Context, program: glow::Program, name: &str, v: &Vec3) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_3_f32(loc.as_ref(), v.x, v.y, v.z);
    }
}

fn set_uniform_f32(gl: &glow::Context, program: glow::Program, name: &str, v: f32) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_1_f32(loc.as_ref(), v);
    }
}

fn set_uniform_i32(gl: &glow::Context, program: glow::Program, name: &str, v: i32) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_1_i32(loc.as_ref(), v);
    }
}

// ── Byte cast helper ─────────────────────────────────────────

fn bytemuck_cast_slice<T: Copy>(slice: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(slice.as_ptr() as *const u8, std::mem::size_of_val(slice)) }
}

// ── Shaders ──────────────────────────────────────────────────

const SHIRT_VERT: &str = r#"#version 330 core
uniform mat4 u_mvp;
uniform mat4 u_model;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec3 a_color;

out vec3 v_normal;
out vec3 v_color;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_normal = mat3(u_model) * a_normal;
    v_color = a_color;
}
"#;

const SHIRT_FRAG: &str = r#"#version 330 core
uniform vec3 u_tint;
uniform vec3 u_ambient;
uniform vec3 u_light_dir[2];
uniform float u_light_intensity[2];

in vec3 v_normal;
in vec3 v_color;

out vec4 frag_color;

void main() {
    vec3 n = normalize(v_normal);
    vec3 light = u_ambient;
    for (int i = 0; i < 2; i++) {
        // Cloth is lit from both sides
        light += vec3(abs(dot(n, u_light_dir[i])) * u_light_intensity[i]);
    }
    light += vec3(max(n.z, 0.0) * 0.35);
    frag_color = vec4(v_color * u_tint * min(light, vec3(1.2)), 1.0);
}
"#;

const QUAD_VERT: &str = r#"#version 330 core
uniform mat4 u_mvp;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec2 a_uv;

out vec2 v_uv;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_uv = a_uv;
}
"#;

const QUAD_FRAG: &str = r#"#version 330 core
uniform sampler2D u_texture;
uniform vec3 u_tint;
uniform int u_shadow;

in vec2 v_uv;
out vec4 frag_color;

void main() {
    if (u_shadow == 1) {
        // Soft contact shadow under the shirt, fading out radially
        float d = length(v_uv - vec2(0.5, 0.49)) * 12.0;
        float alpha = 0.55 * (1.0 - smoothstep(0.18, 0.75, d));
        frag_color = vec4(u_tint * 0.35, alpha);
    } else {
        vec4 texel = texture(u_texture, v_uv);
        if (texel.a < 0.01) discard;
        frag_color = vec4(texel.rgb * u_tint, texel.a);
    }
}
"#;
