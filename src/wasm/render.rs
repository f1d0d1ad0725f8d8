use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::config::ParticleConfig;
use crate::error::{SiteError, SiteResult};
use crate::particles::{Camera, Mat4, ParticleField};

const VERTEX_SHADER: &str = r#"#version 300 es
in vec3 a_pos;
in vec4 a_color;
in float a_size;
uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_proj;
uniform float u_size_scale;
out vec4 v_color;
out float v_depth;
void main() {
    vec4 mv = u_view * u_model * vec4(a_pos, 1.0);
    v_depth = -mv.z;
    v_color = a_color;
    gl_PointSize = max(1.0, a_size * u_size_scale / max(v_depth, 0.001));
    gl_Position = u_proj * mv;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;
in vec4 v_color;
in float v_depth;
uniform vec3 u_fog_color;
uniform float u_fog_near;
uniform float u_fog_far;
uniform float u_fog_enabled;
out vec4 out_color;
void main() {
    float d = length(gl_PointCoord - vec2(0.5));
    if (d > 0.5) discard;
    vec3 rgb = v_color.rgb;
    if (u_fog_enabled > 0.5) {
        rgb = mix(rgb, u_fog_color, smoothstep(u_fog_near, u_fog_far, v_depth));
    }
    out_color = vec4(rgb, v_color.a * smoothstep(0.5, 0.35, d));
}
"#;

/// Interleaved: position (3), rgba (4), size (1).
const FLOATS_PER_VERTEX: i32 = 8;
/// Stars are sized in screen units: drei-style 30 / depth with a 3x twinkle base.
const STAR_SIZE_SCALE: f32 = 90.0;

struct Batch {
    vao: WebGlVertexArrayObject,
    _buffer: WebGlBuffer,
    count: i32,
}

struct Uniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    proj: Option<WebGlUniformLocation>,
    size_scale: Option<WebGlUniformLocation>,
    fog_color: Option<WebGlUniformLocation>,
    fog_near: Option<WebGlUniformLocation>,
    fog_far: Option<WebGlUniformLocation>,
    fog_enabled: Option<WebGlUniformLocation>,
}

/// Draws a [`ParticleField`] into the background canvas.
pub(crate) struct ParticleRenderer {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    uniforms: Uniforms,
    stars: Batch,
    dust: Batch,
    camera: Camera,
    fog: ([f32; 3], f32, f32),
}

impl ParticleRenderer {
    #[tracing::instrument(skip_all, fields(dust = field.dust.len(), stars = field.stars.len()))]
    pub(crate) fn new(
        canvas: HtmlCanvasElement,
        field: &ParticleField,
        config: &ParticleConfig,
    ) -> SiteResult<Self> {
        let gl: GL = canvas
            .get_context("webgl2")
            .map_err(|_| SiteError::render("get_context failed"))?
            .ok_or_else(|| SiteError::render("WebGL2 not supported"))?
            .dyn_into()
            .map_err(|_| SiteError::render("context is not WebGL2"))?;

        let vs = compile(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
        let fs = compile(&gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link(&gl, &vs, &fs)?;

        let uniforms = Uniforms {
            model: gl.get_uniform_location(&program, "u_model"),
            view: gl.get_uniform_location(&program, "u_view"),
            proj: gl.get_uniform_location(&program, "u_proj"),
            size_scale: gl.get_uniform_location(&program, "u_size_scale"),
            fog_color: gl.get_uniform_location(&program, "u_fog_color"),
            fog_near: gl.get_uniform_location(&program, "u_fog_near"),
            fog_far: gl.get_uniform_location(&program, "u_fog_far"),
            fog_enabled: gl.get_uniform_location(&program, "u_fog_enabled"),
        };

        let star_vertices: Vec<f32> = field
            .stars
            .iter()
            .flat_map(|s| {
                let [x, y, z] = s.position;
                let b = s.brightness;
                [x, y, z, b, b, b, 1.0, s.size]
            })
            .collect();
        let dust_diameter = config.dust_radius * 2.0;
        let dust_vertices: Vec<f32> = field
            .dust
            .iter()
            .flat_map(|d| {
                let [x, y, z] = d.position;
                let [r, g, b, a] = d.color.with_alpha(config.dust_opacity);
                [x, y, z, r, g, b, a, dust_diameter]
            })
            .collect();

        let stars = upload(&gl, &program, &star_vertices)?;
        let dust = upload(&gl, &program, &dust_vertices)?;

        gl.enable(GL::BLEND);
        gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA);

        let fog = &config.fog_color;
        let renderer = Self {
            canvas,
            gl,
            program,
            uniforms,
            stars,
            dust,
            camera: Camera::new(config.camera_z),
            fog: ([fog.r, fog.g, fog.b], config.fog_near, config.fog_far),
        };
        renderer.resize();
        Ok(renderer)
    }

    /// Matches the drawing buffer to the canvas' CSS size.
    fn resize(&self) {
        let w = self.canvas.client_width().max(1) as u32;
        let h = self.canvas.client_height().max(1) as u32;
        if self.canvas.width() != w || self.canvas.height() != h {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            self.gl.viewport(0, 0, w as i32, h as i32);
        }
    }

    pub(crate) fn draw(&self, field: &ParticleField) {
        self.resize();
        let gl = &self.gl;
        let (w, h) = (self.canvas.width() as f32, self.canvas.height() as f32);

        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);
        gl.use_program(Some(&self.program));

        let u = &self.uniforms;
        let proj = self.camera.projection(w / h);
        gl.uniform_matrix4fv_with_f32_array(u.view.as_ref(), false, &self.camera.view().0);
        gl.uniform_matrix4fv_with_f32_array(u.proj.as_ref(), false, &proj.0);
        let (fog_color, near, far) = self.fog;
        gl.uniform3f(u.fog_color.as_ref(), fog_color[0], fog_color[1], fog_color[2]);
        gl.uniform1f(u.fog_near.as_ref(), near);
        gl.uniform1f(u.fog_far.as_ref(), far);

        // No fog on stars; the whole shell lies beyond fog_far.
        self.draw_batch(&self.stars, &field.group_matrix(), STAR_SIZE_SCALE, false);

        // World-space dust diameter to pixels: half the viewport height times
        // the projection's focal term.
        let dust_scale = h * 0.5 * proj.0[5];
        self.draw_batch(&self.dust, &field.dust_matrix(), dust_scale, true);
    }

    fn draw_batch(&self, batch: &Batch, model: &Mat4, size_scale: f32, fog: bool) {
        if batch.count == 0 {
            return;
        }
        let gl = &self.gl;
        let u = &self.uniforms;
        gl.uniform_matrix4fv_with_f32_array(u.model.as_ref(), false, &model.0);
        gl.uniform1f(u.size_scale.as_ref(), size_scale);
        gl.uniform1f(u.fog_enabled.as_ref(), if fog { 1.0 } else { 0.0 });
        gl.bind_vertex_array(Some(&batch.vao));
        gl.draw_arrays(GL::POINTS, 0, batch.count);
        gl.bind_vertex_array(None);
    }
}

fn compile(gl: &GL, kind: u32, source: &str) -> SiteResult<WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| SiteError::render("create_shader failed"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    let ok = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        Err(SiteError::render(format!("shader compile failed: {log}")))
    }
}

fn link(gl: &GL, vs: &WebGlShader, fs: &WebGlShader) -> SiteResult<WebGlProgram> {
    let program = gl
        .create_program()
        .ok_or_else(|| SiteError::render("create_program failed"))?;
    gl.attach_shader(&program, vs);
    gl.attach_shader(&program, fs);
    gl.link_program(&program);
    let ok = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        Err(SiteError::render(format!("program link failed: {log}")))
    }
}

fn upload(gl: &GL, program: &WebGlProgram, vertices: &[f32]) -> SiteResult<Batch> {
    let vao = gl
        .create_vertex_array()
        .ok_or_else(|| SiteError::render("create_vertex_array failed"))?;
    let buffer = gl
        .create_buffer()
        .ok_or_else(|| SiteError::render("create_buffer failed"))?;

    gl.bind_vertex_array(Some(&vao));
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    let data = js_sys::Float32Array::from(vertices);
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &data, GL::STATIC_DRAW);

    let stride = FLOATS_PER_VERTEX * 4;
    for (name, size, offset) in [("a_pos", 3, 0), ("a_color", 4, 3), ("a_size", 1, 7)] {
        let loc = gl.get_attrib_location(program, name);
        if loc < 0 {
            return Err(SiteError::render(format!("missing attribute {name}")));
        }
        let loc = loc as u32;
        gl.enable_vertex_attrib_array(loc);
        gl.vertex_attrib_pointer_with_i32(loc, size, GL::FLOAT, false, stride, offset * 4);
    }
    gl.bind_vertex_array(None);

    Ok(Batch {
        vao,
        _buffer: buffer,
        count: (vertices.len() as i32) / FLOATS_PER_VERTEX,
    })
}
