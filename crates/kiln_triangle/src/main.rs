//! Rotating RGB triangle on top of the kiln platform layer.
//!
//! Each frame advances the rotation by a fixed step, rewrites the vertex
//! positions into a dynamic buffer and draws a single triangle. Resizing the
//! window resets the viewport; Escape or closing the window exits.
//!
//! The shader comes from `assets/shaders/triangle.glsl` under the program root
//! when that file exists, and is reloaded when it changes on disk. Otherwise
//! the built-in source is used. Window settings can be overridden with a
//! `kiln_triangle.json` platform config in the working directory.

use std::f32::consts::PI;
use std::path::Path;

use glow::HasContext;

use kiln_core::math::UVec2;
use kiln_core::{Event, Key};
use kiln_gl::{
    check_gl_error, load_shaders, load_shaders_by_text, set_buffer_data, BufferUsage,
};
use kiln_platform::{
    load_config_from_path, program_file_path, Context, FileWatcher, Frame, LoopControl,
    PlatformConfig, PlatformError, Program,
};

const CONFIG_PATH: &str = "kiln_triangle.json";
const SHADER_PATH: &str = "assets/shaders/triangle.glsl";
const ANGLE_STEP: f32 = 0.025;

const VERTEX_SHADER: &str = "\
attribute vec4 a_position;
attribute vec4 a_color;

varying vec4 v_color;

void main() {
    gl_Position = a_position;
    v_color = a_color;
}
";

const FRAGMENT_SHADER: &str = "\
varying vec4 v_color;

void main() {
    gl_FragColor = v_color;
}
";

const COLORS: [u8; 12] = [
    255, 0, 0, 255, //
    0, 255, 0, 255, //
    0, 0, 255, 255,
];

/// Homogeneous positions of the three corners on the unit circle, 120 degrees apart.
fn triangle_positions(angle: f32) -> [f32; 12] {
    let mut positions = [0.0; 12];
    for (corner, chunk) in positions.chunks_exact_mut(4).enumerate() {
        let a = angle + corner as f32 * (2.0 * PI / 3.0);
        chunk.copy_from_slice(&[a.cos(), a.sin(), 0.0, 1.0]);
    }
    positions
}

/// Shader program plus the attribute slots the draw call feeds.
struct TriangleShader {
    program: glow::Program,
    position_location: u32,
    color_location: u32,
}

impl TriangleShader {
    fn new(gl: &glow::Context, program: glow::Program) -> Result<Self, String> {
        let position_location = unsafe { gl.get_attrib_location(program, "a_position") }
            .ok_or_else(|| "shader attribute a_position is missing".to_string())?;
        let color_location = unsafe { gl.get_attrib_location(program, "a_color") }
            .ok_or_else(|| "shader attribute a_color is missing".to_string())?;
        Ok(Self {
            program,
            position_location,
            color_location,
        })
    }

    fn load(gl: &glow::Context, shader_path: Option<&Path>) -> Result<Self, String> {
        let program = match shader_path {
            Some(path) => load_shaders(gl, path),
            None => load_shaders_by_text(gl, VERTEX_SHADER, FRAGMENT_SHADER),
        }
        .map_err(|e| e.to_string())?;

        match Self::new(gl, program) {
            Ok(shader) => Ok(shader),
            Err(e) => {
                unsafe { gl.delete_program(program) };
                Err(e)
            }
        }
    }

    fn bind(&self, gl: &glow::Context) {
        unsafe {
            gl.use_program(Some(self.program));
            gl.enable_vertex_attrib_array(self.position_location);
            gl.enable_vertex_attrib_array(self.color_location);
        }
    }
}

struct Triangle {
    angle: f32,
    shader: TriangleShader,
    shader_watcher: Option<FileWatcher>,
    position_buffer: glow::Buffer,
    color_buffer: glow::Buffer,
    /// Latest window size from a `Resize` event, applied in `draw`.
    pending_viewport: Option<UVec2>,
    /// Set by `update` when the shader file changed; handled in `draw`.
    shader_changed: bool,
}

impl Triangle {
    fn reload_shader(&mut self, gl: &glow::Context) {
        let Some(watcher) = &self.shader_watcher else {
            return;
        };
        match TriangleShader::load(gl, Some(watcher.path())) {
            Ok(shader) => {
                unsafe { gl.delete_program(self.shader.program) };
                self.shader = shader;
                self.shader.bind(gl);
                log::info!("Reloaded shader {}", watcher.path().display());
            }
            Err(e) => log::warn!("Shader reload failed, keeping previous program: {e}"),
        }
    }
}

impl Program for Triangle {
    fn init(ctx: &mut Context<'_>) -> Result<Self, PlatformError> {
        let gl = ctx.gl;
        let shader_path = program_file_path(ctx.config, SHADER_PATH);
        let shader_watcher = shader_path.exists().then(|| FileWatcher::new(shader_path));

        let shader = TriangleShader::load(gl, shader_watcher.as_ref().map(FileWatcher::path))?;
        shader.bind(gl);

        let position_buffer = kiln_gl::create_buffer(gl)?;
        let color_buffer = kiln_gl::create_buffer(gl)?;
        set_buffer_data(gl, color_buffer, &COLORS, BufferUsage::Static);

        check_gl_error!(gl);
        log::info!(
            "Triangle ready ({} shader)",
            if shader_watcher.is_some() { "file" } else { "built-in" }
        );

        Ok(Self {
            angle: 0.0,
            shader,
            shader_watcher,
            position_buffer,
            color_buffer,
            pending_viewport: None,
            shader_changed: false,
        })
    }

    fn update(&mut self, frame: &mut Frame<'_>) -> LoopControl {
        for event in frame.events {
            match event {
                Event::Close | Event::KeyDown(Key::ESCAPE) => return LoopControl::Exit,
                Event::Resize(size) => self.pending_viewport = Some(*size),
                _ => {}
            }
        }

        if let Some(watcher) = self.shader_watcher.as_mut() {
            self.shader_changed |= watcher.should_reload();
        }

        self.angle += ANGLE_STEP;
        LoopControl::Continue
    }

    fn draw(&mut self, gl: &glow::Context) {
        if std::mem::take(&mut self.shader_changed) {
            self.reload_shader(gl);
        }
        if let Some(size) = self.pending_viewport.take() {
            unsafe { gl.viewport(0, 0, size.x as i32, size.y as i32) };
        }

        set_buffer_data(
            gl,
            self.position_buffer,
            &triangle_positions(self.angle),
            BufferUsage::Dynamic,
        );

        unsafe {
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.position_buffer));
            gl.vertex_attrib_pointer_f32(
                self.shader.position_location,
                4,
                glow::FLOAT,
                false,
                0,
                0,
            );
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.color_buffer));
            gl.vertex_attrib_pointer_f32(
                self.shader.color_location,
                4,
                glow::UNSIGNED_BYTE,
                true,
                0,
                0,
            );

            gl.draw_arrays(glow::TRIANGLES, 0, 3);
        }
    }
}

fn default_config() -> PlatformConfig {
    PlatformConfig::default()
        .with_title("Triangle example")
        .with_size(600, 600)
}

fn load_config() -> PlatformConfig {
    let path = Path::new(CONFIG_PATH);
    if !path.exists() {
        return default_config();
    }
    match load_config_from_path(path) {
        Ok(config) => {
            log::info!("Loaded platform config from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("{e}; using defaults");
            default_config()
        }
    }
}

fn main() {
    kiln_platform::init_logging();
    log::info!("kiln triangle starting ({} backend)", kiln_platform::BACKEND_NAME);

    if let Err(e) = kiln_platform::run::<Triangle>(load_config()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
