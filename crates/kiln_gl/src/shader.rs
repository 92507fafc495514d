//! Shader compilation and linking.
//!
//! Shaders are written in legacy GLSL (`attribute` / `varying`), which desktop
//! compatibility contexts and GLSL ES 1.00 both accept. The only difference that
//! matters on embedded contexts (WebGL, GLES) is the mandatory default float
//! precision in fragment shaders, which [`prepare_source`] adds when missing.
//!
//! Combined shader files hold both stages, each introduced by a marker line:
//!
//! ```text
//! #shader vertex
//! attribute vec4 a_position;
//! void main() { gl_Position = a_position; }
//! #shader fragment
//! void main() { gl_FragColor = vec4(1.0); }
//! ```
//!
//! Lines before the first marker are copied to the top of both stages.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::Path;

use glow::HasContext;

/// Longest driver info log kept in a [`ShaderError`], in bytes.
pub const MAX_INFO_LOG_LENGTH: usize = 400;

const STAGE_MARKER: &str = "#shader";
const FRAGMENT_PRECISION: &str = "precision mediump float;\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// The driver refused to allocate a shader or program object.
    Create(String),
    Compile { stage: ShaderStage, log: String },
    Link { log: String },
    /// Reading or splitting a combined shader file failed.
    Source(String),
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create(msg) => write!(f, "Couldn't create shader object: {msg}"),
            Self::Compile { stage, log } => {
                write!(f, "Couldn't compile {} shader:\n{log}", stage.label())
            }
            Self::Link { log } => write!(f, "Couldn't link shader:\n{log}"),
            Self::Source(msg) => write!(f, "Invalid shader source: {msg}"),
        }
    }
}

impl std::error::Error for ShaderError {}

/// Compiles and links a program from vertex and fragment source text.
pub fn load_shaders_by_text(
    gl: &glow::Context,
    vertex_text: &str,
    fragment_text: &str,
) -> Result<glow::Program, ShaderError> {
    let embedded = gl.version().is_embedded;
    let vertex_src = prepare_source(vertex_text, ShaderStage::Vertex, embedded);
    let fragment_src = prepare_source(fragment_text, ShaderStage::Fragment, embedded);

    unsafe {
        let vertex = compile_stage(gl, ShaderStage::Vertex, &vertex_src)?;
        let fragment = match compile_stage(gl, ShaderStage::Fragment, &fragment_src) {
            Ok(shader) => shader,
            Err(e) => {
                gl.delete_shader(vertex);
                return Err(e);
            }
        };

        let program = match gl.create_program() {
            Ok(program) => program,
            Err(e) => {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
                return Err(ShaderError::Create(e));
            }
        };

        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        let linked = gl.get_program_link_status(program);

        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        if !linked {
            let log = truncate_log(&gl.get_program_info_log(program));
            gl.delete_program(program);
            return Err(ShaderError::Link { log });
        }

        log::debug!("Linked shader program");
        Ok(program)
    }
}

/// Compiles and links a combined shader file (see the module docs for the format).
pub fn load_shaders(gl: &glow::Context, path: &Path) -> Result<glow::Program, ShaderError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        ShaderError::Source(format!("Failed to read {}: {e}", path.display()))
    })?;
    let (vertex, fragment) = split_shader_source(&raw)
        .map_err(|e| ShaderError::Source(format!("{}: {e}", path.display())))?;
    load_shaders_by_text(gl, &vertex, &fragment)
}

fn compile_stage(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader, ShaderError> {
    unsafe {
        let shader = gl
            .create_shader(stage.gl_enum())
            .map_err(ShaderError::Create)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = truncate_log(&gl.get_shader_info_log(shader));
            gl.delete_shader(shader);
            return Err(ShaderError::Compile { stage, log });
        }
        Ok(shader)
    }
}

/// Adds a default float precision to fragment shaders on embedded contexts,
/// after the `#version` line if there is one.
pub fn prepare_source(source: &str, stage: ShaderStage, embedded: bool) -> Cow<'_, str> {
    if !embedded || stage != ShaderStage::Fragment || source.contains("precision ") {
        return Cow::Borrowed(source);
    }

    let trimmed = source.trim_start();
    if trimmed.starts_with("#version") {
        let offset = source.len() - trimmed.len();
        let line_end = trimmed.find('\n').map(|i| offset + i + 1).unwrap_or(source.len());
        let (version_line, rest) = source.split_at(line_end);
        let separator = if version_line.ends_with('\n') { "" } else { "\n" };
        Cow::Owned(format!("{version_line}{separator}{FRAGMENT_PRECISION}{rest}"))
    } else {
        Cow::Owned(format!("{FRAGMENT_PRECISION}{source}"))
    }
}

/// Splits a combined shader file into `(vertex, fragment)` sources.
pub fn split_shader_source(text: &str) -> Result<(String, String), String> {
    let mut preamble = String::new();
    let mut vertex: Option<String> = None;
    let mut fragment: Option<String> = None;
    let mut current: Option<ShaderStage> = None;

    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix(STAGE_MARKER) {
            let stage = match rest.trim().to_ascii_lowercase().as_str() {
                "vertex" => ShaderStage::Vertex,
                "fragment" => ShaderStage::Fragment,
                other => {
                    return Err(format!(
                        "line {}: unknown shader stage '{other}'",
                        index + 1
                    ))
                }
            };
            let slot = match stage {
                ShaderStage::Vertex => &mut vertex,
                ShaderStage::Fragment => &mut fragment,
            };
            if slot.is_some() {
                return Err(format!(
                    "line {}: duplicate {} section",
                    index + 1,
                    stage.label()
                ));
            }
            *slot = Some(preamble.clone());
            current = Some(stage);
            continue;
        }

        let target = match current {
            None => &mut preamble,
            Some(ShaderStage::Vertex) => vertex.get_or_insert_with(String::new),
            Some(ShaderStage::Fragment) => fragment.get_or_insert_with(String::new),
        };
        target.push_str(line);
        target.push('\n');
    }

    match (vertex, fragment) {
        (Some(v), Some(f)) => Ok((v, f)),
        (None, _) => Err("missing '#shader vertex' section".to_string()),
        (_, None) => Err("missing '#shader fragment' section".to_string()),
    }
}

/// Cuts a driver log down to [`MAX_INFO_LOG_LENGTH`] bytes on a char boundary.
fn truncate_log(log: &str) -> String {
    let log = log.trim_end_matches(['\0', '\n', ' ']);
    if log.len() <= MAX_INFO_LOG_LENGTH {
        return log.to_string();
    }
    let mut end = MAX_INFO_LOG_LENGTH;
    while !log.is_char_boundary(end) {
        end -= 1;
    }
    log[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMBINED: &str = "\
#version 100
#shader vertex
attribute vec4 a_position;
void main() { gl_Position = a_position; }
#shader fragment
void main() { gl_FragColor = vec4(1.0); }
";

    #[test]
    fn test_split_combined_source() {
        let (vertex, fragment) = split_shader_source(COMBINED).unwrap();
        assert!(vertex.starts_with("#version 100\n"));
        assert!(vertex.contains("a_position"));
        assert!(!vertex.contains("gl_FragColor"));
        assert!(fragment.starts_with("#version 100\n"));
        assert!(fragment.contains("gl_FragColor"));
        assert!(!fragment.contains("a_position"));
    }

    #[test]
    fn test_split_accepts_any_stage_order_and_case() {
        let text = "#shader FRAGMENT\nfrag\n  #shader Vertex  \nvert\n";
        let (vertex, fragment) = split_shader_source(text).unwrap();
        assert_eq!(vertex, "vert\n");
        assert_eq!(fragment, "frag\n");
    }

    #[test]
    fn test_split_rejects_missing_stage() {
        let err = split_shader_source("#shader vertex\nvoid main() {}\n").unwrap_err();
        assert!(err.contains("fragment"));
        let err = split_shader_source("void main() {}\n").unwrap_err();
        assert!(err.contains("vertex"));
    }

    #[test]
    fn test_split_rejects_duplicate_and_unknown_stage() {
        let err = split_shader_source("#shader vertex\n#shader vertex\n").unwrap_err();
        assert!(err.contains("line 2"));
        assert!(err.contains("duplicate"));
        let err = split_shader_source("#shader geometry\n").unwrap_err();
        assert!(err.contains("geometry"));
    }

    #[test]
    fn test_prepare_source_desktop_is_untouched() {
        let src = "void main() {}";
        assert!(matches!(
            prepare_source(src, ShaderStage::Fragment, false),
            Cow::Borrowed(_)
        ));
        assert!(matches!(
            prepare_source(src, ShaderStage::Vertex, true),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_prepare_source_adds_precision_on_embedded() {
        let out = prepare_source("void main() {}", ShaderStage::Fragment, true);
        assert_eq!(out, "precision mediump float;\nvoid main() {}");
    }

    #[test]
    fn test_prepare_source_keeps_version_first() {
        let out = prepare_source("#version 100\nvoid main() {}", ShaderStage::Fragment, true);
        assert_eq!(out, "#version 100\nprecision mediump float;\nvoid main() {}");

        let out = prepare_source("#version 100", ShaderStage::Fragment, true);
        assert_eq!(out, "#version 100\nprecision mediump float;\n");
    }

    #[test]
    fn test_prepare_source_respects_existing_precision() {
        let src = "precision highp float;\nvoid main() {}";
        assert_eq!(prepare_source(src, ShaderStage::Fragment, true), src);
    }

    #[test]
    fn test_truncate_log() {
        assert_eq!(truncate_log("0:1: error\n\0"), "0:1: error");
        let long = "é".repeat(MAX_INFO_LOG_LENGTH);
        let cut = truncate_log(&long);
        assert!(cut.len() <= MAX_INFO_LOG_LENGTH);
        assert_eq!(cut.len() % 2, 0);
    }

    #[test]
    fn test_error_display() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Vertex,
            log: "bad".to_string(),
        };
        assert_eq!(err.to_string(), "Couldn't compile vertex shader:\nbad");
        assert_eq!(ShaderStage::Fragment.gl_enum(), 0x8B30);
        assert_eq!(ShaderStage::Vertex.gl_enum(), 0x8B31);
    }
}
