//! Small OpenGL conveniences on top of glow: error reporting, buffer uploads,
//! shader compilation and texture loading.

pub mod buffer;
pub mod error;
pub mod shader;
pub mod texture;

pub use buffer::{create_buffer, set_buffer_data, BufferUsage};
pub use error::{check_error, drain_errors, error_name, MAX_DRAINED_ERRORS};
pub use shader::{load_shaders, load_shaders_by_text, ShaderError, ShaderStage};
pub use texture::{load_texture, TextureImage};
