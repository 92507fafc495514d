use glow::HasContext;

/// How often a buffer's contents are expected to change.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    #[default]
    Static,
    Dynamic,
    Stream,
}

impl BufferUsage {
    pub fn gl_enum(self) -> u32 {
        match self {
            Self::Static => glow::STATIC_DRAW,
            Self::Dynamic => glow::DYNAMIC_DRAW,
            Self::Stream => glow::STREAM_DRAW,
        }
    }
}

pub fn create_buffer(gl: &glow::Context) -> Result<glow::Buffer, String> {
    unsafe { gl.create_buffer() }.map_err(|e| format!("Failed to create buffer: {e}"))
}

/// Binds `buffer` as the array buffer and replaces its contents with `data`.
pub fn set_buffer_data<T: bytemuck::Pod>(
    gl: &glow::Context,
    buffer: glow::Buffer,
    data: &[T],
    usage: BufferUsage,
) {
    unsafe {
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(data),
            usage.gl_enum(),
        );
    }
}
