use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    EventLoop(String),
    Window(String),
    /// No usable GL context (neither the requested version nor the fallback).
    Context(String),
    Surface(String),
    /// Returned by [`Program::init`](crate::Program::init).
    Init(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventLoop(msg) => write!(f, "Event loop error: {msg}"),
            Self::Window(msg) => write!(f, "Cannot create window: {msg}"),
            Self::Context(msg) => write!(f, "Could not create OpenGL context: {msg}"),
            Self::Surface(msg) => write!(f, "Could not create OpenGL surface: {msg}"),
            Self::Init(msg) => write!(f, "Program initialization failed: {msg}"),
        }
    }
}

impl std::error::Error for PlatformError {}

impl From<String> for PlatformError {
    fn from(msg: String) -> Self {
        Self::Init(msg)
    }
}
