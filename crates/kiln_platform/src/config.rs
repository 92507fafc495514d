use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use kiln_core::{MAX_EVENTS_PER_FRAME, MAX_EVENT_CAPACITY};

/// Window, context and runtime settings shared by every backend.
///
/// All fields are optional in JSON; missing ones take the [`Default`] values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// Requested desktop GL version. Ignored by the web backend (always WebGL2).
    pub gl_major: u8,
    pub gl_minor: u8,
    pub depth_bits: u8,
    pub max_events_per_frame: usize,
    /// Root for read-only program data (shaders, textures).
    pub program_root: PathBuf,
    /// Root for user-writable data.
    pub user_root: PathBuf,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "Kiln".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
            gl_major: 2,
            gl_minor: 1,
            depth_bits: 24,
            max_events_per_frame: MAX_EVENTS_PER_FRAME,
            program_root: default_root(),
            user_root: default_root(),
        }
    }
}

impl PlatformConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn from_json_str(raw: &str) -> Result<Self, String> {
        let config: PlatformConfig = serde_json::from_str(raw)
            .map_err(|e| format!("Failed to parse platform config JSON: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "Platform config validation failed: window size {}x{} has a zero dimension",
                self.width, self.height
            ));
        }
        if self.max_events_per_frame == 0 {
            return Err(
                "Platform config validation failed: max_events_per_frame must be positive"
                    .to_string(),
            );
        }
        if self.max_events_per_frame > MAX_EVENT_CAPACITY {
            return Err(format!(
                "Platform config validation failed: max_events_per_frame {} exceeds {}",
                self.max_events_per_frame, MAX_EVENT_CAPACITY
            ));
        }
        if self.gl_major < 2 {
            return Err(format!(
                "Platform config validation failed: GL {}.{} is older than 2.0",
                self.gl_major, self.gl_minor
            ));
        }
        Ok(())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<PlatformConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read platform config {}: {e}", path.display()))?;
    PlatformConfig::from_json_str(&raw).map_err(|e| format!("{}: {e}", path.display()))
}

fn default_root() -> PathBuf {
    if cfg!(target_arch = "wasm32") {
        PathBuf::from("../run_tree")
    } else {
        PathBuf::from(".")
    }
}
