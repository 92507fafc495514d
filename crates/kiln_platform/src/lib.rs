//! Window, GL context and main loop for kiln programs.
//!
//! Implement [`Program`] and hand it to [`run`]:
//!
//! ```no_run
//! use kiln_platform::{Context, Frame, LoopControl, PlatformConfig, PlatformError, Program};
//!
//! struct Blank;
//!
//! impl Program for Blank {
//!     fn init(_ctx: &mut Context<'_>) -> Result<Self, PlatformError> {
//!         Ok(Blank)
//!     }
//!
//!     fn update(&mut self, frame: &mut Frame<'_>) -> LoopControl {
//!         if frame.close_requested() {
//!             LoopControl::Exit
//!         } else {
//!             LoopControl::Continue
//!         }
//!     }
//!
//!     fn draw(&mut self, _gl: &glow::Context) {}
//! }
//!
//! kiln_platform::run::<Blank>(PlatformConfig::default()).unwrap();
//! ```

pub mod backend;
pub mod bridge;
pub mod config;
pub mod error;
pub mod files;
pub mod logging;
pub mod program;

pub use backend::{run, BACKEND_NAME};
pub use bridge::{EventBridge, FrameOutcome};
pub use config::{load_config_from_path, PlatformConfig};
pub use error::PlatformError;
pub use files::{file_modification_date, program_file_path, user_file_path, FileWatcher};
pub use logging::init_logging;
pub use program::{Context, Frame, LoopControl, Program};
