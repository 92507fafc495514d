//! Compile-time backend selection.
//!
//! - `wasm32` with the `web` feature: winit web canvas with a WebGL2 context
//! - native with the `sdl2` feature: SDL2 window, context and event pump
//! - native with the `desktop` feature: winit window with a glutin context
//!
//! `sdl2` wins when both native features are on. Each backend exposes the same
//! `run` entry point.

#[cfg(all(feature = "sdl2", not(target_arch = "wasm32")))]
mod sdl;
#[cfg(all(feature = "sdl2", not(target_arch = "wasm32")))]
pub use sdl::run;

#[cfg(any(
    all(feature = "web", target_arch = "wasm32"),
    all(feature = "desktop", not(feature = "sdl2"), not(target_arch = "wasm32"))
))]
mod winit_app;
#[cfg(any(
    all(feature = "web", target_arch = "wasm32"),
    all(feature = "desktop", not(feature = "sdl2"), not(target_arch = "wasm32"))
))]
mod winit_input;
#[cfg(any(
    all(feature = "web", target_arch = "wasm32"),
    all(feature = "desktop", not(feature = "sdl2"), not(target_arch = "wasm32"))
))]
pub use winit_app::run;

#[cfg(all(feature = "desktop", not(feature = "sdl2"), not(target_arch = "wasm32")))]
mod desktop;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
compile_error!("kiln_platform on wasm32 needs the `web` feature");
#[cfg(all(not(target_arch = "wasm32"), not(any(feature = "desktop", feature = "sdl2"))))]
compile_error!("kiln_platform needs the `desktop` or `sdl2` feature on native targets");

/// Name of the backend compiled into this build.
pub const BACKEND_NAME: &str = if cfg!(target_arch = "wasm32") {
    "web"
} else if cfg!(feature = "sdl2") {
    "sdl"
} else {
    "desktop"
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_name_follows_enabled_features() {
        let expected = if cfg!(target_arch = "wasm32") {
            "web"
        } else if cfg!(feature = "sdl2") {
            "sdl"
        } else {
            assert!(cfg!(feature = "desktop"));
            "desktop"
        };
        assert_eq!(BACKEND_NAME, expected);
    }
}
