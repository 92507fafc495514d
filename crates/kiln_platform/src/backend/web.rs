use std::cell::Cell;

use wasm_bindgen::JsCast;
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::platform::web::{WindowAttributesExtWebSys, WindowExtWebSys};
use winit::window::Window;

use kiln_core::math::UVec2;

use super::winit_app::GlTarget;
use crate::config::PlatformConfig;
use crate::error::PlatformError;

/// A canvas appended to the page body, with a WebGL2 context, kept at the
/// size of the browser window.
pub(crate) struct CanvasTarget {
    gl: glow::Context,
    window: Window,
    browser: web_sys::Window,
    performance: Option<web_sys::Performance>,
    /// Last browser size pushed to the canvas, in CSS pixels.
    css_size: Cell<(f64, f64)>,
}

impl GlTarget for CanvasTarget {
    fn create(
        event_loop: &ActiveEventLoop,
        config: &PlatformConfig,
    ) -> Result<Self, PlatformError> {
        let browser = web_sys::window()
            .ok_or_else(|| PlatformError::Window("no browser window".to_string()))?;

        let attributes = Window::default_attributes()
            .with_title(&config.title)
            .with_append(true);
        let window = event_loop
            .create_window(attributes)
            .map_err(|e| PlatformError::Window(e.to_string()))?;
        let canvas = window
            .canvas()
            .ok_or_else(|| PlatformError::Window("window has no canvas".to_string()))?;

        let options = web_sys::WebGlContextAttributes::new();
        options.set_alpha(true);
        options.set_depth(true);
        options.set_stencil(true);
        options.set_antialias(true);
        options.set_premultiplied_alpha(false);

        let context = canvas
            .get_context_with_context_options("webgl2", &options)
            .map_err(|e| PlatformError::Context(format!("{e:?}")))?
            .ok_or_else(|| PlatformError::Context("WebGL2 is not available".to_string()))?
            .dyn_into::<web_sys::WebGl2RenderingContext>()
            .map_err(|_| PlatformError::Context("context is not WebGL2".to_string()))?;
        let gl = glow::Context::from_webgl2_context(context);

        let target = Self {
            gl,
            window,
            performance: browser.performance(),
            browser,
            css_size: Cell::new((0.0, 0.0)),
        };
        target.poll();
        Ok(target)
    }

    fn window(&self) -> &Window {
        &self.window
    }

    fn gl(&self) -> &glow::Context {
        &self.gl
    }

    fn drawable_size(&self) -> UVec2 {
        let (width, height) = self.css_size.get();
        let scale = self.browser.device_pixel_ratio();
        UVec2::new((width * scale) as u32, (height * scale) as u32)
    }

    // The canvas backing store follows the CSS size set in `poll`.
    fn resize(&self, _size: UVec2) {}

    // The browser composites the canvas after each animation frame.
    fn present(&self) {}

    fn now(&self) -> f64 {
        self.performance
            .as_ref()
            .map(|p| p.now() / 1000.0)
            .unwrap_or(0.0)
    }

    fn poll(&self) {
        let Some(size) = browser_size(&self.browser) else {
            return;
        };
        if size != self.css_size.get() {
            self.css_size.set(size);
            // winit reports the new physical size through `Resized`.
            let _ = self.window.request_inner_size(LogicalSize::new(size.0, size.1));
        }
    }
}

fn browser_size(browser: &web_sys::Window) -> Option<(f64, f64)> {
    let width = browser.inner_width().ok()?.as_f64()?;
    let height = browser.inner_height().ok()?.as_f64()?;
    Some((width, height))
}
