use std::num::NonZeroU32;
use std::time::Instant;

use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use kiln_core::math::UVec2;

use super::winit_app::GlTarget;
use crate::config::PlatformConfig;
use crate::error::PlatformError;

/// A winit window with a current glutin context.
pub(crate) struct DesktopTarget {
    // Field order is drop order: GL state goes before the window it renders to.
    gl: glow::Context,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
    start: Instant,
}

impl GlTarget for DesktopTarget {
    fn create(
        event_loop: &ActiveEventLoop,
        config: &PlatformConfig,
    ) -> Result<Self, PlatformError> {
        let window_attributes = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height));

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(config.depth_bits);

        let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attributes));
        let (window, gl_config) = display_builder
            .build(event_loop, template, |configs| {
                configs
                    .reduce(|accum, candidate| {
                        if candidate.num_samples() > accum.num_samples() {
                            candidate
                        } else {
                            accum
                        }
                    })
                    .expect("glutin offers at least one config")
            })
            .map_err(|e| PlatformError::Context(format!("no matching pixel format: {e}")))?;
        let window = window.ok_or_else(|| {
            PlatformError::Window("display builder returned no window".to_string())
        })?;

        let window_handle = window
            .window_handle()
            .map_err(|e| PlatformError::Window(e.to_string()))?
            .as_raw();
        let gl_display = gl_config.display();

        let requested = Version::new(config.gl_major, config.gl_minor);
        let mut desktop_attributes =
            ContextAttributesBuilder::new().with_context_api(ContextApi::OpenGl(Some(requested)));
        if (config.gl_major, config.gl_minor) >= (3, 2) {
            desktop_attributes = desktop_attributes.with_profile(GlProfile::Compatibility);
        }
        let desktop_attributes = desktop_attributes.build(Some(window_handle));
        let fallback_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(Version::new(2, 0))))
            .build(Some(window_handle));

        let not_current = unsafe {
            gl_display
                .create_context(&gl_config, &desktop_attributes)
                .or_else(|e| {
                    log::warn!(
                        "OpenGL {}.{} unavailable ({e}), falling back to GLES 2.0",
                        config.gl_major,
                        config.gl_minor
                    );
                    gl_display.create_context(&gl_config, &fallback_attributes)
                })
        }
        .map_err(|e| PlatformError::Context(e.to_string()))?;

        let size = window.inner_size();
        let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            window_handle,
            non_zero(size.width),
            non_zero(size.height),
        );
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|e| PlatformError::Surface(e.to_string()))?;

        let context = not_current
            .make_current(&surface)
            .map_err(|e| PlatformError::Context(e.to_string()))?;

        if config.vsync {
            let interval = SwapInterval::Wait(NonZeroU32::MIN);
            if let Err(e) = surface.set_swap_interval(&context, interval) {
                log::warn!("Vsync unavailable: {e}");
            }
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|s| gl_display.get_proc_address(s))
        };
        log::info!("OpenGL context: {:?}", glow::HasContext::version(&gl));

        Ok(Self {
            gl,
            surface,
            context,
            window,
            start: Instant::now(),
        })
    }

    fn window(&self) -> &Window {
        &self.window
    }

    fn gl(&self) -> &glow::Context {
        &self.gl
    }

    fn drawable_size(&self) -> UVec2 {
        let size = self.window.inner_size();
        UVec2::new(size.width, size.height)
    }

    fn resize(&self, size: UVec2) {
        // Minimized windows report 0x0; the surface keeps its last size.
        if let (Some(width), Some(height)) = (NonZeroU32::new(size.x), NonZeroU32::new(size.y)) {
            self.surface.resize(&self.context, width, height);
        }
    }

    fn present(&self) {
        if let Err(e) = self.surface.swap_buffers(&self.context) {
            log::error!("Failed to swap buffers: {e}");
        }
    }

    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

fn non_zero(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
}
