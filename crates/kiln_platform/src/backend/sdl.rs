//! SDL2 backend: SDL owns the window, the GL context and the event pump.

use std::time::Instant;

use sdl2::event::{Event as SdlEvent, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::mouse::{Cursor as SdlCursor, MouseButton as SdlButton, SystemCursor};
use sdl2::video::{GLContext, GLProfile, SwapInterval, Window};

use kiln_core::math::{IVec2, UVec2};
use kiln_core::{Cursor, Key, MouseButton};

use crate::bridge::EventBridge;
use crate::config::PlatformConfig;
use crate::error::PlatformError;
use crate::program::{Context, LoopControl, Program};

/// Opens the window, initializes `P` and runs it until it asks to exit.
pub fn run<P: Program>(config: PlatformConfig) -> Result<(), PlatformError> {
    config.validate().map_err(PlatformError::Window)?;

    let sdl =
        sdl2::init().map_err(|e| PlatformError::EventLoop(format!("failed to init SDL2: {e}")))?;
    let video = sdl
        .video()
        .map_err(|e| PlatformError::Window(format!("failed to init SDL2 video: {e}")))?;

    let (window, _gl_context) = create_window_and_context(&video, &config)?;
    if config.vsync {
        if let Err(e) = video.gl_set_swap_interval(SwapInterval::VSync) {
            log::warn!("Vsync unavailable: {e}");
        }
    }

    let gl = unsafe {
        glow::Context::from_loader_function(|name| video.gl_get_proc_address(name) as *const _)
    };
    log::info!("OpenGL context: {:?}", glow::HasContext::version(&gl));

    let mut events = sdl
        .event_pump()
        .map_err(|e| PlatformError::EventLoop(format!("failed to get SDL event pump: {e}")))?;

    let mut bridge = EventBridge::new(config.max_events_per_frame);
    let size = drawable_size(&window);
    log::info!("Window created: {}x{}", size.x, size.y);
    bridge.resize(size);

    let mut program = P::init(&mut Context {
        gl: &gl,
        config: &config,
        size,
    })?;

    // SDL keeps a pointer to the active cursor; it must outlive its use.
    let mut _active_cursor: Option<SdlCursor> = None;
    let start = Instant::now();

    loop {
        for event in events.poll_iter() {
            translate_event(&mut bridge, &window, event);
        }

        let outcome = bridge.run_frame(&mut program, start.elapsed().as_secs_f64());
        if let Some(cursor) = outcome.cursor {
            match SdlCursor::from_system(map_cursor(cursor)) {
                Ok(sdl_cursor) => {
                    sdl_cursor.set();
                    _active_cursor = Some(sdl_cursor);
                }
                Err(e) => log::warn!("Failed to set cursor {cursor}: {e}"),
            }
        }
        if outcome.control == LoopControl::Exit {
            log::info!("Program requested exit");
            break;
        }

        program.draw(&gl);
        window.gl_swap_window();
    }

    Ok(())
}

/// Tries the configured desktop version first, then GLES 2.0.
fn create_window_and_context(
    video: &sdl2::VideoSubsystem,
    config: &PlatformConfig,
) -> Result<(Window, GLContext), PlatformError> {
    let candidates = [
        (GLProfile::Compatibility, config.gl_major, config.gl_minor),
        (GLProfile::GLES, 2, 0),
    ];
    let mut errors = Vec::new();

    for (profile, major, minor) in candidates {
        {
            let gl_attr = video.gl_attr();
            gl_attr.set_context_profile(profile);
            gl_attr.set_context_version(major, minor);
            gl_attr.set_depth_size(config.depth_bits);
            gl_attr.set_double_buffer(true);
        }

        let mut window_builder = video.window(&config.title, config.width, config.height);
        window_builder.opengl().position_centered().resizable();

        let window = match window_builder.build() {
            Ok(window) => window,
            Err(e) => {
                errors.push(format!("{profile:?} {major}.{minor}: window build failed ({e})"));
                continue;
            }
        };

        let gl_context = match window.gl_create_context() {
            Ok(ctx) => ctx,
            Err(e) => {
                errors.push(format!("{profile:?} {major}.{minor}: context create failed ({e})"));
                continue;
            }
        };

        if let Err(e) = window.gl_make_current(&gl_context) {
            errors.push(format!("{profile:?} {major}.{minor}: make current failed ({e})"));
            continue;
        }

        if !errors.is_empty() {
            log::warn!("Fell back to {profile:?} {major}.{minor}: {}", errors.join(" | "));
        }
        return Ok((window, gl_context));
    }

    Err(PlatformError::Context(format!("Attempts: {}", errors.join(" | "))))
}

fn translate_event(bridge: &mut EventBridge, window: &Window, event: SdlEvent) {
    match event {
        SdlEvent::Quit { .. } => bridge.close(),

        SdlEvent::Window { win_event, .. } => match win_event {
            WindowEvent::SizeChanged(..) => bridge.resize(drawable_size(window)),
            WindowEvent::FocusLost => bridge.focus_lost(),
            WindowEvent::Close => bridge.close(),
            _ => {}
        },

        SdlEvent::KeyDown {
            keycode: Some(keycode),
            ..
        } => {
            if let Some(key) = map_keycode(keycode) {
                bridge.key_down(key);
            }
        }

        SdlEvent::KeyUp {
            keycode: Some(keycode),
            ..
        } => {
            if let Some(key) = map_keycode(keycode) {
                bridge.key_up(key);
            }
        }

        SdlEvent::MouseButtonDown { mouse_btn, x, y, .. } => {
            if let Some(button) = map_button(mouse_btn) {
                bridge.mouse_button(button, true, IVec2::new(x, y));
            }
        }

        SdlEvent::MouseButtonUp { mouse_btn, x, y, .. } => {
            if let Some(button) = map_button(mouse_btn) {
                bridge.mouse_button(button, false, IVec2::new(x, y));
            }
        }

        SdlEvent::MouseMotion { x, y, .. } => bridge.mouse_move(IVec2::new(x, y)),

        _ => {}
    }
}

fn drawable_size(window: &Window) -> UVec2 {
    let (width, height) = window.drawable_size();
    UVec2::new(width, height)
}

fn map_keycode(keycode: Keycode) -> Option<Key> {
    match keycode {
        Keycode::Left => Some(Key::LEFT),
        Keycode::Right => Some(Key::RIGHT),
        Keycode::Up => Some(Key::UP),
        Keycode::Down => Some(Key::DOWN),
        Keycode::Escape => Some(Key::ESCAPE),
        Keycode::Space => Some(Key::SPACE),
        Keycode::Return | Keycode::KpEnter => Some(Key::RETURN),
        Keycode::LShift | Keycode::RShift => Some(Key::SHIFT),
        // Letter and digit keys are named by their single upper-case character.
        other => {
            let name = other.name();
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphanumeric() => Key::from_char(c),
                _ => None,
            }
        }
    }
}

fn map_button(button: SdlButton) -> Option<MouseButton> {
    match button {
        SdlButton::Left => Some(MouseButton::Left),
        SdlButton::Right => Some(MouseButton::Right),
        _ => None,
    }
}

fn map_cursor(cursor: Cursor) -> SystemCursor {
    match cursor {
        Cursor::Arrow => SystemCursor::Arrow,
        Cursor::Pointer => SystemCursor::Hand,
        Cursor::Wait => SystemCursor::Wait,
        Cursor::Write => SystemCursor::IBeam,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_keycodes_use_legacy_codes() {
        assert_eq!(map_keycode(Keycode::LShift), Some(Key::SHIFT));
        assert_eq!(map_keycode(Keycode::RShift), Some(Key::SHIFT));
        assert_eq!(map_keycode(Keycode::Return), Some(Key::RETURN));
        assert_eq!(map_keycode(Keycode::Escape), Some(Key::ESCAPE));
        assert_eq!(map_keycode(Keycode::Left), Some(Key::LEFT));
        assert_eq!(map_keycode(Keycode::Down), Some(Key::DOWN));
    }

    #[test]
    fn only_left_and_right_buttons() {
        assert_eq!(map_button(SdlButton::Left), Some(MouseButton::Left));
        assert_eq!(map_button(SdlButton::Right), Some(MouseButton::Right));
        assert_eq!(map_button(SdlButton::Middle), None);
    }

    #[test]
    fn cursors_map_to_system_cursors() {
        assert!(matches!(map_cursor(Cursor::Pointer), SystemCursor::Hand));
        assert!(matches!(map_cursor(Cursor::Write), SystemCursor::IBeam));
    }
}
