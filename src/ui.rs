//! Interactive demo shell hosting the widget in a pixel-buffer window.
//!
//! This is the stand-in for the host page: it owns the window, translates
//! native mouse/keyboard input into the widget's pointer and toolbar
//! events, and mirrors the submit status into the window title (the demo's
//! status surface). The widget core never sees minifb types.

use crate::config::Config;
use crate::export::{SubmitManager, SubmitStatus};
use crate::input::{PadState, PointerEvent, Tool};
use crate::util::{self, Position};
use anyhow::{Context as _, Result};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// Options for the demo window.
pub struct DemoOptions {
    /// Initial window width in pixels.
    pub width: u32,
    /// Initial window height in pixels.
    pub height: u32,
    /// Identifier sent with submissions (may be empty).
    pub identifier: String,
}

/// Runs the demo window until it is closed or Escape is pressed.
///
/// Escape is the skip path: the window closes without exporting anything.
pub fn run_demo(config: &Config, manager: &SubmitManager, options: DemoOptions) -> Result<()> {
    let mut pad = PadState::with_defaults(
        config.background_color(),
        config.brush_color(),
        config.brush.default_width,
        (config.brush.min_width, config.brush.max_width),
        config.surface.scale,
    );

    let mut window = Window::new(
        "inkpad",
        options.width as usize,
        options.height as usize,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    )
    .context("failed to open demo window")?;
    window.set_target_fps(60);

    let mut last_size = window.get_size();
    pad.resize(last_size.0 as u32, last_size.1 as u32);

    log::info!("Controls:");
    log::info!("  - Draw: drag with the left mouse button");
    log::info!("  - Pen / Eraser: P / E");
    log::info!("  - Colors: R, G, B, Y, O, W, K (black)");
    log::info!("  - Brush size: + / -");
    log::info!("  - Clear: C");
    log::info!("  - Save (and submit if configured): S");
    log::info!("  - Skip / exit: Escape");

    let mut was_down = false;
    let mut buffer: Vec<u32> = Vec::new();
    let mut last_status = SubmitStatus::Idle;
    let mut last_title = String::new();

    while window.is_open() && !window.is_key_down(Key::Escape) {
        // Window layout changed: destructive resize, prior content is lost.
        let size = window.get_size();
        if size != last_size {
            pad.resize(size.0 as u32, size.1 as u32);
            last_size = size;
        }

        handle_keys(&mut pad, &window, manager, &options.identifier);
        handle_mouse(&mut pad, &window, &mut was_down);

        if let Some(status) = manager.try_status()
            && status != last_status
        {
            match &status {
                SubmitStatus::InProgress => log::info!("Submitting sketch..."),
                SubmitStatus::Success => log::info!("Sketch saved"),
                SubmitStatus::ValidationError(msg) => log::warn!("Validation failed: {msg}"),
                SubmitStatus::Failed(msg) => log::error!("Save failed: {msg}"),
                SubmitStatus::Idle => {}
            }
            last_status = status;
        }

        let title = format!(
            "inkpad - {:?} | {} | {:.0}px | {}",
            pad.current_tool(),
            util::color_to_name(&pad.current_color()),
            pad.brush_width(),
            status_line(&last_status),
        );
        if title != last_title {
            window.set_title(&title);
            last_title = title;
        }

        if pad.needs_redraw || buffer.is_empty() {
            if let Some(surface) = pad.surface_mut() {
                match surface.to_buffer() {
                    Ok(pixels) => buffer = pixels,
                    Err(err) => log::error!("Failed to read surface pixels: {err}"),
                }
            }
            pad.needs_redraw = false;
        }

        let device_size = pad
            .surface()
            .map(|s| (s.device_width() as usize, s.device_height() as usize));
        match device_size {
            Some((dw, dh)) if buffer.len() == dw * dh => {
                window
                    .update_with_buffer(&buffer, dw, dh)
                    .context("failed to present frame")?;
            }
            _ => window.update(),
        }
    }

    Ok(())
}

/// Toolbar stand-in: discrete key presses mutate tool state only.
fn handle_keys(pad: &mut PadState, window: &Window, manager: &SubmitManager, identifier: &str) {
    if window.is_key_pressed(Key::P, KeyRepeat::No) {
        pad.select_tool(Tool::Mark);
    }
    if window.is_key_pressed(Key::E, KeyRepeat::No) {
        pad.select_tool(Tool::Erase);
    }
    if window.is_key_pressed(Key::C, KeyRepeat::No) {
        pad.clear();
    }
    if window.is_key_pressed(Key::Equal, KeyRepeat::Yes) {
        pad.set_brush_width(pad.brush_width() + 1.0);
    }
    if window.is_key_pressed(Key::Minus, KeyRepeat::Yes) {
        pad.set_brush_width(pad.brush_width() - 1.0);
    }

    for key in window.get_keys_pressed(KeyRepeat::No) {
        if let Some(color) = key_to_char(key).and_then(util::key_to_color) {
            pad.select_color(color);
        }
    }

    if window.is_key_pressed(Key::S, KeyRepeat::No) {
        submit(pad, manager, identifier);
    }
}

/// Translates polled mouse state into discrete pointer events.
fn handle_mouse(pad: &mut PadState, window: &Window, was_down: &mut bool) {
    let down = window.get_mouse_down(MouseButton::Left);
    let position = window
        .get_mouse_pos(MouseMode::Discard)
        .map(|(x, y)| Position::new(f64::from(x), f64::from(y)));

    if down && !*was_down {
        pad.on_pointer_event(PointerEvent::Down { position });
    } else if down {
        pad.on_pointer_event(PointerEvent::Move { position });
    } else if *was_down {
        pad.on_pointer_event(PointerEvent::Up);
    }

    *was_down = down;
}

/// Point-in-time export, then hand off to the submit manager.
fn submit(pad: &mut PadState, manager: &SubmitManager, identifier: &str) {
    let Some(surface) = pad.surface() else {
        log::warn!("No surface to export yet");
        return;
    };

    match surface.to_png() {
        Ok(png) => {
            // Validation errors surface through the status line.
            let _ = manager.request_submit(identifier, png);
        }
        Err(err) => log::error!("Failed to encode sketch: {err}"),
    }
}

fn key_to_char(key: Key) -> Option<char> {
    match key {
        Key::R => Some('r'),
        Key::G => Some('g'),
        Key::B => Some('b'),
        Key::Y => Some('y'),
        Key::O => Some('o'),
        Key::W => Some('w'),
        Key::K => Some('k'),
        _ => None,
    }
}

fn status_line(status: &SubmitStatus) -> String {
    match status {
        SubmitStatus::Idle => "ready".to_string(),
        SubmitStatus::InProgress => "saving...".to_string(),
        SubmitStatus::Success => "saved".to_string(),
        SubmitStatus::ValidationError(msg) => format!("error: {msg}"),
        SubmitStatus::Failed(msg) => format!("error: {msg}"),
    }
}
