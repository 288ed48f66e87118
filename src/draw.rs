// Window + input polling.
// Visual: a window the size of the background showing the composited card.

use crate::error::Error;
use crate::sensor::ArrowKeys;
use crate::types::FrameBuffer;
use minifb::{Key, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window; `fps` caps how often `present` returns (one frame per refresh tick).
    pub fn new(title: &str, width: usize, height: usize, fps: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(fps);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Pointer position in surface pixels; None while the pointer is outside the window.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn arrow_keys(&self) -> ArrowKeys {
        ArrowKeys {
            left: self.window.is_key_down(Key::Left),
            right: self.window.is_key_down(Key::Right),
            up: self.window.is_key_down(Key::Up),
            down: self.window.is_key_down(Key::Down),
        }
    }
}
