// display.rs — Output window and keyboard polling.
//
// `DisplaySurface` is what the main loop talks to; `WindowDisplay` is the
// minifb implementation. Key polling never blocks: minifb collects key
// events while presenting a frame, and `poll_key` just reads what arrived.

use minifb::{Key, KeyRepeat, Window, WindowOptions};
use tracing::debug;

use crate::convert::frame_to_framebuffer;
use crate::error::DisplayError;
use crate::image::{Image, Rgb};

/// A surface that shows frames and reports key presses.
pub trait DisplaySurface {
    /// Present `frame`.
    fn show(&mut self, frame: &Image<Rgb>) -> Result<(), DisplayError>;

    /// At most one key pressed since the last poll, as the character it
    /// types. Returns immediately.
    fn poll_key(&mut self) -> Option<char>;

    /// False once the user closed the surface.
    fn is_open(&self) -> bool;
}

/// Translate a physical key plus shift state into the character it types
/// on a US layout. Only keys that can matter to the key bindings (and
/// their shifted forms, so those are not mistaken for bound keys) are
/// translated.
pub fn translate_key(key: Key, shift: bool) -> Option<char> {
    let ch = match (key, shift) {
        (Key::Q, false) => 'q',
        (Key::Q, true) => 'Q',
        (Key::Key1 | Key::NumPad1, false) => '1',
        (Key::Key2 | Key::NumPad2, false) => '2',
        (Key::Key3 | Key::NumPad3, false) => '3',
        (Key::Key4 | Key::NumPad4, false) => '4',
        (Key::Key1, true) => '!',
        (Key::Key2, true) => '@',
        (Key::Key3, true) => '#',
        (Key::Key4, true) => '$',
        (Key::Equal, false) => '=',
        (Key::Equal, true) => '+',
        (Key::NumPadPlus, _) => '+',
        (Key::Minus, false) => '-',
        (Key::Minus, true) => '_',
        (Key::NumPadMinus, _) => '-',
        _ => return None,
    };
    Some(ch)
}

/// A minifb window sized to the camera frame.
pub struct WindowDisplay {
    window: Window,
    /// Packed 0x00RRGGBB framebuffer, reused across frames.
    fb: Vec<u32>,
}

impl WindowDisplay {
    /// Open a window of `width` × `height`. `target_fps` of 0 leaves
    /// minifb's default update rate in place.
    pub fn new(title: &str, width: usize, height: usize, target_fps: usize) -> Result<Self, DisplayError> {
        let mut window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| DisplayError::Create(e.to_string()))?;
        if target_fps > 0 {
            window.set_target_fps(target_fps);
        }
        debug!(title, width, height, "window created");
        Ok(WindowDisplay {
            window,
            fb: vec![0; width * height],
        })
    }
}

impl DisplaySurface for WindowDisplay {
    fn show(&mut self, frame: &Image<Rgb>) -> Result<(), DisplayError> {
        let (w, h) = (frame.width(), frame.height());
        // A camera may change resolution mid-stream; minifb scales the
        // buffer to the window, so only the buffer needs resizing.
        self.fb.resize(w * h, 0);
        frame_to_framebuffer(frame, &mut self.fb);
        self.window
            .update_with_buffer(&self.fb, w, h)
            .map_err(|e| DisplayError::Update(e.to_string()))
    }

    fn poll_key(&mut self) -> Option<char> {
        let shift = self.window.is_key_down(Key::LeftShift) || self.window.is_key_down(Key::RightShift);
        self.window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .find_map(|k| translate_key(k, shift))
    }

    fn is_open(&self) -> bool {
        self.window.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_bound_keys() {
        assert_eq!(translate_key(Key::Q, false), Some('q'));
        assert_eq!(translate_key(Key::Key2, false), Some('2'));
        assert_eq!(translate_key(Key::NumPad4, false), Some('4'));
        assert_eq!(translate_key(Key::Equal, true), Some('+'));
        assert_eq!(translate_key(Key::Minus, true), Some('_'));
        assert_eq!(translate_key(Key::NumPadMinus, true), Some('-'));
    }

    #[test]
    fn test_shifted_q_is_not_q() {
        assert_eq!(translate_key(Key::Q, true), Some('Q'));
        assert_eq!(translate_key(Key::Key1, true), Some('!'));
    }

    #[test]
    fn test_unrelated_keys_ignored() {
        assert_eq!(translate_key(Key::A, false), None);
        assert_eq!(translate_key(Key::Space, false), None);
    }
}
