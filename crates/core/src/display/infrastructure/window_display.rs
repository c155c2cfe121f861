use std::thread;
use std::time::Duration;

use minifb::{Key, Window, WindowOptions};

use crate::display::domain::display_sink::{DisplayError, DisplaySink};
use crate::shared::frame::Frame;

/// Desktop window showing the live annotated feed.
///
/// The window is created on the first frame so it matches the camera's
/// resolution. Pressing `q` or closing the window signals quit.
pub struct WindowDisplay {
    title: String,
    window: Option<Window>,
    buffer: Vec<u32>,
    closed: bool,
}

impl WindowDisplay {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            window: None,
            buffer: Vec::new(),
            closed: false,
        }
    }

    fn open(&mut self, width: usize, height: usize) -> Result<&mut Window, DisplayError> {
        if self.window.is_none() {
            let window = Window::new(&self.title, width, height, WindowOptions::default())
                .map_err(|e| DisplayError::Window(e.to_string()))?;
            log::info!("Opened window \"{}\" ({width}x{height})", self.title);
            self.window = Some(window);
        }
        self.window
            .as_mut()
            .ok_or_else(|| DisplayError::Window("window unavailable".into()))
    }
}

impl DisplaySink for WindowDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        if self.closed {
            return Err(DisplayError::Window("window already closed".into()));
        }
        let (width, height) = (frame.width() as usize, frame.height() as usize);

        // minifb expects 0RGB packed pixels.
        let mut buffer = std::mem::take(&mut self.buffer);
        buffer.clear();
        buffer.extend(
            frame
                .data()
                .chunks_exact(3)
                .map(|px| ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32),
        );

        let result = self
            .open(width, height)?
            .update_with_buffer(&buffer, width, height)
            .map_err(|e| DisplayError::Window(e.to_string()));
        self.buffer = buffer;
        result
    }

    fn poll_quit(&mut self, wait: Duration) -> bool {
        thread::sleep(wait);
        match &self.window {
            Some(window) => !window.is_open() || window.is_key_down(Key::Q),
            None => false,
        }
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if self.window.take().is_some() {
            log::info!("Closed window \"{}\"", self.title);
        }
    }
}
