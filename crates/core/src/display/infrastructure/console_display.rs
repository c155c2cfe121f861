use std::io::BufRead;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};

use crate::display::domain::display_sink::{DisplayError, DisplaySink};
use crate::shared::constants::QUIT_KEY;
use crate::shared::frame::Frame;

/// Headless display: frames go to the log, commands come from stdin.
///
/// A background thread forwards stdin lines over a channel so the loop can
/// poll for the quit command without blocking. Typing `q` and Enter quits.
pub struct ConsoleDisplay {
    commands: Receiver<String>,
    frames_shown: usize,
    closed: bool,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self::with_commands(rx)
    }

    /// Display fed from an arbitrary command channel.
    pub fn with_commands(commands: Receiver<String>) -> Self {
        Self {
            commands,
            frames_shown: 0,
            closed: false,
        }
    }

    pub fn frames_shown(&self) -> usize {
        self.frames_shown
    }
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for ConsoleDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        if self.closed {
            return Err(DisplayError::Window("console display is closed".into()));
        }
        self.frames_shown += 1;
        log::debug!(
            "Frame {} ({}x{}) ready",
            frame.index(),
            frame.width(),
            frame.height()
        );
        Ok(())
    }

    fn poll_quit(&mut self, wait: Duration) -> bool {
        match self.commands.recv_timeout(wait) {
            Ok(line) => is_quit_command(&line),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            log::debug!("Console display closed after {} frames", self.frames_shown);
        }
    }
}

fn is_quit_command(line: &str) -> bool {
    let mut chars = line.trim().chars();
    chars.next() == Some(QUIT_KEY) && chars.next().is_none()
}
