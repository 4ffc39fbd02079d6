use bytes::{Buf, BytesMut};

use super::frames::{EventFrame, classify_line};

/// Reassembles raw byte chunks into complete protocol lines.
///
/// Chunks arrive with no alignment to line or character boundaries. The
/// decoder keeps every undelivered byte in a single buffer and converts a
/// line to text only once its trailing newline has arrived; `\n` is an ASCII
/// byte and cannot occur inside a multi-byte UTF-8 sequence, so a character
/// split across chunks just stays buffered until its line completes.
#[derive(Debug)]
pub struct LineDecoder {
    buffer: BytesMut,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(8192),
        }
    }

    /// Append one raw chunk without parsing anything yet.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Drain the next complete line from the buffer and classify it.
    ///
    /// Returns `None` once no full line remains; whatever follows the last
    /// newline is left in place for the next `push`. Blank lines are skipped.
    pub fn next_frame(&mut self) -> Option<EventFrame> {
        loop {
            let newline = self.buffer.iter().position(|&b| b == b'\n')?;
            let line = self.buffer.split_to(newline);
            self.buffer.advance(1);

            let line = String::from_utf8_lossy(&line);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            return Some(classify_line(line));
        }
    }

    /// Feed one chunk and collect every frame it completes.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<EventFrame> {
        self.push(chunk);

        let mut frames = Vec::new();
        while let Some(frame) = self.next_frame() {
            frames.push(frame);
        }
        frames
    }

    /// Bytes held back waiting for a newline.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}
