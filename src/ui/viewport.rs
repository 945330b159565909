// src/ui/viewport.rs
use std::ops::Range;

/// Window of `height` messages over the transcript. Sticks to the latest
/// message; a manual scroll lasts until the transcript changes again.
#[derive(Clone, Debug)]
pub struct Viewport {
    height: usize,
    // messages hidden below the window
    offset: usize,
    seen_len: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self { height: height.max(1), offset: 0, seen_len: 0 }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_at_latest(&self) -> bool {
        self.offset == 0
    }

    /// Call with the transcript length before drawing.
    pub fn sync(&mut self, len: usize) {
        if len != self.seen_len {
            self.seen_len = len;
            self.offset = 0;
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        let max = self.seen_len.saturating_sub(self.height);
        self.offset = (self.offset + lines).min(max);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn visible(&self) -> Range<usize> {
        let end = self.seen_len - self.offset;
        end.saturating_sub(self.height)..end
    }
}
