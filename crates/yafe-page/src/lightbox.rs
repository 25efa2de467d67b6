//! Fullscreen image lightbox.
//!
//! Opens on a gallery image, steps through the full set with
//! wraparound, and locks page scroll while open. Contrast with the
//! slider, which clamps at its ends.

#[derive(Debug)]
pub struct Lightbox {
    image_count: usize,
    current: Option<usize>,
}

impl Lightbox {
    pub fn new(image_count: usize) -> Self {
        Lightbox {
            image_count,
            current: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Index of the displayed image, when open.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Open on an image. Out-of-range indexes clamp to the last image;
    /// an empty gallery never opens. Returns true when this call opened
    /// a previously closed lightbox.
    pub fn open(&mut self, index: usize) -> bool {
        if self.image_count == 0 {
            return false;
        }
        let was_closed = self.current.is_none();
        self.current = Some(index.min(self.image_count - 1));
        was_closed
    }

    /// Close. Returns true when it was open.
    pub fn close(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Step to the next image, wrapping past the end.
    pub fn next(&mut self) {
        if let Some(current) = self.current {
            self.current = Some((current + 1) % self.image_count);
        }
    }

    /// Step to the previous image, wrapping past the start.
    pub fn prev(&mut self) {
        if let Some(current) = self.current {
            self.current = Some((current + self.image_count - 1) % self.image_count);
        }
    }
}
