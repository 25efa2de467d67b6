//! Gallery slider.
//!
//! A strip of images, `visible` of them on screen, moved one slide at a
//! time by arrows, pagination dots, keyboard, or swipe. The index stays
//! inside `0..=max_index`; there is no wraparound here (the lightbox
//! wraps, the strip does not).

use yafe_types::config::SliderSection;

#[derive(Debug)]
pub struct SliderState {
    index: usize,
    item_count: usize,
    visible: usize,
    image_width: i32,
    swipe_threshold: i32,
    drag_origin: Option<i32>,
}

impl SliderState {
    pub fn new(item_count: usize, geometry: &SliderSection) -> Self {
        SliderState {
            index: 0,
            item_count,
            visible: geometry.visible.max(1),
            image_width: geometry.image_width,
            swipe_threshold: geometry.swipe_threshold,
            drag_origin: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Highest reachable index: the strip stops when the last `visible`
    /// slides are on screen.
    pub fn max_index(&self) -> usize {
        self.item_count.saturating_sub(self.visible)
    }

    /// One pagination dot per reachable position.
    pub fn dot_count(&self) -> usize {
        if self.item_count == 0 {
            0
        } else {
            self.max_index() + 1
        }
    }

    /// Horizontal translation of the strip in pixels.
    pub fn offset_px(&self) -> i32 {
        -(self.index as i32 * self.image_width)
    }

    /// Move one slide forward. Returns true when the index changed.
    pub fn advance(&mut self) -> bool {
        if self.index < self.max_index() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Move one slide back. Returns true when the index changed.
    pub fn retreat(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to a dot. Out-of-range targets clamp to the last position.
    pub fn go_to(&mut self, index: usize) {
        self.index = index;
        self.clamp();
    }

    /// Record where a touch drag started.
    pub fn touch_start(&mut self, x: i32) {
        self.drag_origin = Some(x);
    }

    /// Finish a touch drag. A movement at or past the swipe threshold
    /// moves one slide against the drag direction. Returns true when
    /// the index changed.
    pub fn touch_end(&mut self, x: i32) -> bool {
        let Some(origin) = self.drag_origin.take() else {
            return false;
        };
        let delta = x - origin;
        if delta.abs() < self.swipe_threshold {
            return false;
        }
        if delta < 0 { self.advance() } else { self.retreat() }
    }

    fn clamp(&mut self) {
        self.index = self.index.min(self.max_index());
    }
}
