//! Scroll-driven UI state.
//!
//! Two consumers of the scroll offset: the scroll-spy that highlights
//! the nav link for the section in view, and the floating
//! call-to-action button that appears once the reader is past the hero.
//! The spy runs debounced (the controller owns the debounce); the
//! button reacts on every scroll event.

/// Reading position probe sits this far below the top of the viewport,
/// so a section counts as current slightly before its edge reaches the
/// header.
const SPY_OFFSET_PX: i32 = 100;

/// One page section the spy tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Element id, also the nav link target.
    pub id: String,
    /// Document offset of the section top in pixels.
    pub top: i32,
}

impl Section {
    pub fn new(id: &str, top: i32) -> Self {
        Section {
            id: id.to_string(),
            top,
        }
    }
}

/// Highlights at most one section at a time.
#[derive(Debug, Default)]
pub struct ScrollSpy {
    sections: Vec<Section>,
    active: Option<usize>,
}

impl ScrollSpy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tracked sections. Order must follow document order.
    /// The active highlight resets until the next update.
    pub fn set_sections(&mut self, sections: Vec<Section>) {
        self.sections = sections;
        self.active = None;
    }

    /// Recompute the active section for a scroll offset. The last
    /// section whose top has passed the probe wins. Returns true when
    /// the highlight moved.
    pub fn update(&mut self, scroll: i32) -> bool {
        let probe = scroll + SPY_OFFSET_PX;
        let active = self
            .sections
            .iter()
            .rposition(|section| probe >= section.top);
        let changed = active != self.active;
        self.active = active;
        changed
    }

    /// Id of the highlighted section, if any.
    pub fn active_id(&self) -> Option<&str> {
        self.active.map(|i| self.sections[i].id.as_str())
    }
}

/// Floating call-to-action button visibility.
#[derive(Debug)]
pub struct FloatingCta {
    threshold: i32,
    visible: bool,
}

impl FloatingCta {
    pub fn new(threshold: i32) -> Self {
        FloatingCta {
            threshold,
            visible: false,
        }
    }

    /// Show past the threshold, hide at or before it. Returns true when
    /// visibility flipped.
    pub fn update(&mut self, scroll: i32) -> bool {
        let visible = scroll > self.threshold;
        let changed = visible != self.visible;
        self.visible = visible;
        changed
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
