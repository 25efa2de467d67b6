//! UI events and effects.
//!
//! The host (whatever renders the page) feeds [`UiEvent`]s into the page
//! controller and executes the [`Effect`]s it gets back. Everything else
//! is readable state on the controller.

use crate::menu::{CategoryFilter, Dietary};
use crate::record::FormKind;

/// A key the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    ArrowLeft,
    ArrowRight,
}

/// An input event from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // -- menu explorer --
    /// A category tab was pressed.
    CategorySelected(CategoryFilter),
    /// A dietary chip was toggled on or off.
    DietaryToggled(Dietary),
    /// The search box content changed. Applied after a debounce.
    SearchEdited(String),

    // -- mobile navigation --
    /// The hamburger button was pressed.
    HamburgerPressed,
    /// A key landed on the focused hamburger button.
    HamburgerKeyPressed(Key),
    /// The page overlay behind the open drawer was pressed.
    OverlayPressed,
    /// A drawer link was pressed; carries the link target.
    NavLinkPressed(String),

    // -- theme --
    ThemeTogglePressed,

    // -- gallery slider and lightbox --
    SliderNextPressed,
    SliderPrevPressed,
    /// A pagination dot was pressed.
    SliderDotPressed(usize),
    /// Horizontal touch position at drag start.
    TouchStarted(i32),
    /// Horizontal touch position at drag end.
    TouchEnded(i32),
    /// A gallery image was pressed; opens the lightbox on that image.
    GalleryImagePressed(usize),
    LightboxClosePressed,
    /// A key pressed anywhere on the page. Escape closes overlays,
    /// arrows steer whichever of slider or lightbox is in front.
    KeyPressed(Key),

    // -- scroll-driven state --
    /// The viewport scrolled to this offset.
    Scrolled(i32),
    /// The floating call-to-action button was pressed.
    CtaPressed,

    // -- forms --
    /// The event-type dropdown on the event form changed.
    EventTypeChanged(String),
    /// A form was submitted with these raw field values.
    FormSubmitted {
        kind: FormKind,
        fields: Vec<(String, String)>,
    },

    // -- lifecycle --
    /// The page finished loading all resources.
    LoadCompleted,
    /// An uncaught script error was reported by the host.
    ScriptError(String),
}

/// A side effect the host must carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Prevent the page body from scrolling (drawer or lightbox open).
    LockScroll,
    /// Allow the page body to scroll again.
    UnlockScroll,
    /// Smooth-scroll the viewport to the element with this id.
    SmoothScrollTo(String),
    /// Clear every input of this form.
    ResetForm(FormKind),
}
