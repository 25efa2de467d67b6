//! Page interactivity engine for the Yafe Restaurant site.
//!
//! Pure state machines for everything the page does in front of the
//! user: the mobile navigation drawer, the menu explorer, the gallery
//! slider and lightbox, scroll-driven UI state, the preloader, and the
//! booking and contact forms. The [`controller::PageController`] ties
//! them together behind a single event-in, effects-out interface.
//!
//! Nothing in this crate touches a real display or network. Hosts feed
//! events in, execute the returned effects, and read state back out.
//! Time, persistence, and analytics arrive through the service traits
//! in [`services`].

pub mod controller;
pub mod debounce;
pub mod filter;
pub mod forms;
pub mod lightbox;
pub mod nav;
pub mod picker;
pub mod preloader;
pub mod scrollspy;
pub mod services;
pub mod slider;
pub mod theme;
