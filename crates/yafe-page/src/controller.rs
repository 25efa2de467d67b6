//! Page controller.
//!
//! One place that owns every widget state machine and the host
//! services. Hosts call [`PageController::dispatch`] with each input
//! event and execute the returned effects, then call
//! [`PageController::tick`] on their frame or timer cadence for the
//! time-driven pieces (debounces, banners, the preloader).

use yafe_types::config::SiteConfig;
use yafe_types::event::{Effect, Key, UiEvent};
use yafe_types::menu::{CategoryFilter, MenuItem};
use yafe_types::record::{FormKind, Notifier};

use crate::debounce::Debouncer;
use crate::filter::{FilterResult, FilterState};
use crate::forms::{EventTypeField, FormFlow};
use crate::lightbox::Lightbox;
use crate::nav::MobileNav;
use crate::preloader::{Preloader, PreloaderPhase};
use crate::scrollspy::{FloatingCta, ScrollSpy, Section};
use crate::services::{Analytics, Clock, Storage};
use crate::slider::SliderState;
use crate::theme::{Theme, ThemeSwitch};

pub struct PageController {
    clock: Box<dyn Clock>,
    storage: Box<dyn Storage>,
    analytics: Box<dyn Analytics>,
    notifier: Box<dyn Notifier>,

    menu: Vec<MenuItem>,
    fallback_phone: String,
    cta_target: String,

    nav: MobileNav,
    theme: ThemeSwitch,
    filter: FilterState,
    search_debounce: Debouncer,
    pending_search: Option<String>,
    slider: SliderState,
    lightbox: Lightbox,
    spy: ScrollSpy,
    spy_debounce: Debouncer,
    pending_scroll: Option<i32>,
    cta: FloatingCta,
    preloader: Preloader,
    table_form: FormFlow,
    event_form: FormFlow,
    contact_form: FormFlow,
    event_type: EventTypeField,
}

impl PageController {
    pub fn new(
        config: &SiteConfig,
        gallery_count: usize,
        clock: Box<dyn Clock>,
        storage: Box<dyn Storage>,
        analytics: Box<dyn Analytics>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let now = clock.now_ms();
        let theme = ThemeSwitch::load(&*storage);
        PageController {
            menu: config.menu.clone(),
            fallback_phone: config.site.fallback_phone.clone(),
            cta_target: config.cta.target.clone(),
            nav: MobileNav::new(),
            theme,
            filter: FilterState::new(),
            search_debounce: Debouncer::new(config.timing.search_debounce_ms),
            pending_search: None,
            slider: SliderState::new(gallery_count, &config.slider),
            lightbox: Lightbox::new(gallery_count),
            spy: ScrollSpy::new(),
            spy_debounce: Debouncer::new(config.timing.scrollspy_debounce_ms),
            pending_scroll: None,
            cta: FloatingCta::new(config.cta.scroll_threshold),
            preloader: Preloader::new(now, &config.timing),
            table_form: FormFlow::new(FormKind::Table, config.timing.banner_hide_ms),
            event_form: FormFlow::new(FormKind::Event, config.timing.banner_hide_ms),
            contact_form: FormFlow::new(FormKind::Contact, config.timing.banner_hide_ms),
            event_type: EventTypeField::default(),
            clock,
            storage,
            analytics,
            notifier,
        }
    }

    /// Hand the spy the measured section offsets, in document order.
    pub fn set_sections(&mut self, sections: Vec<Section>) {
        self.spy.set_sections(sections);
    }

    /// Feed one input event through the page. Returns the effects the
    /// host must carry out, in order.
    pub fn dispatch(&mut self, event: UiEvent) -> Vec<Effect> {
        let now = self.clock.now_ms();
        let mut effects = Vec::new();

        match event {
            UiEvent::CategorySelected(category) => {
                self.filter.select_category(category);
                self.analytics.track("menu_filter", &category_detail(category));
            },
            UiEvent::DietaryToggled(tag) => {
                let on = self.filter.toggle_dietary(tag);
                let detail = format!("{} {}", tag.label(), if on { "on" } else { "off" });
                self.analytics.track("menu_filter", &detail);
            },
            UiEvent::SearchEdited(query) => {
                self.pending_search = Some(query);
                self.search_debounce.trigger(now);
            },

            UiEvent::HamburgerPressed => {
                if self.nav.toggle() {
                    effects.push(Effect::LockScroll);
                } else {
                    self.unlock_if_free(&mut effects);
                }
            },
            UiEvent::HamburgerKeyPressed(key) => {
                if self.nav.key(key) {
                    if self.nav.is_open() {
                        effects.push(Effect::LockScroll);
                    } else {
                        self.unlock_if_free(&mut effects);
                    }
                }
            },
            UiEvent::OverlayPressed => {
                if self.nav.close() {
                    self.unlock_if_free(&mut effects);
                }
            },
            UiEvent::NavLinkPressed(target) => {
                if self.nav.close() {
                    self.unlock_if_free(&mut effects);
                }
                let id = target.trim_start_matches('#').to_string();
                effects.push(Effect::SmoothScrollTo(id));
            },

            UiEvent::ThemeTogglePressed => {
                let theme = self.theme.toggle(&mut *self.storage);
                self.analytics.track("theme", theme.as_str());
            },

            UiEvent::SliderNextPressed => {
                self.slider.advance();
            },
            UiEvent::SliderPrevPressed => {
                self.slider.retreat();
            },
            UiEvent::SliderDotPressed(index) => self.slider.go_to(index),
            UiEvent::TouchStarted(x) => self.slider.touch_start(x),
            UiEvent::TouchEnded(x) => {
                self.slider.touch_end(x);
            },
            UiEvent::GalleryImagePressed(index) => {
                if self.lightbox.open(index) {
                    effects.push(Effect::LockScroll);
                }
            },
            UiEvent::LightboxClosePressed => {
                if self.lightbox.close() {
                    self.unlock_if_free(&mut effects);
                }
            },
            UiEvent::KeyPressed(key) => self.handle_key(key, &mut effects),

            UiEvent::Scrolled(offset) => {
                self.cta.update(offset);
                self.pending_scroll = Some(offset);
                self.spy_debounce.trigger(now);
            },
            UiEvent::CtaPressed => {
                effects.push(Effect::SmoothScrollTo(self.cta_target.clone()));
                self.analytics.track("cta", &self.cta_target);
            },

            UiEvent::EventTypeChanged(value) => self.event_type.select(&value),
            UiEvent::FormSubmitted { kind, fields } => {
                let flow = match kind {
                    FormKind::Table => &mut self.table_form,
                    FormKind::Event => &mut self.event_form,
                    FormKind::Contact => &mut self.contact_form,
                };
                if flow.submit(&fields, &*self.notifier, now, &self.fallback_phone) {
                    effects.push(Effect::ResetForm(kind));
                    self.analytics.track("form_submit", kind.booking_type());
                } else {
                    self.analytics.track("form_error", kind.booking_type());
                }
            },

            UiEvent::LoadCompleted => {
                self.preloader.load_completed(now);
                self.analytics.track("load", "complete");
            },
            UiEvent::ScriptError(message) => {
                log::error!("page script error: {message}");
                self.analytics.track("script_error", &message);
            },
        }

        effects
    }

    /// Advance the time-driven pieces. The host calls this on a frame
    /// or coarse timer cadence.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();
        if self.search_debounce.ready(now)
            && let Some(query) = self.pending_search.take()
        {
            self.filter.set_query(&query);
        }
        if self.spy_debounce.ready(now)
            && let Some(offset) = self.pending_scroll.take()
        {
            self.spy.update(offset);
        }
        self.preloader.tick(now);
        self.table_form.tick(now);
        self.event_form.tick(now);
        self.contact_form.tick(now);
    }

    fn handle_key(&mut self, key: Key, effects: &mut Vec<Effect>) {
        match key {
            Key::Escape => {
                if self.lightbox.close() || self.nav.close() {
                    self.unlock_if_free(effects);
                }
            },
            Key::ArrowRight => {
                if self.lightbox.is_open() {
                    self.lightbox.next();
                } else {
                    self.slider.advance();
                }
            },
            Key::ArrowLeft => {
                if self.lightbox.is_open() {
                    self.lightbox.prev();
                } else {
                    self.slider.retreat();
                }
            },
            Key::Enter | Key::Space => {},
        }
    }

    /// Scroll stays locked while any overlay is still up.
    fn unlock_if_free(&self, effects: &mut Vec<Effect>) {
        if !self.nav.is_open() && !self.lightbox.is_open() {
            effects.push(Effect::UnlockScroll);
        }
    }

    // -- state the host renders from --

    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }

    /// Current menu visibility under the active filters.
    pub fn filter_result(&self) -> FilterResult {
        self.filter.apply(&self.menu)
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn nav_open(&self) -> bool {
        self.nav.is_open()
    }

    pub fn slider(&self) -> &SliderState {
        &self.slider
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn active_section(&self) -> Option<&str> {
        self.spy.active_id()
    }

    pub fn cta_visible(&self) -> bool {
        self.cta.is_visible()
    }

    pub fn preloader_phase(&self) -> PreloaderPhase {
        self.preloader.phase()
    }

    pub fn form(&self, kind: FormKind) -> &FormFlow {
        match kind {
            FormKind::Table => &self.table_form,
            FormKind::Event => &self.event_form,
            FormKind::Contact => &self.contact_form,
        }
    }

    /// Whether the event form's free-text event input shows.
    pub fn event_custom_visible(&self) -> bool {
        self.event_type.custom_visible()
    }
}

fn category_detail(filter: CategoryFilter) -> String {
    match filter {
        CategoryFilter::All => "all".to_string(),
        CategoryFilter::Only(category) => category.label().to_string(),
    }
}
