//! Startup preloader.
//!
//! The preloader covers the page until resources are in, but never
//! flashes (a minimum display time) and never hangs (a fallback
//! deadline fires even if the load signal is lost). Hiding is a fade
//! with a fixed duration, after which the host removes the element.

use yafe_types::config::TimingSection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloaderPhase {
    /// Covering the page.
    Visible,
    /// Fade-out running; started at the contained timestamp.
    Fading { since: u64 },
    /// Gone. The host should have removed the element.
    Hidden,
}

#[derive(Debug)]
pub struct Preloader {
    phase: PreloaderPhase,
    shown_at: u64,
    load_seen: bool,
    min_ms: u64,
    fallback_ms: u64,
    fade_ms: u64,
}

impl Preloader {
    pub fn new(now_ms: u64, timing: &TimingSection) -> Self {
        Preloader {
            phase: PreloaderPhase::Visible,
            shown_at: now_ms,
            load_seen: false,
            min_ms: timing.preloader_min_ms,
            fallback_ms: timing.preloader_fallback_ms,
            fade_ms: timing.preloader_fade_ms,
        }
    }

    pub fn phase(&self) -> PreloaderPhase {
        self.phase
    }

    pub fn is_hidden(&self) -> bool {
        self.phase == PreloaderPhase::Hidden
    }

    /// The page finished loading. Starts the fade once the minimum
    /// display time has also passed.
    pub fn load_completed(&mut self, now_ms: u64) {
        self.load_seen = true;
        self.tick(now_ms);
    }

    /// Advance the phase machine to `now_ms`.
    pub fn tick(&mut self, now_ms: u64) {
        match self.phase {
            PreloaderPhase::Visible => {
                let min_done = self.load_seen && now_ms >= self.shown_at + self.min_ms;
                let gave_up = now_ms >= self.shown_at + self.fallback_ms;
                if min_done || gave_up {
                    self.phase = PreloaderPhase::Fading { since: now_ms };
                }
            },
            PreloaderPhase::Fading { since } => {
                if now_ms >= since + self.fade_ms {
                    self.phase = PreloaderPhase::Hidden;
                }
            },
            PreloaderPhase::Hidden => {},
        }
    }
}
