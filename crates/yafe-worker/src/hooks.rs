//! Background sync and push wakeups.
//!
//! Bookings submitted while offline get queued under a sync tag and
//! replayed when connectivity returns. Push messages become
//! notifications with the restaurant's branding; tapping one opens the
//! home page.

/// Sync tag registered for queued booking submissions.
pub const SYNC_BOOKINGS_TAG: &str = "sync-bookings";

/// Page a notification tap navigates to.
pub const CLICK_TARGET: &str = "/";

/// What a sync wakeup should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDisposition {
    /// Recognized tag: replay queued booking submissions.
    ReplayBookings,
    /// Unknown tag, nothing to do.
    Ignored,
}

/// Route a background sync wakeup by its tag.
pub fn handle_sync(tag: &str) -> SyncDisposition {
    if tag == SYNC_BOOKINGS_TAG {
        log::info!("sync: replaying queued bookings");
        SyncDisposition::ReplayBookings
    } else {
        log::debug!("sync: ignoring tag {tag}");
        SyncDisposition::Ignored
    }
}

/// Notification content for a push message.
#[derive(Debug, Clone, PartialEq)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub vibrate: Vec<u32>,
    pub tag: String,
    pub require_interaction: bool,
}

impl Default for PushNotification {
    fn default() -> Self {
        PushNotification {
            title: "Yafe Restaurant".to_string(),
            body: "New update from Yafe Restaurant".to_string(),
            icon: "/assets/logo/logo.png".to_string(),
            badge: "/assets/logo/logo.png".to_string(),
            vibrate: vec![200, 100, 200],
            tag: "yafe-notification".to_string(),
            require_interaction: false,
        }
    }
}

impl PushNotification {
    /// Build from the push payload text. An empty payload keeps the
    /// stock body.
    pub fn from_payload(text: &str) -> Self {
        let mut notification = Self::default();
        let text = text.trim();
        if !text.is_empty() {
            notification.body = text.to_string();
        }
        notification
    }
}
