//! Fan-out delivery of booking records.
//!
//! A submission goes to every configured sink (a service/template
//! pair on the relay API) concurrently, one connection per sink. The
//! whole submission succeeds only when every sink accepts; the form
//! layer turns a partial failure into a "call us instead" banner
//! without clearing the visitor's input.

use std::thread;

use serde::Serialize;

use yafe_types::config::{RelaySection, SinkEntry};
use yafe_types::error::{Result, YafeError};
use yafe_types::record::{BookingRecord, Notifier};
use yafe_types::url::Url;

use crate::http;
use crate::stream::TlsProvider;

/// Request body the relay API expects.
#[derive(Serialize)]
struct RelayPayload<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a BookingRecord,
}

pub struct RelayNotifier {
    endpoint: Url,
    public_key: String,
    sinks: Vec<SinkEntry>,
    tls: Option<Box<dyn TlsProvider>>,
}

impl RelayNotifier {
    pub fn from_config(
        config: &RelaySection,
        tls: Option<Box<dyn TlsProvider>>,
    ) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).ok_or_else(|| {
            YafeError::Config(format!("invalid relay endpoint: {}", config.endpoint))
        })?;
        if config.sinks.is_empty() {
            return Err(YafeError::Config("relay needs at least one sink".to_string()));
        }
        Ok(RelayNotifier {
            endpoint,
            public_key: config.public_key.clone(),
            sinks: config.sinks.clone(),
            tls,
        })
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Deliver one record to one sink over its own connection.
    fn deliver_to(&self, sink: &SinkEntry, record: &BookingRecord) -> Result<()> {
        let payload = serde_json::to_string(&RelayPayload {
            service_id: &sink.service,
            template_id: &sink.template,
            user_id: &self.public_key,
            template_params: record,
        })?;
        let response = http::post_json(&self.endpoint, &payload, self.tls.as_deref())?;
        if (200..300).contains(&response.status) {
            Ok(())
        } else {
            Err(YafeError::Relay(format!(
                "{} rejected with status {}",
                sink.service, response.status,
            )))
        }
    }
}

impl Notifier for RelayNotifier {
    fn notify(&self, record: &BookingRecord) -> Result<()> {
        let results: Vec<Result<()>> = thread::scope(|scope| {
            let handles: Vec<_> = self
                .sinks
                .iter()
                .map(|sink| scope.spawn(move || self.deliver_to(sink, record)))
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        Err(YafeError::Relay("delivery thread panicked".to_string()))
                    })
                })
                .collect()
        });

        let mut delivered = 0;
        for (sink, result) in self.sinks.iter().zip(&results) {
            match result {
                Ok(()) => {
                    delivered += 1;
                    log::debug!("relay: {} accepted the record", sink.service);
                },
                Err(err) => log::warn!("relay: delivery to {} failed: {err}", sink.service),
            }
        }

        if delivered == self.sinks.len() {
            Ok(())
        } else {
            Err(YafeError::Relay(format!(
                "delivered {delivered} of {}",
                self.sinks.len(),
            )))
        }
    }
}
