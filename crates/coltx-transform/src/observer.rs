//! Transformer event observers.
//!
//! Skip and warning events are delivered to an injected
//! [`TransformObserver`]. The default [`TracingObserver`] forwards them to
//! `tracing`; [`RecordingObserver`] keeps them in memory so tests can assert
//! on them.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::error::TransformWarning;

/// An event emitted while fitting or applying a transformer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformEvent {
    /// A column-set anomaly tolerated by `Policy::Warn`.
    Warning(TransformWarning),
    /// A fixed-input transformer left the frame unchanged because an input
    /// column is missing.
    Skipped {
        transformer: String,
        method: &'static str,
        column: String,
    },
    /// A stateless transformer has nothing to fit.
    FitSkipped { transformer: String },
}

impl fmt::Display for TransformEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformEvent::Warning(warning) => write!(f, "{warning}"),
            TransformEvent::Skipped {
                transformer,
                method,
                column,
            } => write!(
                f,
                "Skipping '{transformer}.{method}' as the input column '{column}' is missing"
            ),
            TransformEvent::FitSkipped { transformer } => write!(
                f,
                "Skipping '{transformer}.fit' as there are no parameters available to fit"
            ),
        }
    }
}

/// Receives transformer events.
pub trait TransformObserver: Send + Sync + fmt::Debug {
    fn on_event(&self, event: &TransformEvent);
}

/// Forwards events to `tracing`: warnings at WARN, skips at INFO.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TransformObserver for TracingObserver {
    fn on_event(&self, event: &TransformEvent) {
        match event {
            TransformEvent::Warning(warning) => warn!(
                columns = ?warning.columns(),
                "{warning}"
            ),
            TransformEvent::Skipped { .. } | TransformEvent::FitSkipped { .. } => info!("{event}"),
        }
    }
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<TransformEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Events recorded before a panic elsewhere are still returned.
    fn lock(&self) -> MutexGuard<'_, Vec<TransformEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns every event received so far, in order.
    pub fn events(&self) -> Vec<TransformEvent> {
        self.lock().clone()
    }

    /// Returns the warnings received so far, in order.
    pub fn warnings(&self) -> Vec<TransformWarning> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TransformEvent::Warning(warning) => Some(warning),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl TransformObserver for RecordingObserver {
    fn on_event(&self, event: &TransformEvent) {
        self.lock().push(event.clone());
    }
}

/// Returns the observer used when none is injected.
pub fn default_observer() -> Arc<dyn TransformObserver> {
    Arc::new(TracingObserver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_observer_keeps_order() {
        let observer = RecordingObserver::new();
        observer.on_event(&TransformEvent::FitSkipped {
            transformer: "Cast".to_string(),
        });
        observer.on_event(&TransformEvent::Warning(TransformWarning::MissingColumns {
            columns: vec!["a".to_string()],
        }));
        assert_eq!(observer.events().len(), 2);
        assert_eq!(observer.warnings().len(), 1);
        observer.clear();
        assert!(observer.events().is_empty());
    }

    #[test]
    fn recording_continues_after_a_poisoned_lock() {
        let observer = RecordingObserver::new();
        let skipped = TransformEvent::FitSkipped {
            transformer: "Cast".to_string(),
        };
        observer.on_event(&skipped);

        let shared = Arc::clone(&observer);
        let result = std::thread::spawn(move || {
            let _events = shared.events.lock().unwrap();
            panic!("panic while holding the event lock");
        })
        .join();
        assert!(result.is_err());
        assert!(observer.events.is_poisoned());

        observer.on_event(&skipped);
        assert_eq!(observer.events(), vec![skipped.clone(), skipped]);
    }

    #[test]
    fn event_messages() {
        let event = TransformEvent::FitSkipped {
            transformer: "Cast".to_string(),
        };
        assert_eq!(
            event.to_string(),
            "Skipping 'Cast.fit' as there are no parameters available to fit"
        );
        let event = TransformEvent::Skipped {
            transformer: "CopyColumn".to_string(),
            method: "transform",
            column: "a".to_string(),
        };
        assert_eq!(
            event.to_string(),
            "Skipping 'CopyColumn.transform' as the input column 'a' is missing"
        );
    }
}
