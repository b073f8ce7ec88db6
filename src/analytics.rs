//! Optional analytics reporting.
//!
//! Tracks report `play`, `pause` and `seek` transitions through an injected
//! port. Without a port every report is a no-op.

use std::fmt;
use std::rc::Rc;

use tracing::{info, warn};

/// Category used for every playback event.
pub const CATEGORY: &str = "player";

/// Receiver of analytics events.
pub trait AnalyticsPort {
    fn report(&self, category: &str, action: &str, label: &str);
}

/// Cheap, cloneable handle to an optional [`AnalyticsPort`].
#[derive(Clone, Default)]
pub struct Analytics {
    port: Option<Rc<dyn AnalyticsPort>>,
}

impl Analytics {
    pub fn new(port: Rc<dyn AnalyticsPort>) -> Self {
        Self { port: Some(port) }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.port.is_some()
    }

    pub fn report(&self, action: &str, label: &str) {
        if let Some(port) = &self.port {
            port.report(CATEGORY, action, label);
        }
    }
}

impl fmt::Debug for Analytics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analytics")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

/// Emits analytics events as `tracing` records on the `reprise::analytics` target.
#[derive(Debug, Default)]
pub struct LogReporter;

impl AnalyticsPort for LogReporter {
    fn report(&self, category: &str, action: &str, label: &str) {
        info!(target: "reprise::analytics", category, action, label, "playback event");
    }
}

/// Resolve a configured port name into an [`Analytics`] handle.
///
/// Unknown names are reported and yield a disabled handle.
pub fn from_port_name(name: Option<&str>) -> Analytics {
    match name.map(str::trim) {
        None | Some("") => Analytics::disabled(),
        Some("log") => Analytics::new(Rc::new(LogReporter)),
        Some(other) => {
            warn!(port = other, "unknown analytics port, analytics disabled");
            Analytics::disabled()
        }
    }
}
