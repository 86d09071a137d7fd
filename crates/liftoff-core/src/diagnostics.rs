//! Diagnostic monitoring during validation
//!
//! Tooling can report fatal problems only through its log stream, not through
//! return values. The monitor watches that stream while validation runs and
//! raises a sticky abort flag when an error-level message shows up that is not
//! on the allow-list.
//!
//! The monitor is scoped by construction: [`DiagnosticMonitor::attach`] hands
//! out a [`DiagnosticSubscription`], whose [`DiagnosticSink`] is the only way to
//! deliver events. [`DiagnosticSubscription::detach`] closes every sink and
//! returns the verdict, so events can only be observed between the two calls.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Severity of a diagnostic event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    #[serde(alias = "assertion")]
    Assert,
    Warning,
    Log,
    Exception,
}

impl Severity {
    /// Severities that can abort a build
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Error | Self::Exception | Self::Assert)
    }
}

/// A single message from the diagnostic stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticEvent {
    pub message: String,
    #[serde(default)]
    pub stack: String,
    pub severity: Severity,
}

impl DiagnosticEvent {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: String::new(),
            severity,
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = stack.into();
        self
    }
}

/// How an allow-list entry matches a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "match", content = "text")]
pub enum MessagePattern {
    StartsWith(String),
    Contains(String),
}

impl MessagePattern {
    pub fn matches(&self, message: &str) -> bool {
        match self {
            Self::StartsWith(prefix) => message.starts_with(prefix.as_str()),
            Self::Contains(needle) => message.contains(needle.as_str()),
        }
    }
}

/// Messages that are known to be harmless even at error level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowList {
    patterns: Vec<MessagePattern>,
}

impl AllowList {
    /// An allow-list with no entries
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Noise the editor logs when running without a graphics device
    pub fn headless() -> Self {
        Self::empty()
            .with(MessagePattern::StartsWith("Video shaders not found.".into()))
            .with(MessagePattern::Contains(
                "has an unsupported or invalid shader. Texture will not be rendered.".into(),
            ))
    }

    pub fn with(mut self, pattern: MessagePattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    pub fn extend(&mut self, patterns: impl IntoIterator<Item = MessagePattern>) {
        self.patterns.extend(patterns);
    }

    pub fn allows(&self, message: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(message))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::headless()
    }
}

/// Classifies diagnostic events and hands out subscriptions
#[derive(Debug, Clone, Default)]
pub struct DiagnosticMonitor {
    allow_list: AllowList,
}

impl DiagnosticMonitor {
    pub fn new(allow_list: AllowList) -> Self {
        Self { allow_list }
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Whether an event should abort the build
    pub fn is_abort_trigger(&self, event: &DiagnosticEvent) -> bool {
        event.severity.is_fatal() && !self.allow_list.allows(&event.message)
    }

    /// Start observing. The abort flag starts out cleared.
    pub fn attach(&self) -> DiagnosticSubscription {
        debug!(allow_list = self.allow_list.len(), "diagnostic monitor attached");
        DiagnosticSubscription {
            shared: Arc::new(Shared {
                monitor: self.clone(),
                active: AtomicBool::new(true),
                abort_requested: AtomicBool::new(false),
                triggers: AtomicUsize::new(0),
            }),
        }
    }
}

#[derive(Debug)]
struct Shared {
    monitor: DiagnosticMonitor,
    active: AtomicBool,
    abort_requested: AtomicBool,
    triggers: AtomicUsize,
}

/// Live subscription to the diagnostic stream
#[derive(Debug)]
pub struct DiagnosticSubscription {
    shared: Arc<Shared>,
}

impl DiagnosticSubscription {
    /// A handle for delivering events, usable from any thread
    pub fn sink(&self) -> DiagnosticSink {
        DiagnosticSink {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Stop observing and report what was seen
    pub fn detach(self) -> MonitorVerdict {
        self.shared.active.store(false, Ordering::Release);
        let verdict = MonitorVerdict {
            abort_requested: self.shared.abort_requested.load(Ordering::Acquire),
            trigger_count: self.shared.triggers.load(Ordering::Acquire),
        };
        debug!(?verdict, "diagnostic monitor detached");
        verdict
    }
}

/// Cloneable event entry point handed to the validation runner
#[derive(Debug, Clone)]
pub struct DiagnosticSink {
    shared: Arc<Shared>,
}

impl DiagnosticSink {
    /// Classify one event. Events arriving after detach are dropped.
    pub fn emit(&self, event: &DiagnosticEvent) {
        if !self.shared.active.load(Ordering::Acquire) {
            return;
        }
        if !self.shared.monitor.is_abort_trigger(event) {
            return;
        }

        warn!(
            severity = ?event.severity,
            message = %event.message,
            "fatal diagnostic during validation"
        );
        self.shared.triggers.fetch_add(1, Ordering::AcqRel);
        self.shared.abort_requested.store(true, Ordering::Release);
    }

    /// Whether the subscription this sink belongs to is still attached
    pub fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::Acquire)
    }
}

/// Result of one monitoring window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorVerdict {
    pub abort_requested: bool,
    pub trigger_count: usize,
}
