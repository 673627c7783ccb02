use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub const TOAST_DURATION: Duration = Duration::from_millis(5000);
pub const MAX_VISIBLE_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    Upload,
    NotFound,
    Validation,
    Renderer,
    Clipboard,
}

impl ErrorKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Network => "Network error",
            Self::Upload => "Upload failed",
            Self::NotFound => "Not found",
            Self::Validation => "Invalid input",
            Self::Renderer => "Viewer error",
            Self::Clipboard => "Clipboard error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Error,
    Loading,
    Info,
}

impl Severity {
    /// Palette token for the toast icon.
    pub fn icon_token(self) -> &'static str {
        match self {
            Self::Success => "green-500",
            Self::Error => "red-500",
            Self::Loading | Self::Info => "blue-500",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub severity: Severity,
    pub kind: Option<ErrorKind>,
    pub message: String,
    pub context: Option<String>,
}

impl Report {
    pub fn headline(&self) -> String {
        match self.kind {
            Some(kind) => format!("{kind}: {}", self.message),
            None => self.message.clone(),
        }
    }
}

type Subscriber = Box<dyn Fn(&Report)>;

/// Central sink for user-facing errors and status messages.
#[derive(Default)]
pub struct Reporter {
    subscribers: Vec<Subscriber>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: Fn(&Report) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn report(
        &self,
        kind: ErrorKind,
        message: impl Into<String>,
        context: Option<&str>,
    ) -> Report {
        let report = Report {
            severity: Severity::Error,
            kind: Some(kind),
            message: message.into(),
            context: context.map(str::to_string),
        };
        tracing::error!(
            kind = ?kind,
            context = report.context.as_deref().unwrap_or(""),
            "{}",
            report.message
        );
        self.deliver(&report);
        report
    }

    pub fn success(&self, message: impl Into<String>) -> Report {
        self.status(Severity::Success, message.into())
    }

    pub fn info(&self, message: impl Into<String>) -> Report {
        self.status(Severity::Info, message.into())
    }

    pub fn loading(&self, message: impl Into<String>) -> Report {
        self.status(Severity::Loading, message.into())
    }

    fn status(&self, severity: Severity, message: String) -> Report {
        let report = Report {
            severity,
            kind: None,
            message,
            context: None,
        };
        tracing::info!(severity = ?severity, "{}", report.message);
        self.deliver(&report);
        report
    }

    fn deliver(&self, report: &Report) {
        for subscriber in &self.subscribers {
            subscriber(report);
        }
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub report: Report,
    pub shown_at: Instant,
}

impl Toast {
    pub fn expires_at(&self, duration: Duration) -> Instant {
        self.shown_at + duration
    }
}

/// Visible toasts, newest last.
#[derive(Debug)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    duration: Duration,
    capacity: usize,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(TOAST_DURATION, MAX_VISIBLE_TOASTS)
    }
}

impl ToastQueue {
    pub fn new(duration: Duration, capacity: usize) -> Self {
        Self {
            toasts: VecDeque::new(),
            duration,
            capacity: capacity.max(1),
        }
    }

    /// Share a queue with `reporter` so every report becomes a toast.
    pub fn attach(reporter: &mut Reporter) -> Rc<RefCell<ToastQueue>> {
        let queue = Rc::new(RefCell::new(ToastQueue::default()));
        let sink = Rc::clone(&queue);
        reporter.subscribe(move |report| {
            sink.borrow_mut().push(report.clone(), Instant::now());
        });
        queue
    }

    pub fn push(&mut self, report: Report, now: Instant) {
        self.toasts.push_back(Toast {
            report,
            shown_at: now,
        });
        while self.toasts.len() > self.capacity {
            self.toasts.pop_front();
        }
    }

    /// Drop toasts whose duration has elapsed at `now`; returns how many.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        let duration = self.duration;
        self.toasts.retain(|toast| now < toast.expires_at(duration));
        before - self.toasts.len()
    }

    pub fn dismiss_all(&mut self) {
        self.toasts.clear();
    }

    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_reaches_every_subscriber_in_order() {
        let mut reporter = Reporter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for label in ["first", "second"] {
            let seen = Rc::clone(&seen);
            reporter.subscribe(move |report: &Report| {
                seen.borrow_mut().push((label, report.message.clone()))
            });
        }

        let report =
            reporter.report(ErrorKind::Upload, "Analysis submission failed", Some("landing"));
        assert_eq!(report.kind, Some(ErrorKind::Upload));
        assert_eq!(report.severity, Severity::Error);
        assert_eq!(report.context.as_deref(), Some("landing"));
        assert_eq!(
            *seen.borrow(),
            vec![
                ("first", "Analysis submission failed".to_string()),
                ("second", "Analysis submission failed".to_string()),
            ]
        );
    }

    #[test]
    fn headline_prefixes_error_kind() {
        let reporter = Reporter::new();
        let report = reporter.report(ErrorKind::NotFound, "Analysis a1 does not exist", None);
        assert_eq!(report.headline(), "Not found: Analysis a1 does not exist");
        assert_eq!(reporter.success("Copied").headline(), "Copied");
    }

    #[test]
    fn status_helpers_use_their_severity() {
        let reporter = Reporter::new();
        assert_eq!(reporter.success("done").severity, Severity::Success);
        assert_eq!(reporter.info("fyi").severity, Severity::Info);
        assert_eq!(reporter.loading("working").severity, Severity::Loading);
        assert_eq!(Severity::Error.icon_token(), "red-500");
    }

    #[test]
    fn toasts_expire_after_duration() {
        let mut queue = ToastQueue::default();
        let start = Instant::now();
        let reporter = Reporter::new();
        queue.push(reporter.info("one"), start);
        queue.push(reporter.info("two"), start + Duration::from_millis(2000));

        assert_eq!(queue.expire(start + Duration::from_millis(4999)), 0);
        assert_eq!(queue.expire(start + TOAST_DURATION), 1);
        assert_eq!(queue.len(), 1);
        assert_eq!(
            queue.visible().next().map(|toast| toast.report.message.as_str()),
            Some("two")
        );
        assert_eq!(queue.expire(start + Duration::from_millis(7000)), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_keeps_only_the_most_recent_toasts() {
        let mut queue = ToastQueue::new(TOAST_DURATION, 2);
        let now = Instant::now();
        let reporter = Reporter::new();
        for message in ["a", "b", "c"] {
            queue.push(reporter.info(message), now);
        }
        let messages: Vec<_> = queue
            .visible()
            .map(|toast| toast.report.message.as_str())
            .collect();
        assert_eq!(messages, ["b", "c"]);
    }

    #[test]
    fn attached_queue_collects_reports() {
        let mut reporter = Reporter::new();
        let queue = ToastQueue::attach(&mut reporter);
        reporter.report(ErrorKind::Network, "Failed to load analysis history", None);
        reporter.success("Results copied to clipboard!");
        assert_eq!(reporter.subscriber_count(), 1);
        assert_eq!(queue.borrow().len(), 2);
        queue.borrow_mut().dismiss_all();
        assert!(queue.borrow().is_empty());
    }
}
