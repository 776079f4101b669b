use chrono::Local;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Maximum number of log entries to keep in memory
const MAX_LOG_ENTRIES: usize = 1000;

/// A log entry with timestamp and message
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: Level, target: &str, message: String) -> Self {
        Self {
            timestamp: Local::now().format("%H:%M:%S.%3f").to_string(),
            level: level.to_string().to_uppercase(),
            target: target.to_string(),
            message,
        }
    }

    /// One line for a debug pane or a dump to stderr
    pub fn format_for_display(&self) -> String {
        format!(
            "[{}] {} [{}] {}",
            self.timestamp, self.level, self.target, self.message
        )
    }
}

/// Thread-safe ring buffer of recent log entries
#[derive(Clone, Default)]
pub struct LogRingBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogRingBuffer {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_LOG_ENTRIES))),
        }
    }

    // A panic while logging must not take the buffer down with it
    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.lock();
        if entries.len() >= MAX_LOG_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// The newest `count` entries, oldest first
    pub fn get_recent(&self, count: usize) -> Vec<LogEntry> {
        let entries = self.lock();
        let skip = entries.len().saturating_sub(count);
        entries.iter().skip(skip).cloned().collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Split a compact-format line ("LEVEL target: message") into its parts
fn parse_compact_line(line: &str) -> (Level, &str, &str) {
    let (level, rest) = match line.split_once(' ') {
        Some(("TRACE", rest)) => (Level::TRACE, rest),
        Some(("DEBUG", rest)) => (Level::DEBUG, rest),
        Some(("INFO", rest)) => (Level::INFO, rest),
        Some(("WARN", rest)) => (Level::WARN, rest),
        Some(("ERROR", rest)) => (Level::ERROR, rest),
        _ => return (Level::INFO, "general", line),
    };
    let rest = rest.trim_start();

    match rest.split_once(':') {
        // Targets never contain spaces
        Some((target, message)) if !target.contains(' ') => (level, target, message.trim()),
        _ => (level, "general", rest),
    }
}

/// `MakeWriter` that captures formatted events into a [`LogRingBuffer`]
#[derive(Clone)]
pub struct RingBufferWriter {
    buffer: LogRingBuffer,
}

impl RingBufferWriter {
    pub fn new(buffer: LogRingBuffer) -> Self {
        Self { buffer }
    }
}

impl std::io::Write for RingBufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(message) = std::str::from_utf8(buf) {
            for line in message.lines().map(str::trim).filter(|line| !line.is_empty()) {
                let (level, target, text) = parse_compact_line(line);
                self.buffer
                    .push(LogEntry::new(level, target, text.to_string()));
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for RingBufferWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Global log buffer
static LOG_BUFFER: OnceLock<LogRingBuffer> = OnceLock::new();

/// The process-wide log buffer, created on first use
pub fn get_log_buffer() -> LogRingBuffer {
    LOG_BUFFER.get_or_init(LogRingBuffer::new).clone()
}

/// Install a subscriber that writes compact lines into the ring buffer.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Calling this more
/// than once keeps the first subscriber.
pub fn init_tracing() -> LogRingBuffer {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let buffer = get_log_buffer();

    let fmt_layer = fmt::layer()
        .with_writer(RingBufferWriter::new(buffer.clone()))
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .without_time() // LogEntry stamps its own time
        .compact();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
    {
        tracing::info!(target: "logging", "Logging initialized");
    }

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_ring_buffer_caps_entries() {
        let buffer = LogRingBuffer::new();
        for i in 0..(MAX_LOG_ENTRIES + 10) {
            buffer.push(LogEntry::new(Level::DEBUG, "test", format!("entry {}", i)));
        }
        assert_eq!(buffer.len(), MAX_LOG_ENTRIES);

        let recent = buffer.get_recent(2);
        assert_eq!(recent[0].message, format!("entry {}", MAX_LOG_ENTRIES + 8));
        assert_eq!(recent[1].message, format!("entry {}", MAX_LOG_ENTRIES + 9));

        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_parse_compact_line() {
        assert_eq!(
            parse_compact_line("WARN table: Ignoring sort on unknown column 'utr'"),
            (Level::WARN, "table", "Ignoring sort on unknown column 'utr'")
        );
        assert_eq!(
            parse_compact_line("INFO no target here"),
            (Level::INFO, "general", "no target here")
        );
        assert_eq!(
            parse_compact_line("plain text"),
            (Level::INFO, "general", "plain text")
        );
    }

    #[test]
    fn test_writer_feeds_buffer() {
        let buffer = LogRingBuffer::new();
        let mut writer = RingBufferWriter::new(buffer.clone());
        writer
            .write_all(b"DEBUG order: reorder ignored, unknown source 9\n")
            .unwrap();

        let entries = buffer.get_recent(1);
        assert_eq!(entries[0].level, "DEBUG");
        assert_eq!(entries[0].target, "order");
        assert!(entries[0].format_for_display().contains("unknown source 9"));
    }
}
