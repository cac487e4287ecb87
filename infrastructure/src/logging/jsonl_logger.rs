//! JSONL file writer for cycle events.
//!
//! One line per event. Object payloads are flattened next to the `type`,
//! `seq` and `timestamp` fields; any other payload lands under `data`.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use wizard_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};

#[derive(Serialize)]
struct LogRecord<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    seq: u64,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl<'a> LogRecord<'a> {
    fn from_event(event: &'a ConversationEvent, seq: u64) -> Self {
        let (data, fields) = match &event.payload {
            Value::Object(map) => (None, map.clone()),
            other => (Some(other.clone()), Map::new()),
        };
        Self {
            kind: event.event_type,
            seq,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            data,
            fields,
        }
    }
}

struct LogSink {
    writer: BufWriter<File>,
    next_seq: u64,
}

/// Append-only JSONL log of cycle events.
///
/// `seq` counts events written by this process, starting at 0, so lines from
/// separate runs appended to one file can be told apart.
pub struct JsonlConversationLogger {
    sink: Mutex<LogSink>,
    path: PathBuf,
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

impl JsonlConversationLogger {
    /// Open the log at `path`, creating it and its directories if needed.
    ///
    /// Returns `None` when the file cannot be opened; the session then runs
    /// without a conversation log.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match open_append(path) {
            Ok(file) => Some(Self {
                sink: Mutex::new(LogSink {
                    writer: BufWriter::new(file),
                    next_seq: 0,
                }),
                path: path.to_path_buf(),
            }),
            Err(e) => {
                warn!("Conversation log disabled, cannot open {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(mut sink) = self.sink.lock() else {
            return;
        };
        let record = LogRecord::from_event(&event, sink.next_seq);
        let line = match serde_json::to_string(&record) {
            Ok(line) => line,
            Err(e) => {
                warn!("Dropping {} event: {}", event.event_type, e);
                return;
            }
        };
        sink.next_seq += 1;
        if writeln!(sink.writer, "{line}").and_then(|_| sink.writer.flush()).is_err() {
            warn!("Failed to write {} event to {}", event.event_type, self.path.display());
        }
    }
}
