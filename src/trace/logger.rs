use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::trace::trace::WizardTrace;

/// JSONL sink for wizard traces, one object per line.
///
/// The wizard runs on a single thread, so the writer sits in a `RefCell`.
/// Lines are flushed as they are written so a crashed run still leaves a
/// readable trace. Open and write failures only warn on stderr; tracing
/// never interrupts the wizard.
#[derive(Default)]
pub struct TraceLogger {
    sink: Option<Sink>,
}

struct Sink {
    path: PathBuf,
    writer: RefCell<BufWriter<File>>,
}

impl TraceLogger {
    /// Append to `path`, creating it if needed.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => Self {
                sink: Some(Sink {
                    path,
                    writer: RefCell::new(BufWriter::new(file)),
                }),
            },
            Err(e) => {
                eprintln!("Warning: tracing disabled, cannot open '{}': {}", path.display(), e);
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.sink.as_ref().map(|s| s.path.as_path())
    }

    pub fn log(&self, event: &WizardTrace) {
        let Some(sink) = &self.sink else {
            return;
        };

        let mut writer = sink.writer.borrow_mut();
        if let Err(e) = write_line(&mut *writer, event) {
            eprintln!("Warning: trace '{}' not written: {}", sink.path.display(), e);
        }
    }
}

fn write_line(writer: &mut impl Write, event: &WizardTrace) -> std::io::Result<()> {
    serde_json::to_writer(&mut *writer, event)?;
    writer.write_all(b"\n")?;
    writer.flush()
}
