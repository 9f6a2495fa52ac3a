//! Stat source trait for dependency injection.
//!
//! ```rust,ignore
//! // Production
//! let source = Arc::new(ProcStatSource::default());
//!
//! // Tests: successive reads return successive snapshots
//! let source = Arc::new(MockStatSource::new(vec![before, after]));
//! ```

use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// Location of the kernel's CPU counters.
pub const PROC_STAT_PATH: &str = "/proc/stat";

/// Supplies the text of a `/proc/stat`-formatted file.
pub trait StatSource: Send + Sync {
    fn read_stat(&self) -> io::Result<String>;
}

/// Reads a stat file from disk, `/proc/stat` by default.
#[derive(Debug, Clone)]
pub struct ProcStatSource {
    path: PathBuf,
}

impl ProcStatSource {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for ProcStatSource {
    fn default() -> Self {
        Self::with_path(PROC_STAT_PATH)
    }
}

impl StatSource for ProcStatSource {
    fn read_stat(&self) -> io::Result<String> {
        std::fs::read_to_string(&self.path)
    }
}

/// Scripted snapshots for tests.
///
/// Each read returns the next snapshot; the last one repeats forever.
pub struct MockStatSource {
    snapshots: Mutex<VecDeque<String>>,
    last: Mutex<Option<String>>,
}

impl MockStatSource {
    pub fn new<S: Into<String>>(snapshots: Vec<S>) -> Self {
        Self {
            snapshots: Mutex::new(snapshots.into_iter().map(Into::into).collect()),
            last: Mutex::new(None),
        }
    }
}

impl StatSource for MockStatSource {
    fn read_stat(&self) -> io::Result<String> {
        let next = self.snapshots.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        if let Some(snapshot) = next {
            *last = Some(snapshot);
        }
        last.clone().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no stat snapshot configured")
        })
    }
}
