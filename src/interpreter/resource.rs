use std::{
    collections::{BTreeMap, HashMap},
    fs::{File, OpenOptions},
    io::{Read, Write},
    str::FromStr,
};

use tracing::debug;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::usize_to_i64,
};

/// Key marking a dict as a file handle.
pub const HANDLE_KEY: &str = "__file__";

/// How a file handle was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    /// `"r"`: read an existing file.
    Read,
    /// `"w"`: create or truncate, then write.
    Write,
    /// `"a"`: create if needed, then write at the end.
    Append,
}

impl FileMode {
    /// The mode as written in `open(path, mode)`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "r",
            Self::Write => "w",
            Self::Append => "a",
        }
    }

    fn open(self, path: &str) -> std::io::Result<File> {
        match self {
            Self::Read => File::open(path),
            Self::Write => File::create(path),
            Self::Append => OpenOptions::new().create(true).append(true).open(path),
        }
    }
}

impl FromStr for FileMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "r" => Ok(Self::Read),
            "w" => Ok(Self::Write),
            "a" => Ok(Self::Append),
            other => Err(format!("Invalid file mode '{other}', expected \"r\", \"w\" or \"a\"")),
        }
    }
}

#[derive(Debug)]
struct OpenFile {
    file: File,
    path: String,
    mode: FileMode,
}

/// The files opened by a program and not yet closed.
///
/// Scripts never see a [`File`] directly. `open` returns a dict of the form
/// `{"__file__": id, "mode": m, "path": p}` and every later operation looks
/// the id up here. Dropping an entry closes the file.
///
/// # Example
/// ```
/// use scriptit::interpreter::resource::{FileMode, FileRegistry};
///
/// let path = std::env::temp_dir().join("scriptit_registry_doc.txt");
/// let path = path.to_str().unwrap();
///
/// let mut files = FileRegistry::default();
/// let handle = files.open(path, FileMode::Write, 1).unwrap();
/// let id = files.handle_id(&handle).unwrap();
///
/// files.write(id, "hello", 1).unwrap();
/// files.close(id, 1).unwrap();
/// assert!(files.close(id, 1).is_err());
///
/// assert_eq!(std::fs::read_to_string(path).unwrap(), "hello");
/// ```
#[derive(Debug, Default)]
pub struct FileRegistry {
    files:   HashMap<usize, OpenFile>,
    next_id: usize,
}

impl FileRegistry {
    /// Opens `path` and returns the handle dict for it.
    ///
    /// # Errors
    /// `Io` when the file cannot be opened in the requested mode.
    pub fn open(&mut self, path: &str, mode: FileMode, line: usize) -> EvalResult<Value> {
        let file = mode.open(path)
                       .map_err(|e| RuntimeError::Io { details: format!("Cannot open file '{path}': {e}"),
                                                       line })?;

        self.next_id += 1;
        let id = self.next_id;
        self.files.insert(id,
                          OpenFile { file,
                                     path: path.to_string(),
                                     mode });
        debug!(id, path, mode = mode.as_str(), "opened file");

        let handle = BTreeMap::from([(HANDLE_KEY.to_string(), Value::Integer(usize_to_i64(id))),
                                     ("mode".to_string(), Value::from(mode.as_str())),
                                     ("path".to_string(), Value::from(path))]);
        Ok(Value::from(handle))
    }

    /// Returns the id stored in a handle dict, or `None` when `value` is not
    /// a handle.
    #[must_use]
    pub fn handle_id(&self, value: &Value) -> Option<usize> {
        let Value::Dict(dict) = value else {
            return None;
        };
        match dict.get(HANDLE_KEY) {
            Some(Value::Integer(id)) => usize::try_from(*id).ok(),
            _ => None,
        }
    }

    /// Returns `true` while the handle has not been closed.
    #[must_use]
    pub fn is_open(&self, id: usize) -> bool {
        self.files.contains_key(&id)
    }

    /// The number of open files.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.files.len()
    }

    fn entry(&mut self, id: usize, line: usize) -> EvalResult<&mut OpenFile> {
        self.files
            .get_mut(&id)
            .ok_or_else(|| RuntimeError::Io { details: format!("File handle {id} is closed"),
                                              line })
    }

    /// Reads the rest of an open file.
    ///
    /// # Errors
    /// `Io` when the handle is closed, was not opened for reading, or the
    /// read fails.
    pub fn read_to_string(&mut self, id: usize, line: usize) -> EvalResult<String> {
        let entry = self.entry(id, line)?;
        if entry.mode != FileMode::Read {
            return Err(RuntimeError::Io { details: format!("File '{}' is not open for reading", entry.path),
                                          line });
        }

        let mut contents = String::new();
        entry.file
             .read_to_string(&mut contents)
             .map_err(|e| RuntimeError::Io { details: format!("Cannot read file '{}': {e}", entry.path),
                                             line })?;
        Ok(contents)
    }

    /// Writes `text` to an open file.
    ///
    /// # Errors
    /// `Io` when the handle is closed, was opened for reading, or the write
    /// fails.
    pub fn write(&mut self, id: usize, text: &str, line: usize) -> EvalResult<()> {
        let entry = self.entry(id, line)?;
        if entry.mode == FileMode::Read {
            return Err(RuntimeError::Io { details: format!("File '{}' is not open for writing", entry.path),
                                          line });
        }

        entry.file
             .write_all(text.as_bytes())
             .map_err(|e| RuntimeError::Io { details: format!("Cannot write file '{}': {e}", entry.path),
                                             line })
    }

    /// Closes an open handle.
    ///
    /// # Errors
    /// `Io` when the handle was already closed.
    pub fn close(&mut self, id: usize, line: usize) -> EvalResult<()> {
        let entry = self.files
                        .remove(&id)
                        .ok_or_else(|| RuntimeError::Io { details: format!("File handle {id} is already closed"),
                                                          line })?;
        debug!(id, path = %entry.path, "closed file");
        Ok(())
    }

    /// Closes a handle if it is still open, without reporting anything.
    pub fn release(&mut self, id: usize) {
        self.files.remove(&id);
    }

    /// Closes every open file.
    pub fn clear(&mut self) {
        self.files.clear();
    }
}
