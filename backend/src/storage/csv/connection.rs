use csv::ReaderBuilder;
use log::{info, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::AppConfig;
use crate::domain::error::Result;
use crate::domain::models::EXPENSE_HEADERS;
use crate::storage::traits::{Connection, StoreStatus};

/// Called with the finished temporary file right before it is renamed into place.
/// Returning an error aborts the rewrite and leaves the live file untouched.
pub type BeforeReplaceHook = Arc<dyn Fn(&Path) -> io::Result<()> + Send + Sync>;

/// CsvConnection manages the expense file path and serializes writers
#[derive(Clone)]
pub struct CsvConnection {
    expense_file: PathBuf,
    write_lock: Arc<Mutex<()>>,
    before_replace: Option<BeforeReplaceHook>,
}

impl CsvConnection {
    /// Create a connection for the expense file named in the configuration.
    /// The data directory is created if it doesn't exist.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let expense_file = config.expense_file_path();
        if let Some(parent) = expense_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(Self {
            expense_file,
            write_lock: Arc::new(Mutex::new(())),
            before_replace: None,
        })
    }

    /// Install a hook that runs between writing the temporary file and replacing the live one
    pub fn with_before_replace(mut self, hook: BeforeReplaceHook) -> Self {
        self.before_replace = Some(hook);
        self
    }

    pub fn expense_file_path(&self) -> &Path {
        &self.expense_file
    }

    /// Path of the temporary file used while rewriting the expense file
    pub fn temp_file_path(&self) -> PathBuf {
        temp_path_for(&self.expense_file)
    }

    /// Hold this guard for the whole read-modify-write of a mutation
    pub fn lock(&self) -> MutexGuard<'_, ()> {
        // A panicking writer never replaces the file halfway, so a poisoned guard is still usable
        self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Read the header row of the expense file.
    /// Returns None if the file doesn't exist or is empty.
    pub fn read_headers(&self) -> Result<Option<Vec<String>>> {
        let file = match File::open(&self.expense_file) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
        let headers = reader.headers()?;
        if headers.is_empty() {
            return Ok(None);
        }
        Ok(Some(headers.iter().map(str::to_string).collect()))
    }

    /// Ensure the expense file exists with the expected header row
    pub fn ensure_expense_file_exists(&self) -> Result<StoreStatus> {
        let _guard = self.lock();

        if self.remove_stale_temp_file()? {
            warn!(
                "Removed unfinished rewrite left at {}",
                self.temp_file_path().display()
            );
        }

        match self.read_headers()? {
            None => {
                self.write_header()?;
                info!("Created new expense file: {}", self.expense_file.display());
                Ok(StoreStatus::Created)
            }
            Some(found) if headers_match(&found) => Ok(StoreStatus::Ready),
            Some(found) => {
                warn!(
                    "Expense file {} has headers {:?}, expected {:?}. Consider starting with a fresh file.",
                    self.expense_file.display(),
                    found,
                    EXPENSE_HEADERS
                );
                Ok(StoreStatus::SchemaMismatch { found })
            }
        }
    }

    /// Replace the expense file with `contents` using write-temp-then-rename
    pub fn replace_expense_file(&self, contents: &[u8]) -> Result<()> {
        write_file_atomically(&self.expense_file, contents, self.before_replace.as_ref())
    }

    /// Append bytes to the end of the expense file with a single write.
    /// A newline is inserted first if the file doesn't end with one.
    pub fn append_to_expense_file(&self, row: &[u8]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.expense_file)?;

        let needs_newline = if file.metadata()?.len() > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            last[0] != b'\n'
        } else {
            false
        };

        let mut buffer = Vec::with_capacity(row.len() + 1);
        if needs_newline {
            buffer.push(b'\n');
        }
        buffer.extend_from_slice(row);

        file.write_all(&buffer)?;
        file.sync_all()?;
        Ok(())
    }

    fn write_header(&self) -> Result<()> {
        let mut header: Vec<u8> = Vec::new();
        {
            let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(&mut header);
            writer.write_record(EXPENSE_HEADERS)?;
            writer.flush()?;
        }
        self.replace_expense_file(&header)
    }

    /// Delete a temporary file left behind by an interrupted rewrite
    fn remove_stale_temp_file(&self) -> Result<bool> {
        match fs::remove_file(self.temp_file_path()) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

impl Connection for CsvConnection {
    type ExpenseRepository = super::expense_repository::ExpenseRepository;

    fn create_expense_repository(&self) -> Self::ExpenseRepository {
        super::expense_repository::ExpenseRepository::new(self.clone())
    }
}

/// True if `found` is exactly the expected `ID,Date,Description,Amount` layout
pub fn headers_match<S: AsRef<str>>(found: &[S]) -> bool {
    found.len() == EXPENSE_HEADERS.len()
        && found
            .iter()
            .zip(EXPENSE_HEADERS.iter())
            .all(|(found, expected)| found.as_ref() == *expected)
}

/// Write `contents` to a sibling temporary file, flush it to disk, then rename it
/// over `target`. If anything fails before the rename, `target` is left as it was.
pub fn write_file_atomically(
    target: &Path,
    contents: &[u8],
    before_replace: Option<&BeforeReplaceHook>,
) -> Result<()> {
    let temp_path = temp_path_for(target);

    let prepared = (|| -> io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
        drop(file);

        if let Some(hook) = before_replace {
            hook(&temp_path)?;
        }
        Ok(())
    })();

    if let Err(e) = prepared {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    // Atomic move from temp to final file
    fs::rename(&temp_path, target)?;
    Ok(())
}

fn temp_path_for(target: &Path) -> PathBuf {
    let mut file_name = target
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    file_name.push(".tmp");
    target.with_file_name(file_name)
}
