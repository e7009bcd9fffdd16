/// Test utilities module for automatic cleanup and consistent test infrastructure
///
/// This module provides RAII-based cleanup that guarantees test data is removed
/// even if tests panic or fail.
use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::connection::{BeforeReplaceHook, CsvConnection};
use crate::config::AppConfig;

/// RAII Test Environment that automatically cleans up on drop
pub struct TestEnvironment {
    /// The temporary directory - kept alive to prevent auto-cleanup until drop
    _temp_dir: TempDir,
    /// The CSV connection for the test
    pub connection: CsvConnection,
    /// Configuration pointing at the temporary directory
    pub config: AppConfig,
    /// Base directory path for manual inspection if needed
    pub base_path: PathBuf,
    expense_file: PathBuf,
}

impl TestEnvironment {
    /// Create a new test environment with automatic cleanup
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let config = AppConfig::for_directory(&base_path);
        let connection = CsvConnection::new(&config)?;
        let expense_file = config.expense_file_path();

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            config,
            base_path,
            expense_file,
        })
    }

    /// Create a test environment whose rewrites run `hook` before the final rename
    pub fn with_before_replace(hook: BeforeReplaceHook) -> Result<Self> {
        let mut env = Self::new()?;
        env.connection = env.connection.clone().with_before_replace(hook);
        Ok(env)
    }

    pub fn expense_file(&self) -> &Path {
        &self.expense_file
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        // TempDir removes the directory itself
        if std::env::var("EXPENSE_TRACKER_DEBUG_TESTS").is_ok() {
            println!("Cleaning up test environment: {:?}", self.base_path);
        }
    }
}
