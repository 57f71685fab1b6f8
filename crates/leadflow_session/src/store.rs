//! Durable persistence for the active-workspace selection.
//!
//! The selection survives process restarts in a TOML context file under
//! the Leadflow home directory (`LEADFLOW_HOME` overrides the default
//! `~/.leadflow`). Reads prefer this store; the cookie sink exists for
//! server-rendered request paths that never touch local disk.

use leadflow_core::DataAccessError;
use std::path::PathBuf;
use std::sync::Mutex;

/// Durable key-value sink for the active-workspace id.
pub trait SelectionStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, DataAccessError>;
    fn save(&self, workspace_id: &str) -> Result<(), DataAccessError>;
    fn clear(&self) -> Result<(), DataAccessError>;
}

/// Persisted context file contents.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct ContextFile {
    #[serde(default)]
    active_workspace_id: Option<String>,
}

/// TOML-backed store at `$LEADFLOW_HOME/context.toml`.
pub struct FileSelectionStore {
    path: PathBuf,
}

impl FileSelectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `context.toml` under the Leadflow home directory,
    /// resolved by the same helper the config file and database use.
    pub fn default_path() -> Result<PathBuf, DataAccessError> {
        leadflow_logging::leadflow_home()
            .map(|home| home.join("context.toml"))
            .map_err(|e| DataAccessError::unavailable(e.to_string()))
    }

    fn read_context(&self) -> Result<ContextFile, DataAccessError> {
        if !self.path.exists() {
            return Ok(ContextFile::default());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            DataAccessError::unavailable(format!(
                "Failed to read context file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            DataAccessError::unavailable(format!(
                "Failed to parse context file {}: {}. Delete this file to reset.",
                self.path.display(),
                e
            ))
        })
    }

    fn write_context(&self, context: &ContextFile) -> Result<(), DataAccessError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DataAccessError::unavailable(format!(
                    "Failed to create context directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        let content = toml::to_string_pretty(context)
            .map_err(|e| DataAccessError::unavailable(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| {
            DataAccessError::unavailable(format!(
                "Failed to write context file {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl SelectionStore for FileSelectionStore {
    fn load(&self) -> Result<Option<String>, DataAccessError> {
        Ok(self.read_context()?.active_workspace_id)
    }

    fn save(&self, workspace_id: &str) -> Result<(), DataAccessError> {
        let mut context = self.read_context()?;
        context.active_workspace_id = Some(workspace_id.to_string());
        self.write_context(&context)
    }

    fn clear(&self) -> Result<(), DataAccessError> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut context = self.read_context()?;
        context.active_workspace_id = None;
        self.write_context(&context)
    }
}

/// In-memory store, for tests and short-lived sessions.
#[derive(Default)]
pub struct MemorySelectionStore {
    cell: Mutex<Option<String>>,
}

impl MemorySelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(workspace_id: &str) -> Self {
        Self {
            cell: Mutex::new(Some(workspace_id.to_string())),
        }
    }
}

impl SelectionStore for MemorySelectionStore {
    fn load(&self) -> Result<Option<String>, DataAccessError> {
        Ok(self.cell.lock().expect("selection store poisoned").clone())
    }

    fn save(&self, workspace_id: &str) -> Result<(), DataAccessError> {
        *self.cell.lock().expect("selection store poisoned") = Some(workspace_id.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), DataAccessError> {
        *self.cell.lock().expect("selection store poisoned") = None;
        Ok(())
    }
}
