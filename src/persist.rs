// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::models::{Budget, Goal, Insight, Transaction, User};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Spendwise", "spendwise"));

/// The full serialized state of the store. One document, written as a whole
/// on every logical mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("could not determine platform data directory")]
    NoDataDir,
}

/// Key-value persistence collaborator for the store snapshot. `load` returns
/// `None` when no snapshot exists yet; a corrupt snapshot surfaces as an
/// error and the caller starts empty instead of failing.
pub trait Persistence {
    fn load(&self) -> Result<Option<Snapshot>, PersistError>;
    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistError>;
}

pub fn data_path() -> Result<PathBuf, PersistError> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(PersistError::NoDataDir)?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("spendwise.json"))
}

/// Snapshot persistence backed by a single JSON file.
#[derive(Debug)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_location() -> Result<Self, PersistError> {
        Ok(Self::new(data_path()?))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Persistence for JsonFile {
    fn load(&self) -> Result<Option<Snapshot>, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    // Write-to-tmp then rename, so a crash mid-write never corrupts the
    // existing snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Keeps everything in memory; used by tests and as a fallback when the
/// platform data directory is unavailable.
#[derive(Debug, Default)]
pub struct InMemory {
    snapshot: std::cell::RefCell<Option<Snapshot>>,
}

impl Persistence for InMemory {
    fn load(&self) -> Result<Option<Snapshot>, PersistError> {
        Ok(self.snapshot.borrow().clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistError> {
        *self.snapshot.borrow_mut() = Some(snapshot.clone());
        Ok(())
    }
}
