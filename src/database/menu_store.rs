// ABOUTME: Persistent store of user-registered menus backed by a single JSON file
// ABOUTME: Every mutation rewrites the file via a temp file, fsync, and atomic rename
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Menu Store
//!
//! Menus are kept in memory in registration order and the full collection is
//! written back after each register, update, or delete. A failed write leaves
//! the in-memory change in place and reports [`MenuStoreError::Persist`].

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::constants::menu_store::ID_PREFIX;
use crate::errors::{AppError, ErrorCode};
use crate::logging::AppLogger;
use crate::models::{
    MenuListFilter, MenuRegistration, MenuSuggestionCriteria, MenuUpdate, RegisteredMenu,
};

/// Menu store failures
#[derive(Debug, Error)]
pub enum MenuStoreError {
    /// Registration or update fields failed validation
    #[error("{0}")]
    Validation(String),
    /// The store file or its directory could not be read or created
    #[error("Failed to access menu store at {}: {source}", path.display())]
    Io {
        /// Store path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
    /// The collection could not be encoded
    #[error("Failed to encode menus: {0}")]
    Encode(#[from] serde_json::Error),
    /// Writing the store failed after the in-memory change was applied
    #[error("Failed to save menus to {}; the change was applied in memory but may not be durable: {source}", path.display())]
    Persist {
        /// Store path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl From<MenuStoreError> for AppError {
    fn from(error: MenuStoreError) -> Self {
        let code = match &error {
            MenuStoreError::Validation(_) => ErrorCode::InvalidInput,
            MenuStoreError::Io { .. } | MenuStoreError::Persist { .. } => ErrorCode::StorageError,
            MenuStoreError::Encode(_) => ErrorCode::SerializationError,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

/// Registered menus plus the file they persist to
#[derive(Debug)]
pub struct MenuStore {
    path: PathBuf,
    menus: Vec<RegisteredMenu>,
}

impl MenuStore {
    /// Open the store at `path`
    ///
    /// A missing file is created holding an empty collection. An unparseable
    /// file is moved aside to `<name>.corrupt-<timestamp>` and the store starts
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created, read, or written
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, MenuStoreError> {
        let path = path.into();
        let mut store = Self {
            path,
            menus: Vec::new(),
        };

        if let Some(dir) = store.parent_dir() {
            fs::create_dir_all(&dir).map_err(|source| MenuStoreError::Io {
                path: dir.clone(),
                source,
            })?;
        }

        match fs::read_to_string(&store.path) {
            Ok(contents) => match serde_json::from_str::<Vec<RegisteredMenu>>(&contents) {
                Ok(menus) => {
                    info!(path = %store.path.display(), count = menus.len(), "Loaded menu store");
                    store.menus = menus;
                }
                Err(parse_error) => {
                    let backup = store.quarantine()?;
                    warn!(
                        path = %store.path.display(),
                        backup = %backup.display(),
                        error = %parse_error,
                        "Menu store unreadable, moved aside and starting empty"
                    );
                    store.initialize_file()?;
                }
            },
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                info!(path = %store.path.display(), "Creating empty menu store");
                store.initialize_file()?;
            }
            Err(source) => {
                return Err(MenuStoreError::Io {
                    path: store.path,
                    source,
                })
            }
        }

        Ok(store)
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of registered menus
    #[must_use]
    pub fn count(&self) -> usize {
        self.menus.len()
    }

    /// Register a new menu with a fresh id
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad fields, or a persistence error after the menu was added
    pub fn register(
        &mut self,
        registration: MenuRegistration,
    ) -> Result<RegisteredMenu, MenuStoreError> {
        registration
            .validate()
            .map_err(|error| MenuStoreError::Validation(error.message))?;

        let menu = RegisteredMenu::from_registration(self.generate_id(), registration, Utc::now());
        self.menus.push(menu.clone());
        self.persist("register", &menu.id)?;
        Ok(menu)
    }

    /// Merge supplied fields into an existing menu
    ///
    /// Returns `Ok(None)` when no menu has this id.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad fields, or a persistence error after the update was applied
    pub fn update(
        &mut self,
        id: &str,
        update: MenuUpdate,
    ) -> Result<Option<RegisteredMenu>, MenuStoreError> {
        update
            .validate()
            .map_err(|error| MenuStoreError::Validation(error.message))?;

        let Some(menu) = self.menus.iter_mut().find(|menu| menu.id == id) else {
            return Ok(None);
        };
        menu.apply(update);
        menu.updated_at = next_timestamp(menu.updated_at, Utc::now());
        let updated = menu.clone();

        self.persist("update", id)?;
        Ok(Some(updated))
    }

    /// Remove a menu; only writes the file when something was removed
    ///
    /// # Errors
    ///
    /// Returns a persistence error after the menu was removed from memory
    pub fn delete(&mut self, id: &str) -> Result<bool, MenuStoreError> {
        let Some(position) = self.menus.iter().position(|menu| menu.id == id) else {
            debug!(menu_id = %id, "Delete requested for unknown menu");
            return Ok(false);
        };
        self.menus.remove(position);
        self.persist("delete", id)?;
        Ok(true)
    }

    /// Look up a menu by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RegisteredMenu> {
        self.menus.iter().find(|menu| menu.id == id)
    }

    /// Menus passing every supplied filter, in registration order
    #[must_use]
    pub fn list(&self, filter: &MenuListFilter) -> Vec<&RegisteredMenu> {
        self.menus.iter().filter(|menu| filter.matches(menu)).collect()
    }

    /// Menus satisfying the criteria, best protein-to-fat ratio first
    ///
    /// Equal ratios keep registration order.
    #[must_use]
    pub fn suggest(&self, criteria: &MenuSuggestionCriteria) -> Vec<&RegisteredMenu> {
        let mut matches: Vec<&RegisteredMenu> = self
            .menus
            .iter()
            .filter(|menu| criteria.matches(menu))
            .collect();
        matches.sort_by(|a, b| b.protein_to_fat_ratio().total_cmp(&a.protein_to_fat_ratio()));
        matches
    }

    fn generate_id(&self) -> String {
        loop {
            let id = format!("{ID_PREFIX}{}", Uuid::new_v4().simple());
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&self, operation: &str, menu_id: &str) -> Result<(), MenuStoreError> {
        let result = self.encode().and_then(|contents| {
            self.write_file(&contents)
                .map_err(|source| MenuStoreError::Persist {
                    path: self.path.clone(),
                    source,
                })
        });
        AppLogger::log_store_operation(operation, Some(menu_id), result.is_ok());
        result
    }

    /// Write the current (empty) collection when opening a new or quarantined store
    fn initialize_file(&self) -> Result<(), MenuStoreError> {
        let contents = self.encode()?;
        self.write_file(&contents)
            .map_err(|source| MenuStoreError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn encode(&self) -> Result<String, MenuStoreError> {
        let mut contents = serde_json::to_string_pretty(&self.menus)?;
        contents.push('\n');
        Ok(contents)
    }

    /// Write to a temp file beside the store, fsync, then rename it into place
    fn write_file(&self, contents: &str) -> io::Result<()> {
        let dir = self.parent_dir().unwrap_or_else(|| PathBuf::from("."));

        let mut temp_file = NamedTempFile::new_in(&dir)?;
        temp_file.write_all(contents.as_bytes())?;
        temp_file.as_file_mut().sync_all()?;
        temp_file.persist(&self.path).map_err(|error| error.error)?;
        Ok(())
    }

    /// Rename an unreadable store file out of the way
    fn quarantine(&self) -> Result<PathBuf, MenuStoreError> {
        let file_name = self
            .path
            .file_name()
            .map_or_else(|| "menus.json".into(), |name| name.to_string_lossy().into_owned());
        let backup = self.path.with_file_name(format!(
            "{file_name}.corrupt-{}",
            Utc::now().format("%Y%m%dT%H%M%S%.6fZ")
        ));
        fs::rename(&self.path, &backup).map_err(|source| MenuStoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(backup)
    }

    fn parent_dir(&self) -> Option<PathBuf> {
        self.path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }
}

/// `now`, or one microsecond past `previous` when the clock has not advanced
fn next_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_timestamp_always_advances() {
        let previous = Utc::now();
        assert!(next_timestamp(previous, previous) > previous);
        let earlier = previous - Duration::seconds(5);
        assert!(next_timestamp(previous, earlier) > previous);
        let later = previous + Duration::seconds(5);
        assert_eq!(next_timestamp(previous, later), later);
    }
}
