//! Profile persistence between runs
//!
//! Profiles are written as JSON when the bot shuts down and read back at
//! startup. Both directions are best effort: a missing or unreadable file
//! yields an empty map, and a failed write is logged and ignored.

use crate::error::{LingobotError, Result};
use crate::session::store::ProfileMap;
use std::path::PathBuf;

/// The persisted profile file
#[derive(Debug, Clone)]
pub struct ProfileFile {
    path: PathBuf,
}

impl ProfileFile {
    /// Bind to a file path; nothing is read or created yet
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the profile map
    ///
    /// Never fails: a missing file or a file that does not deserialize gives
    /// an empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// use lingobot::session::ProfileFile;
    ///
    /// let file = ProfileFile::new("/nonexistent/profiles.json");
    /// assert!(file.load().is_empty());
    /// ```
    pub fn load(&self) -> ProfileMap {
        if !self.path.exists() {
            tracing::info!(
                "No profile file found ({}) so starting with no users",
                self.path.display()
            );
            return ProfileMap::new();
        }

        match self.try_load() {
            Ok(profiles) => {
                tracing::debug!("Loaded {} user profiles", profiles.len());
                profiles
            }
            Err(e) => {
                tracing::warn!("Problem loading user profiles: {}", e);
                ProfileMap::new()
            }
        }
    }

    /// Save the profile map, logging any failure
    pub fn save(&self, profiles: &ProfileMap) {
        match self.try_save(profiles) {
            Ok(()) => tracing::debug!(
                "Saved {} user profiles to {}",
                profiles.len(),
                self.path.display()
            ),
            Err(e) => tracing::warn!("Problem saving user profiles: {}", e),
        }
    }

    fn try_load(&self) -> Result<ProfileMap> {
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Save the profile map, reporting failures to the caller
    ///
    /// The file is written through a temporary sibling and renamed into
    /// place so an interrupted write leaves the previous profiles intact.
    ///
    /// # Errors
    ///
    /// Returns `LingobotError::Persistence` if the directory cannot be
    /// created or the file cannot be written.
    pub fn try_save(&self, profiles: &ProfileMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    LingobotError::Persistence(format!(
                        "cannot create {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(profiles)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json).map_err(|e| {
            LingobotError::Persistence(format!("cannot write {}: {}", tmp.display(), e))
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            LingobotError::Persistence(format!(
                "cannot replace {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(())
    }
}
