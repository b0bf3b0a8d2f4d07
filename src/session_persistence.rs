use crate::types::StoredSession;
use crate::{Result, SoundCloudError};
use std::fs;
use std::path::{Path, PathBuf};

/// Session persistence utilities for keeping credentials in the XDG data
/// directory.
///
/// The session lives in `~/.local/share/asynccloud/session.json`, so a client
/// id scraped once can be reused by later runs.
pub struct SessionPersistence;

impl SessionPersistence {
    /// Get the session file path using XDG directories.
    ///
    /// Returns a path like: `~/.local/share/asynccloud/session.json`
    pub fn get_session_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            SoundCloudError::Configuration("Cannot determine XDG data directory".to_string())
        })?;

        Ok(data_dir.join("asynccloud").join("session.json"))
    }

    /// Save a session to the XDG data directory.
    pub fn save_session(session: &StoredSession) -> Result<()> {
        Self::save_session_to(&Self::get_session_path()?, session)
    }

    /// Load the saved session, if there is one.
    pub fn load_session() -> Result<Option<StoredSession>> {
        Self::load_session_from(&Self::get_session_path()?)
    }

    /// Remove the saved session. Does nothing when none exists.
    pub fn remove_session() -> Result<()> {
        let session_path = Self::get_session_path()?;

        if session_path.exists() {
            fs::remove_file(&session_path)?;
            log::debug!("Session removed from: {}", session_path.display());
        }

        Ok(())
    }

    pub fn save_session_to(path: &Path, session: &StoredSession) -> Result<()> {
        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let session_json = session.to_json().map_err(|e| {
            SoundCloudError::Configuration(format!("Failed to serialize session: {e}"))
        })?;
        fs::write(path, session_json)?;

        log::debug!("Session saved to: {}", path.display());
        Ok(())
    }

    pub fn load_session_from(path: &Path) -> Result<Option<StoredSession>> {
        if !path.exists() {
            return Ok(None);
        }

        let session_json = fs::read_to_string(path)?;
        let session = StoredSession::from_json(&session_json).map_err(|e| {
            SoundCloudError::Configuration(format!(
                "Failed to parse session file {}: {e}",
                path.display()
            ))
        })?;

        log::debug!("Session loaded from: {}", path.display());
        Ok(Some(session))
    }
}
