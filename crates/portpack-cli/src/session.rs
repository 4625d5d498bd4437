//! JSON session file shared between CLI invocations.

use std::path::Path;

use anyhow::Context;
use portpack_core::ProjectProfile;
use portpack_search::SearchSession;
use serde::{Deserialize, Serialize};

/// The profile a search ran with, plus its results and selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SessionFile {
    pub profile: ProjectProfile,
    pub search: SearchSession,
}

/// Loads the session at `path`.
///
/// # Errors
///
/// Returns an error if the file is missing or is not a valid session.
pub(crate) fn load(path: &Path) -> anyhow::Result<SessionFile> {
    let raw = std::fs::read_to_string(path).with_context(|| {
        format!(
            "no session at {}; run `portpack-cli search` first",
            path.display()
        )
    })?;
    serde_json::from_str(&raw)
        .with_context(|| format!("session file {} is not valid", path.display()))
}

/// Writes `session` to `path`, replacing any previous file.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub(crate) fn save(path: &Path, session: &SessionFile) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(session)?;
    std::fs::write(path, format!("{json}\n"))
        .with_context(|| format!("failed to write session {}", path.display()))?;
    tracing::debug!(path = %path.display(), "session saved");
    Ok(())
}
