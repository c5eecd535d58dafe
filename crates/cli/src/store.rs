//! Local session-token persistence.
//!
//! The terminal analog of the browser's `user-id` cookie: one token per
//! machine, read on start and rewritten whenever the backend rotates it.

use std::io;
use std::path::PathBuf;

use resell_client::SessionToken;

const SESSION_FILE_NAME: &str = ".resell-session";

/// Where the session token lives: `RESELL_SESSION_FILE` if set, otherwise
/// `$HOME/.resell-session`, falling back to the working directory.
#[must_use]
pub fn session_file() -> PathBuf {
    if let Ok(path) = std::env::var("RESELL_SESSION_FILE") {
        return PathBuf::from(path);
    }
    std::env::var("HOME").map_or_else(
        |_| PathBuf::from(SESSION_FILE_NAME),
        |home| PathBuf::from(home).join(SESSION_FILE_NAME),
    )
}

/// Load the stored token, if any. An unreadable or empty file counts as no
/// session, which makes bootstrap create a fresh anonymous user.
#[must_use]
pub fn load() -> Option<SessionToken> {
    let raw = std::fs::read_to_string(session_file()).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(SessionToken::new(trimmed))
    }
}

/// Persist a (possibly rotated) token. Must be called before any request
/// that follows a rotation.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(token: &SessionToken) -> io::Result<()> {
    std::fs::write(session_file(), token.expose())
}

/// Forget the stored token. Returns whether one existed.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear() -> io::Result<bool> {
    match std::fs::remove_file(session_file()) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
