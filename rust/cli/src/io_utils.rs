//! Filesystem helpers shared by commands.

/// Ensure parent directory exists for given path, creating if needed.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// # use onecard_cli::io_utils::ensure_parent_dir;
///
/// let path = Path::new("output/boards/leaderboard.sqlite");
/// ensure_parent_dir(path).unwrap();
/// ```
pub fn ensure_parent_dir(path: &std::path::Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}
