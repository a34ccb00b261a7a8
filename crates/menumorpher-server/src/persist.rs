//! Writes the raw food menus JSON to disk.

use std::path::Path;

use tracing::info;

use crate::error::{ServerError, ServerResult};

/// Writes `raw` to `path`, creating parent directories as needed.
///
/// An existing file is overwritten.
pub async fn save_menu(path: &Path, raw: &str) -> ServerResult<()> {
    let persist_err = |source| ServerError::Persist {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await.map_err(persist_err)?;
    }

    tokio::fs::write(path, raw).await.map_err(persist_err)?;
    info!("saved {} bytes of menu JSON to {}", raw.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_raw_body_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.json");
        let raw = r#"{"menus":[{"sections":[]}]}"#;

        save_menu(&path, raw).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), raw);
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out").join("menu.json");

        save_menu(&path, "{}").await.unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn overwrites_previous_menu() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.json");

        save_menu(&path, "{\"menus\":[]}").await.unwrap();
        save_menu(&path, "{}").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[tokio::test]
    async fn unwritable_target_is_persist_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be overwritten with file contents.
        let err = save_menu(dir.path(), "{}").await.unwrap_err();
        assert!(matches!(err, ServerError::Persist { .. }));
    }
}
