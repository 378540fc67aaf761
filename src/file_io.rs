use crate::error::ConvertError;
use std::path::Path;
use tokio::fs;

/// Read a UTF-8 source file.
pub async fn read_file(path: &Path) -> Result<String, ConvertError> {
    fs::read_to_string(path)
        .await
        .map_err(|e| ConvertError::io(path, e))
}

/// Write `contents` to `path`, creating missing parent directories first.
pub async fn write_file(contents: &str, path: &Path) -> Result<(), ConvertError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ConvertError::io(parent, e))?;
    }

    fs::write(path, contents)
        .await
        .map_err(|e| ConvertError::io(path, e))
}
