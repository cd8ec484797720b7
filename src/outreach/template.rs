//! Message body loading

use crate::TrawlerError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Reads the HTML template used verbatim as every message body
///
/// # Returns
///
/// * `Ok(String)` - The template contents
/// * `Err(TrawlerError::Template)` - The file is missing or blank
/// * `Err(TrawlerError::Io)` - The file exists but could not be read
pub fn load_template(path: &Path) -> Result<String, TrawlerError> {
    let body = match fs::read_to_string(path) {
        Ok(body) => body,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(template_error(path, "file not found"));
        }
        Err(e) => return Err(e.into()),
    };

    if body.trim().is_empty() {
        return Err(template_error(path, "template is empty"));
    }

    Ok(body)
}

pub(crate) fn template_error(path: &Path, message: &str) -> TrawlerError {
    TrawlerError::Template {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}
