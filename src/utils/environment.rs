use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Directory name used under the platform data directory
pub const APP_DIR_NAME: &str = "email-classifier";
const STORAGE_FILENAME: &str = "storage.json";
const LOG_DIR_NAME: &str = "logs";

/// Platform data directory for this application (not created)
pub fn get_data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Failed to get platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}

/// Default location of the local key-value store
pub fn default_storage_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(STORAGE_FILENAME))
}

/// Directory the interactive session writes its log files to
pub fn default_log_dir() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(LOG_DIR_NAME))
}

/// Validate a backend base URL and strip trailing slashes.
///
/// ```
/// use email_classifier::utils::normalize_backend_url;
///
/// assert_eq!(normalize_backend_url("http://localhost:5000/").unwrap(), "http://localhost:5000");
/// assert!(normalize_backend_url("localhost:5000").is_err());
/// ```
pub fn normalize_backend_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = reqwest::Url::parse(trimmed)
        .with_context(|| format!("Invalid backend URL: {}", raw))?;

    if !matches!(url.scheme(), "http" | "https") {
        bail!("Backend URL must use http or https, got '{}'", url.scheme());
    }
    if url.query().is_some() || url.fragment().is_some() {
        bail!("Backend URL must not contain a query or fragment: {}", raw);
    }

    Ok(trimmed.to_string())
}
