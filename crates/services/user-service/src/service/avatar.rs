//! Avatar upload checks and file naming.

use std::path::Path;

use common::{AppError, AppResult};

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Public URL prefix of stored avatars.
pub(crate) const AVATAR_URL_PREFIX: &str = "/files/avatars/";

/// Validate an upload and return its lowercased extension.
pub fn avatar_extension(file_name: &str, size: usize, max_bytes: usize) -> AppResult<String> {
    if size == 0 {
        return Err(AppError::bad_request("Avatar file cannot be empty"));
    }
    if size > max_bytes {
        return Err(AppError::bad_request(format!(
            "Avatar file size exceeds maximum limit of {}MB",
            max_bytes / 1024 / 1024
        )));
    }

    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| AppError::bad_request("Invalid file type. Only JPG, PNG, and GIF are allowed"))
}

/// `awa.diallo@foundation.com` + `png` -> `awadiallofoundationcom_1a2b3c4d.png`
pub fn avatar_file_name(email: &str, extension: &str) -> String {
    let stem: String = email.chars().filter(|c| *c != '@' && *c != '.').collect();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}_{}.{}", stem, &suffix[..8], extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 5 * 1024 * 1024;

    #[test]
    fn test_accepts_known_image_types() {
        assert_eq!(avatar_extension("me.PNG", 10, MAX).unwrap(), "png");
        assert_eq!(avatar_extension("photo.jpeg", 10, MAX).unwrap(), "jpeg");
    }

    #[test]
    fn test_rejects_empty_oversized_and_unknown() {
        assert!(avatar_extension("me.png", 0, MAX).is_err());
        assert!(avatar_extension("me.png", MAX + 1, MAX).is_err());
        assert!(avatar_extension("me.pdf", 10, MAX).is_err());
        assert!(avatar_extension("noextension", 10, MAX).is_err());
    }

    #[test]
    fn test_file_name_strips_email_punctuation() {
        let name = avatar_file_name("awa.diallo@foundation.com", "png");
        assert!(name.starts_with("awadiallofoundationcom_"));
        assert!(name.ends_with(".png"));
        assert_eq!(name.len(), "awadiallofoundationcom_".len() + 8 + ".png".len());
    }
}
