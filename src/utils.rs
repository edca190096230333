// src/utils.rs
use anyhow::Result;

/// Normalize a repository, site or directory name: lowercase, `[a-z0-9-_.]` only
pub fn normalize_site_name(name: &str) -> String {
    let normalized = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    let trimmed = normalized.trim_matches('.');
    if trimmed.is_empty() {
        "portfolio".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validate file extension against allowed types
pub fn validate_file_extension(filename: &str, allowed: &[&str]) -> Result<()> {
    let ext = get_file_extension(filename)
        .ok_or_else(|| anyhow::anyhow!("File has no extension: {}", filename))?;

    if !allowed.contains(&ext.as_str()) {
        anyhow::bail!(
            "Unsupported file extension: {}. Allowed: {:?}",
            ext,
            allowed
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_site_name() {
        assert_eq!(normalize_site_name("Alex Morgan"), "alex-morgan");
        assert_eq!(normalize_site_name("my_site.v2"), "my_site.v2");
        assert_eq!(normalize_site_name("  Hello,  World!! "), "hello-world");
        assert_eq!(normalize_site_name("Élodie"), "lodie");
        assert_eq!(normalize_site_name("!!!"), "portfolio");
        assert_eq!(normalize_site_name(".."), "portfolio");
    }

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("resume.PDF"), Some("pdf".to_string()));
        assert_eq!(get_file_extension("noext"), None);
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("resume.pdf", &["pdf"]).is_ok());
        assert!(validate_file_extension("resume.docx", &["pdf"]).is_err());
        assert!(validate_file_extension("resume", &["pdf"]).is_err());
    }
}
