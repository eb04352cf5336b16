// Validation utilities
// Author: Gabriel Demetrios Lafis

use std::collections::HashSet;

/// Validate the name given for an uploaded file
pub fn validate_file_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("'filename' cannot be empty".to_string());
    }

    if name.contains('/') || name.contains('\\') {
        return Err(format!("'{}' must be a bare file name", name));
    }

    Ok(())
}

/// Validate that an upload fits in the configured limit
pub fn validate_upload_size(size: usize, limit: usize) -> Result<(), String> {
    if size > limit {
        Err(format!("Upload of {} bytes exceeds the limit of {} bytes", size, limit))
    } else {
        Ok(())
    }
}

/// Validate a column selection against the available columns
pub fn validate_selection(selection: &[String], available: &[String]) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(selection.len());

    for name in selection {
        if !available.contains(name) {
            return Err(format!("Column '{}' not found", name));
        }

        if !seen.insert(name.as_str()) {
            return Err(format!("Column '{}' selected more than once", name));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert!(validate_file_name("data.csv").is_ok());
        assert!(validate_file_name("  ").is_err());
        assert!(validate_file_name("../etc/passwd.csv").is_err());
    }

    #[test]
    fn test_upload_size() {
        assert!(validate_upload_size(10, 10).is_ok());
        assert!(validate_upload_size(11, 10).is_err());
    }

    #[test]
    fn test_selection() {
        let available = vec!["a".to_string(), "b".to_string()];

        assert!(validate_selection(&[], &available).is_ok());
        assert!(validate_selection(&["b".to_string(), "a".to_string()], &available).is_ok());
        assert!(validate_selection(&["c".to_string()], &available).is_err());
        assert!(validate_selection(&["a".to_string(), "a".to_string()], &available).is_err());
    }
}
