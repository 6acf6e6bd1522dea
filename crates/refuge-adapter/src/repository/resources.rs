//! Flat text encoding of a survivor's resources
//!
//! `["water", "rope"]` is stored as `water,rope`. The empty list is the
//! empty string. Empty tags and tags containing the delimiter are refused
//! on write so every stored value decodes back to exactly what was written.

use refuge_domain::{RepositoryError, RESOURCE_DELIMITER};

/// Join resources into one column value.
pub fn encode(resources: &[String]) -> Result<String, RepositoryError> {
    if resources.iter().any(|r| r.is_empty()) {
        return Err(RepositoryError::InvalidRecord {
            message: "resource tags must not be empty".to_string(),
        });
    }
    if let Some(bad) = resources.iter().find(|r| r.contains(RESOURCE_DELIMITER)) {
        return Err(RepositoryError::InvalidRecord {
            message: format!("resource '{}' contains '{}'", bad, RESOURCE_DELIMITER),
        });
    }
    let mut joined = String::new();
    for (i, resource) in resources.iter().enumerate() {
        if i > 0 {
            joined.push(RESOURCE_DELIMITER);
        }
        joined.push_str(resource);
    }
    Ok(joined)
}

/// Split a column value back into resources.
pub fn decode(column: &str) -> Vec<String> {
    if column.is_empty() {
        return Vec::new();
    }
    column
        .split(RESOURCE_DELIMITER)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_water_and_rope() {
        let resources = tags(&["water", "rope"]);

        let column = encode(&resources).unwrap();

        assert_eq!(column, "water,rope");
        assert_eq!(decode(&column), resources);
    }

    #[test]
    fn test_empty_list_is_empty_column() {
        assert_eq!(encode(&[]).unwrap(), "");
        assert!(decode("").is_empty());
    }

    #[test]
    fn test_blank_tag_rejected() {
        // [""] would otherwise read back as []
        let err = encode(&tags(&[""])).unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidRecord { .. }));
    }

    #[test]
    fn test_delimiter_rejected() {
        let err = encode(&tags(&["ammo,9mm"])).unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidRecord { .. }));
    }
}
