/// Error raised when a record ID fails table validation.
#[derive(Debug, thiserror::Error)]
pub enum ResourceGuardError {
    #[error("Resource validation error: {message}")]
    Validation { message: String },
}

/// Utilities for safe resource handling and ID validation.
#[derive(Debug)]
pub struct ResourceGuard;

impl ResourceGuard {
    /// Validates a `SurrealDB` ID string against a specific table.
    ///
    /// Prevents "ID Spoofing" where a caller provides an ID from a different
    /// table (e.g., providing a 'removal:...' ID to a 'waiting_list' endpoint).
    ///
    /// # Arguments
    /// * `id` - The ID to verify (e.g., "waiting_list:123" or just "123")
    /// * `expected_table` - The table the ID must belong to (e.g., "waiting_list")
    ///
    /// # Errors
    /// Returns an error if the ID table does not match the expected table.
    pub fn verify<I, T>(id: I, expected_table: T) -> Result<String, ResourceGuardError>
    where
        I: AsRef<str>,
        T: AsRef<str>,
    {
        let id_ref = id.as_ref();
        let table_ref = expected_table.as_ref();

        if let Some((table, _)) = id_ref.split_once(':') {
            if table != table_ref {
                return Err(ResourceGuardError::Validation {
                    message: format!("Expected '{table_ref}', got '{table}'"),
                });
            }
            // Return the full validated ID
            Ok(id_ref.to_owned())
        } else {
            // Automatically prefix if only the random part was provided
            Ok(format!("{table_ref}:{id_ref}"))
        }
    }

    /// Strips a table prefix from a record ID, if present.
    #[must_use]
    pub fn bare_id(id: &str) -> &str {
        id.split_once(':').map_or(id, |(_, bare)| bare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_verification() {
        // Correct table
        assert_eq!(
            ResourceGuard::verify("waiting_list:123", "waiting_list").unwrap(),
            "waiting_list:123"
        );

        // Auto-prefix
        assert_eq!(ResourceGuard::verify("123", "waiting_list").unwrap(), "waiting_list:123");

        // Malicious mismatch
        let err = ResourceGuard::verify("removal:config", "waiting_list");
        assert!(err.is_err());
    }

    #[test]
    fn test_bare_id() {
        assert_eq!(ResourceGuard::bare_id("waiting_list:abc"), "abc");
        assert_eq!(ResourceGuard::bare_id("abc"), "abc");
    }
}
