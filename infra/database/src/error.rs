/// A specialized error enum for this crate.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Validation errors (missing builder parameters and the like).
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Occurs when connectivity or health checks fail.
    #[error("Database connection failed: {message}")]
    Connection { message: String },

    /// Occurs when authentication fails.
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// A wrapper for underlying `SurrealDB` engine errors.
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    /// Migration failures or invariant violations.
    #[error("Migration error: {message}")]
    Migration { message: String },
}
