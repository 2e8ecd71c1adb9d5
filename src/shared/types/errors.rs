use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Every violated rule, in evaluation order.
    #[error("Validation failed: {}", .0.join(" "))]
    ValidationFailed(Vec<String>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Store-level failure. The message is the store's, verbatim.
    #[error("Persistence failed: {0}")]
    PersistenceFailed(String),

    #[error("Configuration gap: {0}")]
    ConfigurationGap(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Operation already in progress: {0}")]
    Busy(&'static str),
}

impl DomainError {
    /// Message suitable for showing to the person at the keyboard.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::ValidationFailed(errors) => errors.join("\n"),
            DomainError::NotFound { entity, value, .. } => {
                format!("{} #{} not found.", entity, value)
            }
            DomainError::Unauthorized(msg) => msg.clone(),
            DomainError::PersistenceFailed(msg) => format!("Could not save changes: {}", msg),
            other => other.to_string(),
        }
    }

    /// Errors the caller can fix by changing its input.
    pub fn is_client_correctable(&self) -> bool {
        matches!(
            self,
            DomainError::ValidationFailed(_)
                | DomainError::NotFound { .. }
                | DomainError::Unauthorized(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Crypto error: {0}")]
    Crypto(#[from] bcrypt::BcryptError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        DomainError::PersistenceFailed(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_every_rule() {
        let err = DomainError::ValidationFailed(vec![
            "A restaurant must be selected.".into(),
            "Party size must be between 1 and 12.".into(),
        ]);
        assert_eq!(
            err.user_message(),
            "A restaurant must be selected.\nParty size must be between 1 and 12."
        );
        assert!(err.is_client_correctable());
    }

    #[test]
    fn not_found_renders_entity_and_value() {
        let err = DomainError::NotFound {
            entity: "Restaurant",
            field: "id",
            value: "42".into(),
        };
        assert_eq!(err.user_message(), "Restaurant #42 not found.");
        assert_eq!(err.to_string(), "Not found: Restaurant with id=42");
    }

    #[test]
    fn persistence_keeps_store_message() {
        let err: DomainError =
            InfraError::Database(sea_orm::DbErr::Custom("disk I/O error".into())).into();
        match &err {
            DomainError::PersistenceFailed(msg) => assert!(msg.contains("disk I/O error")),
            other => panic!("unexpected {other:?}"),
        }
        assert!(!err.is_client_correctable());
    }
}
