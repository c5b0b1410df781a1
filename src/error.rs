use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("{field} cannot contain {found:?}")]
    ForbiddenCharacter { field: String, found: char },

    #[error("{field} must be positive")]
    NonPositive { field: String },

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Invalid contact ID: {id}")]
    InvalidSelection { id: u64 },

    #[error("Page {page} is out of range ({total_pages} page(s))")]
    PageOutOfRange { page: usize, total_pages: usize },

    #[error("Malformed record {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ContactResult<T> = Result<T, ContactError>;

impl ContactError {
    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        ContactError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }
}
