use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    Indexing,
    Indexed,
    Failed(String),
}

impl DocumentStatus {
    pub fn is_indexing(&self) -> bool {
        matches!(self, DocumentStatus::Indexing)
    }

    pub fn is_indexed(&self) -> bool {
        matches!(self, DocumentStatus::Indexed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DocumentStatus::Failed(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DocumentStatus::Indexed | DocumentStatus::Failed(_))
    }

    pub fn can_transition_to(&self, new_status: &DocumentStatus) -> bool {
        match (self, new_status) {
            (DocumentStatus::Indexing, DocumentStatus::Indexed) => true,
            (DocumentStatus::Indexing, DocumentStatus::Failed(_)) => true,
            // A failed document may be re-submitted for indexing.
            (DocumentStatus::Failed(_), DocumentStatus::Indexing) => true,
            _ => false,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            DocumentStatus::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Indexing => "INDEXING",
            DocumentStatus::Indexed => "INDEXED",
            DocumentStatus::Failed(_) => "FAILED",
        }
    }

    pub fn from_str_with_error(s: &str, error: Option<String>) -> Result<Self, String> {
        match s {
            "INDEXING" => Ok(DocumentStatus::Indexing),
            "INDEXED" => Ok(DocumentStatus::Indexed),
            "FAILED" => Ok(DocumentStatus::Failed(
                error.unwrap_or_else(|| "Unknown error".to_string()),
            )),
            _ => Err(format!("Invalid document status: {}", s)),
        }
    }
}

impl Default for DocumentStatus {
    fn default() -> Self {
        DocumentStatus::Indexing
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
