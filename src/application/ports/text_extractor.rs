use async_trait::async_trait;

use crate::domain::value_objects::DocumentType;

#[derive(Debug)]
pub enum ExtractionError {
    UnsupportedFormat(String),
    CorruptedFile(String),
    ExtractionFailed(String),
    EmptyDocument,
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionError::UnsupportedFormat(format) => {
                write!(f, "Unsupported format: {}", format)
            }
            ExtractionError::CorruptedFile(msg) => write!(f, "Corrupted file: {}", msg),
            ExtractionError::ExtractionFailed(msg) => write!(f, "Extraction failed: {}", msg),
            ExtractionError::EmptyDocument => write!(f, "Document contains no extractable text"),
        }
    }
}

impl std::error::Error for ExtractionError {}

/// Raw text pulled out of an uploaded file. `pages` is present for formats
/// with page structure (PDF); page numbers start at 1.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    pub pages: Option<Vec<(i32, String)>>,
}

impl ExtractedText {
    pub fn flat(text: String) -> Self {
        Self { text, pages: None }
    }

    pub fn paged(pages: Vec<(i32, String)>) -> Self {
        let text = pages
            .iter()
            .map(|(_, t)| t.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            text,
            pages: Some(pages),
        }
    }
}

/// External text-extraction collaborator: bytes in, plain text (plus
/// optional page map) out. Parsing internals stay behind this boundary.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(
        &self,
        data: &[u8],
        doc_type: DocumentType,
    ) -> Result<ExtractedText, ExtractionError>;
}
