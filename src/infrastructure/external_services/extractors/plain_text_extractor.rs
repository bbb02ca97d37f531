use async_trait::async_trait;

use crate::application::ports::text_extractor::{
    ExtractedText, ExtractionError, TextExtractor,
};
use crate::domain::value_objects::DocumentType;

/// Lossy UTF-8 salvage for plain-text style formats (txt, csv) and the
/// legacy binary office formats (doc, xls), which carry their text inline
/// between binary runs.
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(
        &self,
        data: &[u8],
        _doc_type: DocumentType,
    ) -> Result<ExtractedText, ExtractionError> {
        let text = String::from_utf8_lossy(data)
            .replace('\u{FFFD}', " ")
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        Ok(ExtractedText::flat(text))
    }
}
