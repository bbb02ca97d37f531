use std::sync::Arc;

use async_trait::async_trait;

use super::{OoxmlExtractor, PdfExtractor, PlainTextExtractor};
use crate::application::ports::text_extractor::{
    ExtractedText, ExtractionError, TextExtractor,
};
use crate::domain::value_objects::DocumentType;

/// Routes each accepted document type to the extractor that understands it.
/// The set of accepted types is decided upstream at upload time; anything
/// reaching this point is a supported extension.
pub struct CompositeExtractor {
    pdf: Arc<PdfExtractor>,
    ooxml: Arc<OoxmlExtractor>,
    plain: Arc<PlainTextExtractor>,
}

impl CompositeExtractor {
    pub fn new() -> Self {
        Self {
            pdf: Arc::new(PdfExtractor::new()),
            ooxml: Arc::new(OoxmlExtractor::new()),
            plain: Arc::new(PlainTextExtractor::new()),
        }
    }
}

impl Default for CompositeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for CompositeExtractor {
    async fn extract(
        &self,
        data: &[u8],
        doc_type: DocumentType,
    ) -> Result<ExtractedText, ExtractionError> {
        match doc_type {
            DocumentType::Pdf => self.pdf.extract(data, doc_type).await,
            DocumentType::Docx | DocumentType::Xlsx => self.ooxml.extract(data, doc_type).await,
            DocumentType::Txt | DocumentType::Csv | DocumentType::Doc | DocumentType::Xls => {
                self.plain.extract(data, doc_type).await
            }
        }
    }
}
