use async_trait::async_trait;
use lopdf::Document as PdfDocument;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::application::ports::text_extractor::{
    ExtractedText, ExtractionError, TextExtractor,
};
use crate::domain::value_objects::DocumentType;

/// PDF text extraction via lopdf, one entry per page so chunks keep their
/// page numbers for source attribution. Pages are independent, so they are
/// extracted in parallel.
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(data: &[u8]) -> Result<Vec<(i32, String)>, ExtractionError> {
        let doc = PdfDocument::load_mem(data)
            .map_err(|e| ExtractionError::CorruptedFile(e.to_string()))?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        let mut extracted: Vec<(u32, String)> = page_numbers
            .into_par_iter()
            .filter_map(|page_num| {
                // A page that fails to decode is skipped rather than failing
                // the whole document; a document where every page fails is
                // reported below.
                doc.extract_text(&[page_num])
                    .ok()
                    .map(|text| (page_num, normalize_page_text(&text)))
            })
            .filter(|(_, text)| !text.is_empty())
            .collect();

        if extracted.is_empty() {
            return Err(ExtractionError::ExtractionFailed(
                "no text could be extracted from any page".to_string(),
            ));
        }

        extracted.sort_by_key(|(page_num, _)| *page_num);
        Ok(extracted
            .into_iter()
            .map(|(page_num, text)| (page_num as i32, text))
            .collect())
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_page_text(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl TextExtractor for PdfExtractor {
    async fn extract(
        &self,
        data: &[u8],
        doc_type: DocumentType,
    ) -> Result<ExtractedText, ExtractionError> {
        if doc_type != DocumentType::Pdf {
            return Err(ExtractionError::UnsupportedFormat(doc_type.to_string()));
        }

        let pages = Self::extract_pages(data)?;
        Ok(ExtractedText::paged(pages))
    }
}
