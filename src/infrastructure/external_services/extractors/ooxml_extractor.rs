use std::io::{Cursor, Read};

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::application::ports::text_extractor::{
    ExtractedText, ExtractionError, TextExtractor,
};
use crate::domain::value_objects::DocumentType;

/// Decompressed-bytes cap per ZIP entry; guards against zip bombs.
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;
const XLSX_MAX_SHEETS: usize = 100;

/// OOXML containers (docx, xlsx) are ZIP archives of XML parts. Text lives
/// in `<w:t>` runs for Word and in shared strings referenced by worksheet
/// cells for Excel.
pub struct OoxmlExtractor;

impl OoxmlExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OoxmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractor for OoxmlExtractor {
    async fn extract(
        &self,
        data: &[u8],
        doc_type: DocumentType,
    ) -> Result<ExtractedText, ExtractionError> {
        let text = match doc_type {
            DocumentType::Docx => extract_docx(data)?,
            DocumentType::Xlsx => extract_xlsx(data)?,
            other => return Err(ExtractionError::UnsupportedFormat(other.to_string())),
        };

        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        Ok(ExtractedText::flat(text))
    }
}

fn open_archive(data: &[u8]) -> Result<zip::ZipArchive<Cursor<&[u8]>>, ExtractionError> {
    zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| ExtractionError::CorruptedFile(e.to_string()))
}

fn read_entry(
    archive: &mut zip::ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> Result<Vec<u8>, ExtractionError> {
    let entry = archive
        .by_name(name)
        .map_err(|e| ExtractionError::CorruptedFile(format!("{}: {}", name, e)))?;

    let mut out = Vec::new();
    entry
        .take(MAX_XML_ENTRY_BYTES)
        .read_to_end(&mut out)
        .map_err(|e| ExtractionError::ExtractionFailed(e.to_string()))?;
    if out.len() as u64 >= MAX_XML_ENTRY_BYTES {
        return Err(ExtractionError::ExtractionFailed(format!(
            "ZIP entry {} exceeds the {} byte limit",
            name, MAX_XML_ENTRY_BYTES
        )));
    }

    Ok(out)
}

fn extract_docx(data: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = open_archive(data)?;
    let document_xml = read_entry(&mut archive, "word/document.xml")?;
    collect_text_runs(&document_xml, b"t", b"p")
}

fn extract_xlsx(data: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = open_archive(data)?;
    let shared_strings = match read_entry(&mut archive, "xl/sharedStrings.xml") {
        Ok(xml) => read_shared_strings(&xml)?,
        // A workbook with only inline numbers has no shared-strings part.
        Err(_) => Vec::new(),
    };

    let mut sheet_names: Vec<String> = archive
        .file_names()
        .filter(|name| name.starts_with("xl/worksheets/sheet") && name.ends_with(".xml"))
        .map(str::to_string)
        .collect();
    sheet_names.sort_by_key(|name| {
        name.trim_start_matches("xl/worksheets/sheet")
            .trim_end_matches(".xml")
            .parse::<u32>()
            .unwrap_or(u32::MAX)
    });

    let mut lines = Vec::new();
    for name in sheet_names.into_iter().take(XLSX_MAX_SHEETS) {
        let sheet_xml = read_entry(&mut archive, &name)?;
        let cells = read_sheet_cells(&sheet_xml, &shared_strings)?;
        if !cells.is_empty() {
            lines.push(cells.join(" "));
        }
    }

    Ok(lines.join("\n"))
}

/// Collects the text of every `<{text_tag}>` element, inserting a line
/// break at each closing `<{break_tag}>` so paragraphs stay separated.
fn collect_text_runs(
    xml: &[u8],
    text_tag: &[u8],
    break_tag: &[u8],
) -> Result<String, ExtractionError> {
    // No text trimming here: spaces inside and between text runs are
    // significant in Word documents.
    let mut reader = Reader::from_reader(xml);

    let mut out = String::new();
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == text_tag => in_text = true,
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == text_tag {
                    in_text = false;
                } else if e.local_name().as_ref() == break_tag && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            Ok(Event::Text(t)) if in_text => {
                out.push_str(t.unescape().unwrap_or_default().as_ref());
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractionError::CorruptedFile(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(out.trim_end().to_string())
}

fn read_shared_strings(xml: &[u8]) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_si = false;
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"t" if in_si => in_text = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"si" => {
                    in_si = false;
                    strings.push(std::mem::take(&mut current));
                }
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                current.push_str(t.unescape().unwrap_or_default().as_ref());
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractionError::CorruptedFile(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}

fn read_sheet_cells(
    xml: &[u8],
    shared_strings: &[String],
) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut cells = Vec::new();
    let mut cell_is_shared = false;
    let mut in_value = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"c" => {
                    cell_is_shared = e.attributes().any(|attr| {
                        attr.as_ref()
                            .map(|a| a.key.as_ref() == b"t" && a.value.as_ref() == b"s")
                            .unwrap_or(false)
                    });
                }
                b"v" => in_value = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"v" => in_value = false,
                b"c" => cell_is_shared = false,
                _ => {}
            },
            Ok(Event::Text(t)) if in_value => {
                let value = t.unescape().unwrap_or_default();
                let value = value.trim();
                if !value.is_empty() {
                    if cell_is_shared {
                        if let Ok(idx) = value.parse::<usize>() {
                            if let Some(s) = shared_strings.get(idx) {
                                cells.push(s.clone());
                            }
                        }
                    } else {
                        cells.push(value.to_string());
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractionError::CorruptedFile(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_not_a_zip_is_corrupted() {
        let extractor = OoxmlExtractor::new();
        let result = extractor.extract(b"plainly not a zip", DocumentType::Docx).await;

        assert!(matches!(result, Err(ExtractionError::CorruptedFile(_))));
    }

    #[tokio::test]
    async fn test_pdf_type_is_rejected() {
        let extractor = OoxmlExtractor::new();
        let result = extractor.extract(b"anything", DocumentType::Pdf).await;

        assert!(matches!(result, Err(ExtractionError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_collect_text_runs_joins_paragraphs() {
        let xml = br#"<w:document xmlns:w="ns"><w:body>
            <w:p><w:r><w:t>First paragraph.</w:t></w:r></w:p>
            <w:p><w:r><w:t>Second</w:t></w:r><w:r><w:t> paragraph.</w:t></w:r></w:p>
        </w:body></w:document>"#;

        let text = collect_text_runs(xml, b"t", b"p").unwrap();
        assert_eq!(text, "First paragraph.\nSecond paragraph.");
    }

    #[test]
    fn test_shared_strings_and_cells() {
        let shared = br#"<sst><si><t>alpha</t></si><si><t>beta</t></si></sst>"#;
        let strings = read_shared_strings(shared).unwrap();
        assert_eq!(strings, vec!["alpha".to_string(), "beta".to_string()]);

        let sheet = br#"<worksheet><sheetData>
            <row><c t="s"><v>1</v></c><c><v>42</v></c><c t="s"><v>0</v></c></row>
        </sheetData></worksheet>"#;
        let cells = read_sheet_cells(sheet, &strings).unwrap();
        assert_eq!(
            cells,
            vec!["beta".to_string(), "42".to_string(), "alpha".to_string()]
        );
    }
}
