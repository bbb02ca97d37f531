use serde::{Deserialize, Serialize};

/// File formats accepted for upload. Anything else is rejected before any
/// extraction or indexing work starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Pdf,
    Docx,
    Doc,
    Txt,
    Csv,
    Xlsx,
    Xls,
}

impl DocumentType {
    pub const ALLOWED_EXTENSIONS: &'static [&'static str] =
        &["pdf", "docx", "doc", "txt", "csv", "xlsx", "xls"];

    /// Parses a file extension (with or without leading dot), case-insensitive.
    pub fn from_extension(ext: &str) -> Result<Self, String> {
        let normalized = ext.trim_start_matches('.').to_lowercase();
        match normalized.as_str() {
            "pdf" => Ok(DocumentType::Pdf),
            "docx" => Ok(DocumentType::Docx),
            "doc" => Ok(DocumentType::Doc),
            "txt" => Ok(DocumentType::Txt),
            "csv" => Ok(DocumentType::Csv),
            "xlsx" => Ok(DocumentType::Xlsx),
            "xls" => Ok(DocumentType::Xls),
            _ => Err(format!(
                "Unsupported file type '{}'. Allowed types: {}",
                ext,
                Self::ALLOWED_EXTENSIONS.join(", ")
            )),
        }
    }

    pub fn from_filename(filename: &str) -> Result<Self, String> {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .ok_or_else(|| format!("File '{}' has no extension", filename))?;
        Self::from_extension(ext)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Pdf => "pdf",
            DocumentType::Docx => "docx",
            DocumentType::Doc => "doc",
            DocumentType::Txt => "txt",
            DocumentType::Csv => "csv",
            DocumentType::Xlsx => "xlsx",
            DocumentType::Xls => "xls",
        }
    }

    /// OOXML containers are ZIP archives and get structure-aware extraction.
    pub fn is_ooxml(&self) -> bool {
        matches!(self, DocumentType::Docx | DocumentType::Xlsx)
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(DocumentType::from_extension("pdf").unwrap(), DocumentType::Pdf);
        assert_eq!(DocumentType::from_extension(".PDF").unwrap(), DocumentType::Pdf);
        assert_eq!(DocumentType::from_extension("xlsx").unwrap(), DocumentType::Xlsx);
        assert!(DocumentType::from_extension("exe").is_err());
        assert!(DocumentType::from_extension("").is_err());
    }

    #[test]
    fn test_from_filename() {
        assert_eq!(
            DocumentType::from_filename("report.final.docx").unwrap(),
            DocumentType::Docx
        );
        assert!(DocumentType::from_filename("no_extension").is_err());
        assert!(DocumentType::from_filename("image.png").is_err());
    }

    #[test]
    fn test_every_allowed_extension_parses() {
        for ext in DocumentType::ALLOWED_EXTENSIONS {
            let parsed = DocumentType::from_extension(ext).unwrap();
            assert_eq!(parsed.as_str(), *ext);
        }
    }
}
