use crate::domain::value_objects::ConfigError;

/// Splits document text into overlapping chunks using a prioritized
/// separator hierarchy: paragraph break, line break, sentence end, word
/// boundary, and finally hard character splits.
///
/// Each chunk after the first starts with the last `chunk_overlap`
/// characters of the previous chunk, so stripping that prefix from every
/// non-first chunk and concatenating reproduces the input exactly.
#[derive(Debug, Clone)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<&'static str>,
}

impl TextChunker {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, ConfigError> {
        if chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        if chunk_overlap >= chunk_size {
            return Err(ConfigError::InvalidChunkOverlap(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                chunk_overlap, chunk_size
            )));
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
            separators: vec!["\n\n", "\n", ". ", " ", ""],
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        // Every piece must fit into a continuation chunk next to the overlap
        // prefix, so pieces are bounded by size - overlap.
        let piece_max = self.chunk_size - self.chunk_overlap;
        let pieces = self.recursive_split(text, piece_max, &self.separators);

        // Pack pieces into non-overlapping segments. The first chunk carries
        // no prefix and may use the full chunk_size.
        let mut segments: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut budget = self.chunk_size;

        for piece in pieces {
            if char_len(&current) + char_len(&piece) <= budget {
                current.push_str(&piece);
            } else {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                    budget = piece_max;
                }
                current = piece;
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        // Prepend the overlap tail of the previous chunk to each segment.
        let mut chunks: Vec<String> = Vec::with_capacity(segments.len());
        for segment in segments {
            let chunk = match chunks.last() {
                None => segment,
                Some(previous) => {
                    let mut chunk = char_tail(previous, self.chunk_overlap).to_string();
                    chunk.push_str(&segment);
                    chunk
                }
            };
            chunks.push(chunk);
        }

        chunks
    }

    fn recursive_split(&self, text: &str, max_len: usize, separators: &[&'static str]) -> Vec<String> {
        if char_len(text) <= max_len {
            return vec![text.to_string()];
        }

        let Some((separator, rest)) = separators.split_first() else {
            return split_by_chars(text, max_len);
        };

        if separator.is_empty() {
            return split_by_chars(text, max_len);
        }

        let parts = split_keep_separator(text, separator);
        if parts.len() == 1 {
            return self.recursive_split(text, max_len, rest);
        }

        // Merge separator parts greedily up to max_len; oversized parts
        // descend to the next separator level.
        let mut pieces = Vec::new();
        let mut current = String::new();

        for part in parts {
            if char_len(&current) + char_len(&part) <= max_len {
                current.push_str(&part);
                continue;
            }

            if !current.is_empty() {
                pieces.push(std::mem::take(&mut current));
            }

            if char_len(&part) > max_len {
                pieces.extend(self.recursive_split(&part, max_len, rest));
            } else {
                current = part;
            }
        }
        if !current.is_empty() {
            pieces.push(current);
        }

        pieces
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Splits on `separator`, keeping the separator attached to the end of each
/// part so concatenating the parts reproduces the input.
fn split_keep_separator(text: &str, separator: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut start = 0;

    for (idx, matched) in text.match_indices(separator) {
        let end = idx + matched.len();
        parts.push(text[start..end].to_string());
        start = end;
    }
    if start < text.len() {
        parts.push(text[start..].to_string());
    }

    parts
}

/// Hard fallback: fixed-width character pieces, respecting UTF-8 boundaries.
fn split_by_chars(text: &str, max_len: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for c in text.chars() {
        current.push(c);
        count += 1;
        if count == max_len {
            pieces.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }

    pieces
}

/// The last `overlap` characters of `s` (the whole of `s` when shorter).
fn char_tail(s: &str, overlap: usize) -> &str {
    let len = char_len(s);
    if len <= overlap {
        return s;
    }
    let skip = len - overlap;
    match s.char_indices().nth(skip) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}
