//! Deterministic in-memory doubles for the provider ports, shared by the
//! service and use-case tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

use crate::application::ports::answer_generator::{
    AnswerGenerator, GenerationError, GenerationRequest,
};
use crate::application::ports::document_registry::{DocumentRegistry, RegistryError};
use crate::application::ports::embedding_provider::{EmbeddingError, EmbeddingProvider};
use crate::application::ports::text_extractor::{ExtractedText, ExtractionError, TextExtractor};
use crate::application::ports::vector_index::{ChunkRecord, IndexError, ScoredChunk, VectorIndex};
use crate::domain::entities::Document;
use crate::domain::value_objects::{DocumentStatus, DocumentType};

/// Produces a deterministic vector per input text; identical texts embed to
/// identical vectors (cosine similarity 1.0).
pub struct StubEmbedder {
    dimension: usize,
}

impl StubEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        let seed: u32 = text.bytes().map(u32::from).sum();
        (0..self.dimension)
            .map(|i| 0.1 + ((seed as usize + i * 7) % 13) as f32 / 13.0)
            .collect()
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.vector_for(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }

    fn model_name(&self) -> &str {
        "stub-embedder"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::ServiceUnavailable)
    }

    async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Err(EmbeddingError::ServiceUnavailable)
    }

    fn model_name(&self) -> &str {
        "failing-embedder"
    }

    fn dimension(&self) -> usize {
        8
    }
}

/// Brute-force cosine index over a Vec, mirroring the adapter contract:
/// thresholded, sorted descending, top-k bounded.
pub struct InMemoryIndex {
    records: Mutex<Vec<ChunkRecord>>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<ChunkRecord> {
        self.records.lock().unwrap().clone()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn upsert(&self, records: &[ChunkRecord]) -> Result<(), IndexError> {
        let mut stored = self.records.lock().unwrap();
        for record in records {
            stored.retain(|r| r.id != record.id);
            stored.push(record.clone());
        }
        Ok(())
    }

    async fn search(
        &self,
        query_vector: &[f32],
        top_k: usize,
        min_score: f32,
    ) -> Result<Vec<ScoredChunk>, IndexError> {
        let stored = self.records.lock().unwrap();
        let mut hits: Vec<ScoredChunk> = stored
            .iter()
            .map(|record| ScoredChunk {
                content: record.content.clone(),
                metadata: record.metadata.clone(),
                score: cosine_similarity(query_vector, &record.embedding),
            })
            .filter(|hit| hit.score >= min_score)
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        hits.truncate(top_k);
        Ok(hits)
    }

    async fn delete_by_document(&self, document_id: Uuid) -> Result<u64, IndexError> {
        let mut stored = self.records.lock().unwrap();
        let before = stored.len();
        stored.retain(|r| r.document_id != document_id);
        Ok((before - stored.len()) as u64)
    }

    async fn total_chunks(&self) -> Result<i64, IndexError> {
        Ok(self.records.lock().unwrap().len() as i64)
    }
}

/// Returns a fixed result set for any query; lets pipeline tests control
/// exactly what retrieval produces.
pub struct StaticIndex {
    hits: Vec<ScoredChunk>,
}

impl StaticIndex {
    pub fn new(hits: Vec<ScoredChunk>) -> Self {
        Self { hits }
    }

    pub fn empty() -> Self {
        Self { hits: Vec::new() }
    }
}

#[async_trait]
impl VectorIndex for StaticIndex {
    async fn upsert(&self, _records: &[ChunkRecord]) -> Result<(), IndexError> {
        Ok(())
    }

    async fn search(
        &self,
        _query_vector: &[f32],
        top_k: usize,
        min_score: f32,
    ) -> Result<Vec<ScoredChunk>, IndexError> {
        let mut hits: Vec<ScoredChunk> = self
            .hits
            .iter()
            .filter(|hit| hit.score >= min_score)
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        hits.truncate(top_k);
        Ok(hits)
    }

    async fn delete_by_document(&self, _document_id: Uuid) -> Result<u64, IndexError> {
        Ok(0)
    }

    async fn total_chunks(&self) -> Result<i64, IndexError> {
        Ok(self.hits.len() as i64)
    }
}

pub struct InMemoryRegistry {
    documents: Mutex<HashMap<Uuid, Document>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl DocumentRegistry for InMemoryRegistry {
    async fn create(&self, document: &Document) -> Result<(), RegistryError> {
        self.documents
            .lock()
            .unwrap()
            .insert(document.id(), document.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: &DocumentStatus,
        chunk_count: Option<i32>,
        indexed_at: Option<DateTime<Utc>>,
    ) -> Result<(), RegistryError> {
        let mut documents = self.documents.lock().unwrap();
        let existing = documents.get(&id).ok_or(RegistryError::NotFound(id))?;
        let updated = Document::from_parts(
            existing.id(),
            existing.name().to_string(),
            existing.doc_type(),
            existing.size_bytes(),
            status.clone(),
            chunk_count.unwrap_or(existing.chunk_count()),
            existing.created_at(),
            indexed_at.or(existing.indexed_at()),
        );
        documents.insert(id, updated);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Document>, RegistryError> {
        Ok(self.documents.lock().unwrap().get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Document>, RegistryError> {
        let mut documents: Vec<Document> =
            self.documents.lock().unwrap().values().cloned().collect();
        documents.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(documents)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RegistryError> {
        Ok(self.documents.lock().unwrap().remove(&id).is_some())
    }

    async fn count_by_status(&self) -> Result<HashMap<String, i64>, RegistryError> {
        let documents = self.documents.lock().unwrap();
        let mut counts = HashMap::new();
        for document in documents.values() {
            *counts
                .entry(document.status().as_str().to_string())
                .or_insert(0) += 1;
        }
        Ok(counts)
    }
}

pub struct StaticExtractor {
    extracted: ExtractedText,
}

impl StaticExtractor {
    pub fn flat(text: String) -> Self {
        Self {
            extracted: ExtractedText::flat(text),
        }
    }

    pub fn paged(pages: Vec<(i32, String)>) -> Self {
        Self {
            extracted: ExtractedText::paged(pages),
        }
    }
}

#[async_trait]
impl TextExtractor for StaticExtractor {
    async fn extract(
        &self,
        _data: &[u8],
        _doc_type: DocumentType,
    ) -> Result<ExtractedText, ExtractionError> {
        Ok(self.extracted.clone())
    }
}

/// Records every generation call; lets tests assert the LLM was (not)
/// invoked and inspect the composed prompt.
pub struct CountingGenerator {
    pub answer: String,
    calls: AtomicUsize,
    prompts: Mutex<Vec<GenerationRequest>>,
}

impl CountingGenerator {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerGenerator for CountingGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request);
        Ok(self.answer.clone())
    }
}

pub struct FailingGenerator;

#[async_trait]
impl AnswerGenerator for FailingGenerator {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, GenerationError> {
        Err(GenerationError::ApiError("model overloaded".to_string()))
    }
}
