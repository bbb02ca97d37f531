use std::sync::Arc;

use chrono::Utc;
use futures::future::try_join_all;
use tracing::{error, info};
use uuid::Uuid;

use crate::application::ports::text_extractor::ExtractedText;
use crate::application::ports::vector_index::ChunkRecord;
use crate::application::ports::{
    DocumentRegistry, EmbeddingProvider, TextExtractor, VectorIndex,
};
use crate::application::services::chunker::TextChunker;
use crate::application::services::config_store::ConfigStore;
use crate::domain::entities::{Chunk, Document};
use crate::domain::value_objects::DocumentStatus;

/// Texts per embedding request; embeddings are independent, so a document's
/// chunks can be sent in provider-sized batches.
const EMBED_BATCH_SIZE: usize = 100;

#[derive(Debug)]
pub enum IndexingError {
    ExtractionFailed(String),
    InvalidConfig(String),
    EmbeddingFailed(String),
    IndexFailed(String),
    RegistryFailed(String),
    DocumentNotFound(Uuid),
    Inconsistency(String),
}

impl std::fmt::Display for IndexingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexingError::ExtractionFailed(msg) => write!(f, "Extraction failed: {}", msg),
            IndexingError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            IndexingError::EmbeddingFailed(msg) => write!(f, "Embedding failed: {}", msg),
            IndexingError::IndexFailed(msg) => write!(f, "Vector index failure: {}", msg),
            IndexingError::RegistryFailed(msg) => write!(f, "Registry failure: {}", msg),
            IndexingError::DocumentNotFound(id) => write!(f, "Document not found: {}", id),
            IndexingError::Inconsistency(msg) => {
                write!(f, "Registry/index inconsistency: {}", msg)
            }
        }
    }
}

impl std::error::Error for IndexingError {}

/// Drives one document through extract -> chunk -> embed -> upsert and
/// keeps the registry status truthful: `Indexed` only after every chunk is
/// persisted, `Failed` on any error along the way.
pub struct IndexingService {
    extractor: Arc<dyn TextExtractor>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_index: Arc<dyn VectorIndex>,
    registry: Arc<dyn DocumentRegistry>,
    config_store: Arc<ConfigStore>,
}

impl IndexingService {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        vector_index: Arc<dyn VectorIndex>,
        registry: Arc<dyn DocumentRegistry>,
        config_store: Arc<ConfigStore>,
    ) -> Self {
        Self {
            extractor,
            embedding_provider,
            vector_index,
            registry,
            config_store,
        }
    }

    /// Indexes one document synchronously. Callers decide whether to run
    /// this inline or from a background worker; on error the document is
    /// already marked `Failed` in the registry.
    pub async fn index_document(
        &self,
        document: &Document,
        payload: &[u8],
    ) -> Result<i32, IndexingError> {
        match self.run_indexing(document, payload).await {
            Ok(chunk_count) => {
                info!(
                    document_id = %document.id(),
                    chunks = chunk_count,
                    "document indexed"
                );
                Ok(chunk_count)
            }
            Err(e) => {
                error!(document_id = %document.id(), error = %e, "indexing failed");
                let failed = DocumentStatus::Failed(e.to_string());
                if let Err(update_err) = self
                    .registry
                    .update_status(document.id(), &failed, None, None)
                    .await
                {
                    error!(
                        document_id = %document.id(),
                        error = %update_err,
                        "failed to record FAILED status"
                    );
                }
                Err(e)
            }
        }
    }

    async fn run_indexing(
        &self,
        document: &Document,
        payload: &[u8],
    ) -> Result<i32, IndexingError> {
        let extracted = self
            .extractor
            .extract(payload, document.doc_type())
            .await
            .map_err(|e| IndexingError::ExtractionFailed(e.to_string()))?;

        let config = self.config_store.get().await;
        let chunker = TextChunker::new(config.chunk_size, config.chunk_overlap)
            .map_err(|e| IndexingError::InvalidConfig(e.to_string()))?;

        let chunks = self.build_chunks(document, &chunker, &extracted);
        if chunks.is_empty() {
            return Err(IndexingError::ExtractionFailed(
                "document produced no chunks".to_string(),
            ));
        }

        let records = self.embed_chunks(document, &chunks).await?;

        // The adapter splits this into bounded batches; a failing batch
        // surfaces by position and aborts the whole document.
        self.vector_index
            .upsert(&records)
            .await
            .map_err(|e| IndexingError::IndexFailed(e.to_string()))?;

        let chunk_count = chunks.len() as i32;
        self.registry
            .update_status(
                document.id(),
                &DocumentStatus::Indexed,
                Some(chunk_count),
                Some(Utc::now()),
            )
            .await
            .map_err(|e| IndexingError::RegistryFailed(e.to_string()))?;

        Ok(chunk_count)
    }

    /// Chunk page-by-page when the extractor reports page structure so each
    /// chunk keeps its page for source attribution; `chunk_index` stays
    /// contiguous from 0 across the whole document.
    fn build_chunks(
        &self,
        document: &Document,
        chunker: &TextChunker,
        extracted: &ExtractedText,
    ) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut chunk_index = 0;

        match &extracted.pages {
            Some(pages) => {
                for (page, page_text) in pages {
                    for piece in chunker.split(page_text) {
                        if piece.trim().is_empty() {
                            continue;
                        }
                        chunks.push(Chunk::new(document.id(), piece, chunk_index, Some(*page)));
                        chunk_index += 1;
                    }
                }
            }
            None => {
                for piece in chunker.split(&extracted.text) {
                    if piece.trim().is_empty() {
                        continue;
                    }
                    chunks.push(Chunk::new(document.id(), piece, chunk_index, None));
                    chunk_index += 1;
                }
            }
        }

        chunks
    }

    /// Embeddings are independent, so provider batches run concurrently;
    /// any batch failure aborts the whole document.
    async fn embed_chunks(
        &self,
        document: &Document,
        chunks: &[Chunk],
    ) -> Result<Vec<ChunkRecord>, IndexingError> {
        let batches: Vec<&[Chunk]> = chunks.chunks(EMBED_BATCH_SIZE).collect();

        let embeddings_per_batch = try_join_all(batches.iter().map(|chunk_batch| {
            let texts: Vec<String> = chunk_batch
                .iter()
                .map(|chunk| chunk.content().to_string())
                .collect();
            let provider = self.embedding_provider.clone();
            async move { provider.embed_batch(&texts).await }
        }))
        .await
        .map_err(|e| IndexingError::EmbeddingFailed(e.to_string()))?;

        let mut records = Vec::with_capacity(chunks.len());
        for (chunk_batch, embeddings) in batches.iter().zip(embeddings_per_batch) {
            if embeddings.len() != chunk_batch.len() {
                return Err(IndexingError::EmbeddingFailed(format!(
                    "provider returned {} embeddings for {} texts",
                    embeddings.len(),
                    chunk_batch.len()
                )));
            }

            for (chunk, embedding) in chunk_batch.iter().zip(embeddings) {
                records.push(ChunkRecord {
                    id: chunk.id(),
                    document_id: chunk.document_id(),
                    content: chunk.content().to_string(),
                    embedding,
                    metadata: chunk.metadata(document.name()),
                });
            }
        }

        Ok(records)
    }

    /// Deletes a document everywhere. Vectors go first, then the registry
    /// row: a crash in between leaves a visible (retryable) registry entry
    /// instead of unfindable orphan vectors.
    pub async fn delete_document(&self, id: Uuid) -> Result<(), IndexingError> {
        let document = self
            .registry
            .get(id)
            .await
            .map_err(|e| IndexingError::RegistryFailed(e.to_string()))?
            .ok_or(IndexingError::DocumentNotFound(id))?;

        let removed = self
            .vector_index
            .delete_by_document(id)
            .await
            .map_err(|e| IndexingError::IndexFailed(e.to_string()))?;

        let deleted = self.registry.delete(id).await.map_err(|e| {
            IndexingError::Inconsistency(format!(
                "vectors for document {} were removed but the registry row was not: {}",
                id, e
            ))
        })?;
        if !deleted {
            return Err(IndexingError::Inconsistency(format!(
                "vectors for document {} were removed but no registry row was deleted",
                id
            )));
        }

        info!(
            document_id = %id,
            document_name = document.name(),
            vectors_removed = removed,
            "document deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::test_support::{
        FailingEmbedder, InMemoryIndex, InMemoryRegistry, StaticExtractor, StubEmbedder,
    };
    use crate::domain::value_objects::DocumentType;

    fn service_with(
        extractor: Arc<dyn TextExtractor>,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<InMemoryIndex>,
        registry: Arc<InMemoryRegistry>,
    ) -> IndexingService {
        IndexingService::new(
            extractor,
            embedder,
            index,
            registry,
            Arc::new(ConfigStore::default()),
        )
    }

    #[tokio::test]
    async fn test_successful_indexing_marks_document_indexed() {
        let registry = Arc::new(InMemoryRegistry::new());
        let index = Arc::new(InMemoryIndex::new());
        let document = Document::new("note.txt".to_string(), DocumentType::Txt, 3000);
        registry.create(&document).await.unwrap();

        let service = service_with(
            Arc::new(StaticExtractor::flat("a".repeat(3000))),
            Arc::new(StubEmbedder::new(8)),
            index.clone(),
            registry.clone(),
        );

        let chunk_count = service.index_document(&document, b"ignored").await.unwrap();

        // 3000 chars at size 1000 / overlap 200 -> 4 chunks.
        assert_eq!(chunk_count, 4);

        let stored = registry.get(document.id()).await.unwrap().unwrap();
        assert!(stored.is_indexed());
        assert_eq!(stored.chunk_count(), 4);
        assert!(stored.indexed_at().is_some());
        assert_eq!(index.total_chunks().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_embedding_failure_marks_document_failed() {
        let registry = Arc::new(InMemoryRegistry::new());
        let index = Arc::new(InMemoryIndex::new());
        let document = Document::new("note.txt".to_string(), DocumentType::Txt, 100);
        registry.create(&document).await.unwrap();

        let service = service_with(
            Arc::new(StaticExtractor::flat("some text".to_string())),
            Arc::new(FailingEmbedder),
            index.clone(),
            registry.clone(),
        );

        let result = service.index_document(&document, b"ignored").await;
        assert!(matches!(result, Err(IndexingError::EmbeddingFailed(_))));

        let stored = registry.get(document.id()).await.unwrap().unwrap();
        assert!(stored.status().is_failed());
        // Nothing was persisted to the index.
        assert_eq!(index.total_chunks().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_paged_extraction_tags_pages_and_keeps_index_contiguous() {
        let registry = Arc::new(InMemoryRegistry::new());
        let index = Arc::new(InMemoryIndex::new());
        let document = Document::new("paged.pdf".to_string(), DocumentType::Pdf, 100);
        registry.create(&document).await.unwrap();

        let service = service_with(
            Arc::new(StaticExtractor::paged(vec![
                (1, "first page text".to_string()),
                (2, "second page text".to_string()),
            ])),
            Arc::new(StubEmbedder::new(8)),
            index.clone(),
            registry.clone(),
        );

        service.index_document(&document, b"ignored").await.unwrap();

        let records = index.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].metadata["page"], 1);
        assert_eq!(records[1].metadata["page"], 2);
        assert_eq!(records[0].metadata["chunk_index"], 0);
        assert_eq!(records[1].metadata["chunk_index"], 1);
    }

    #[tokio::test]
    async fn test_delete_removes_vectors_then_registry_row() {
        let registry = Arc::new(InMemoryRegistry::new());
        let index = Arc::new(InMemoryIndex::new());
        let document = Document::new("note.txt".to_string(), DocumentType::Txt, 100);
        registry.create(&document).await.unwrap();

        let embedder = Arc::new(StubEmbedder::new(8));
        let service = service_with(
            Arc::new(StaticExtractor::flat("deletable text".to_string())),
            embedder.clone(),
            index.clone(),
            registry.clone(),
        );

        service.index_document(&document, b"ignored").await.unwrap();
        assert!(index.total_chunks().await.unwrap() > 0);

        service.delete_document(document.id()).await.unwrap();

        assert!(registry.get(document.id()).await.unwrap().is_none());
        assert_eq!(index.total_chunks().await.unwrap(), 0);

        // A query that previously matched finds nothing once the document
        // is gone.
        let query = embedder.embed("deletable text").await.unwrap();
        let hits = index.search(&query, 10, 0.0).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_chunking_config_change_applies_to_new_documents_only() {
        let registry = Arc::new(InMemoryRegistry::new());
        let index = Arc::new(InMemoryIndex::new());
        let config_store = Arc::new(ConfigStore::default());
        let service = IndexingService::new(
            Arc::new(StaticExtractor::flat("a".repeat(3000))),
            Arc::new(StubEmbedder::new(8)),
            index.clone(),
            registry.clone(),
            config_store.clone(),
        );

        let first = Document::new("first.txt".to_string(), DocumentType::Txt, 3000);
        registry.create(&first).await.unwrap();
        let first_chunks = service.index_document(&first, b"ignored").await.unwrap();
        assert_eq!(first_chunks, 4);

        config_store
            .update(crate::domain::value_objects::ConfigUpdate {
                chunk_size: Some(500),
                chunk_overlap: Some(100),
                ..Default::default()
            })
            .await
            .unwrap();

        let second = Document::new("second.txt".to_string(), DocumentType::Txt, 3000);
        registry.create(&second).await.unwrap();
        let second_chunks = service.index_document(&second, b"ignored").await.unwrap();

        // 3000 chars at 500/100: 400 new characters per continuation chunk.
        assert_eq!(second_chunks, 8);

        // The already indexed document keeps its old chunk count.
        let stored_first = registry.get(first.id()).await.unwrap().unwrap();
        assert_eq!(stored_first.chunk_count(), 4);
    }

    #[tokio::test]
    async fn test_delete_unknown_document_is_not_found() {
        let registry = Arc::new(InMemoryRegistry::new());
        let index = Arc::new(InMemoryIndex::new());

        let service = service_with(
            Arc::new(StaticExtractor::flat("text".to_string())),
            Arc::new(StubEmbedder::new(8)),
            index,
            registry,
        );

        let result = service.delete_document(Uuid::new_v4()).await;
        assert!(matches!(result, Err(IndexingError::DocumentNotFound(_))));
    }
}
