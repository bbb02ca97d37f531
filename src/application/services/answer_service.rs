use std::sync::Arc;

use tracing::{info, warn};

use crate::application::ports::answer_generator::GenerationRequest;
use crate::application::ports::vector_index::ScoredChunk;
use crate::application::ports::{AnswerGenerator, EmbeddingProvider, VectorIndex};
use crate::application::services::config_store::ConfigStore;
use crate::domain::entities::{QueryResult, SourceRef};

/// Fixed sampling parameters for answer generation.
const GENERATION_TEMPERATURE: f32 = 0.3;
const GENERATION_MAX_TOKENS: usize = 1000;

/// Separator between context blocks in the prompt.
const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Returned verbatim when nothing relevant clears the similarity threshold.
/// Not an error: the caller can distinguish it by `confidence == 0` and the
/// empty source list.
const NO_RELEVANT_INFORMATION: &str =
    "I could not find relevant information in the knowledge base for this question. \
     Please rephrase the question or contact support.";

/// One template, two substitution slots. The assistant answers only from
/// the provided context, stays in the configured language, never reveals
/// sensitive data, and always cites sources.
const PROMPT_TEMPLATE: &str = "\
You are the organization's knowledge-base assistant.

STRICT RULES:
1. Answer ONLY in the language the knowledge base is configured for
2. Base your answer ONLY on the context provided below
3. If the information is not in the context, say you could not find it and \
redirect the user to support
4. Be professional, warm and concise
5. NEVER reveal sensitive data (passwords, PIN codes, full account numbers)
6. Always cite your sources at the end of the answer

DOCUMENT CONTEXT:
{context}

USER QUESTION:
{question}

ANSWER:";

#[derive(Debug)]
pub enum PipelineError {
    EmbeddingFailed(String),
    RetrievalFailed(String),
    GenerationFailed(String),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::EmbeddingFailed(msg) => {
                write!(f, "Query embedding failed: {}", msg)
            }
            PipelineError::RetrievalFailed(msg) => write!(f, "Retrieval failed: {}", msg),
            PipelineError::GenerationFailed(msg) => write!(f, "Generation failed: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {}

/// The retrieval-answer pipeline. Stateless across queries: every call
/// re-reads the config, re-embeds the question and re-retrieves context, so
/// answers always reflect the current index.
pub struct AnswerService {
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_index: Arc<dyn VectorIndex>,
    generator: Arc<dyn AnswerGenerator>,
    config_store: Arc<ConfigStore>,
}

impl AnswerService {
    pub fn new(
        embedding_provider: Arc<dyn EmbeddingProvider>,
        vector_index: Arc<dyn VectorIndex>,
        generator: Arc<dyn AnswerGenerator>,
        config_store: Arc<ConfigStore>,
    ) -> Self {
        Self {
            embedding_provider,
            vector_index,
            generator,
            config_store,
        }
    }

    pub async fn answer(&self, question: &str) -> Result<QueryResult, PipelineError> {
        let config = self.config_store.get().await;

        let query_vector = self
            .embedding_provider
            .embed(question)
            .await
            .map_err(|e| PipelineError::EmbeddingFailed(e.to_string()))?;

        let hits = self
            .vector_index
            .search(&query_vector, config.top_k, config.similarity_threshold)
            .await
            .map_err(|e| PipelineError::RetrievalFailed(e.to_string()))?;

        // The index thresholds too; nothing below the threshold may reach
        // context assembly.
        let hits: Vec<ScoredChunk> = hits
            .into_iter()
            .filter(|hit| hit.score >= config.similarity_threshold)
            .collect();

        if hits.is_empty() {
            warn!(question = %truncate(question, 50), "no relevant chunks above threshold");
            return Ok(QueryResult::no_relevant_information(
                NO_RELEVANT_INFORMATION.to_string(),
            ));
        }

        // Highest-relevance material first; the source list keeps the same
        // order as the context blocks.
        let context = hits
            .iter()
            .map(|hit| format!("[Source: {}]\n{}", hit.document_name(), hit.content))
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);

        let system_prompt = PROMPT_TEMPLATE
            .replace("{context}", &context)
            .replace("{question}", question);

        let response = self
            .generator
            .generate(GenerationRequest {
                model: config.model.clone(),
                system_prompt,
                temperature: GENERATION_TEMPERATURE,
                max_tokens: GENERATION_MAX_TOKENS,
            })
            .await
            .map_err(|e| PipelineError::GenerationFailed(e.to_string()))?;

        let confidence =
            round3(hits.iter().map(|hit| hit.score).sum::<f32>() / hits.len() as f32);

        let sources: Vec<SourceRef> = hits
            .iter()
            .map(|hit| SourceRef {
                document: hit.document_name().to_string(),
                page: hit.page(),
                score: round3(hit.score),
            })
            .collect();

        info!(
            question = %truncate(question, 50),
            confidence,
            sources = sources.len(),
            "query answered"
        );

        Ok(QueryResult::new(response, sources, confidence))
    }
}

fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
