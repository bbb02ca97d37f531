use std::env;
use std::sync::Arc;

use crate::{
    application::{
        ports::{
            AnswerGenerator, DocumentRegistry, EmbeddingProvider, IndexingQueue, TextExtractor,
            VectorIndex,
        },
        services::{AnswerService, ConfigStore, IndexingService},
        use_cases::{
            AnswerQuestionUseCase, DeleteDocumentUseCase, GetDocumentUseCase, GetStatsUseCase,
            ListDocumentsUseCase, SearchChunksUseCase, SubmitDocumentUseCase,
        },
    },
    domain::value_objects::RagConfig,
    infrastructure::{
        database::{
            create_connection_pool, get_connection_from_pool,
            repositories::{PgVectorIndex, PostgresDocumentRegistry},
            run_migrations,
        },
        external_services::{CompositeExtractor, OpenAiChatGenerator, OpenAiEmbeddingProvider},
        messaging::{BackgroundIndexer, MpscIndexingQueue},
    },
    presentation::http::handlers::{ChatHandler, ConfigHandler, DocumentHandler},
};

pub struct AppContainer {
    // Shared state
    pub config_store: Arc<ConfigStore>,

    // Ports
    pub registry: Arc<dyn DocumentRegistry>,
    pub vector_index: Arc<dyn VectorIndex>,
    pub embedding_provider: Arc<dyn EmbeddingProvider>,
    pub answer_generator: Arc<dyn AnswerGenerator>,
    pub text_extractor: Arc<dyn TextExtractor>,
    pub indexing_queue: Arc<dyn IndexingQueue>,

    // Services
    pub indexing_service: Arc<IndexingService>,
    pub answer_service: Arc<AnswerService>,
    pub background_indexer: Arc<BackgroundIndexer>,

    // Use cases
    pub submit_document_use_case: Arc<SubmitDocumentUseCase>,
    pub answer_question_use_case: Arc<AnswerQuestionUseCase>,
    pub search_chunks_use_case: Arc<SearchChunksUseCase>,
    pub list_documents_use_case: Arc<ListDocumentsUseCase>,
    pub get_document_use_case: Arc<GetDocumentUseCase>,
    pub delete_document_use_case: Arc<DeleteDocumentUseCase>,
    pub get_stats_use_case: Arc<GetStatsUseCase>,

    // HTTP handlers
    pub chat_handler: Arc<ChatHandler>,
    pub document_handler: Arc<DocumentHandler>,
    pub config_handler: Arc<ConfigHandler>,
}

impl AppContainer {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let db_pool = create_connection_pool()?;
        {
            let mut conn = get_connection_from_pool(&db_pool)?;
            run_migrations(&mut conn)?;
        }

        let config_store = Arc::new(ConfigStore::new(initial_config_from_env())?);

        let registry: Arc<dyn DocumentRegistry> =
            Arc::new(PostgresDocumentRegistry::new(db_pool.clone()));

        let embedding_provider: Arc<dyn EmbeddingProvider> =
            Arc::new(OpenAiEmbeddingProvider::from_env()?);

        let vector_index: Arc<dyn VectorIndex> = Arc::new(PgVectorIndex::new(
            db_pool,
            embedding_provider.dimension(),
        ));

        let answer_generator: Arc<dyn AnswerGenerator> =
            Arc::new(OpenAiChatGenerator::from_env()?);

        let text_extractor: Arc<dyn TextExtractor> = Arc::new(CompositeExtractor::new());

        let indexing_service = Arc::new(IndexingService::new(
            text_extractor.clone(),
            embedding_provider.clone(),
            vector_index.clone(),
            registry.clone(),
            config_store.clone(),
        ));

        let answer_service = Arc::new(AnswerService::new(
            embedding_provider.clone(),
            vector_index.clone(),
            answer_generator.clone(),
            config_store.clone(),
        ));

        let (indexing_queue, job_receiver) = MpscIndexingQueue::create_pair();
        let indexing_queue: Arc<dyn IndexingQueue> = Arc::new(indexing_queue);

        let background_indexer = Arc::new(
            BackgroundIndexer::new(
                Arc::new(job_receiver),
                registry.clone(),
                indexing_service.clone(),
            )
            .with_worker_count(worker_count_from_env()),
        );

        let submit_document_use_case = Arc::new(SubmitDocumentUseCase::new(
            registry.clone(),
            indexing_queue.clone(),
        ));
        let answer_question_use_case =
            Arc::new(AnswerQuestionUseCase::new(answer_service.clone()));
        let search_chunks_use_case = Arc::new(SearchChunksUseCase::new(
            embedding_provider.clone(),
            vector_index.clone(),
            config_store.clone(),
        ));
        let list_documents_use_case = Arc::new(ListDocumentsUseCase::new(registry.clone()));
        let get_document_use_case = Arc::new(GetDocumentUseCase::new(registry.clone()));
        let delete_document_use_case =
            Arc::new(DeleteDocumentUseCase::new(indexing_service.clone()));
        let get_stats_use_case = Arc::new(GetStatsUseCase::new(
            registry.clone(),
            vector_index.clone(),
            config_store.clone(),
        ));

        let chat_handler = Arc::new(ChatHandler::new(
            answer_question_use_case.clone(),
            search_chunks_use_case.clone(),
        ));
        let document_handler = Arc::new(DocumentHandler::new(
            submit_document_use_case.clone(),
            list_documents_use_case.clone(),
            get_document_use_case.clone(),
            delete_document_use_case.clone(),
        ));
        let config_handler = Arc::new(ConfigHandler::new(
            config_store.clone(),
            get_stats_use_case.clone(),
        ));

        Ok(Self {
            config_store,
            registry,
            vector_index,
            embedding_provider,
            answer_generator,
            text_extractor,
            indexing_queue,
            indexing_service,
            answer_service,
            background_indexer,
            submit_document_use_case,
            answer_question_use_case,
            search_chunks_use_case,
            list_documents_use_case,
            get_document_use_case,
            delete_document_use_case,
            get_stats_use_case,
            chat_handler,
            document_handler,
            config_handler,
        })
    }
}

fn initial_config_from_env() -> RagConfig {
    let defaults = RagConfig::default();
    RagConfig {
        model: env::var("OPENAI_CHAT_MODEL").unwrap_or(defaults.model),
        chunk_size: parse_env("CHUNK_SIZE", defaults.chunk_size),
        chunk_overlap: parse_env("CHUNK_OVERLAP", defaults.chunk_overlap),
        top_k: parse_env("TOP_K", defaults.top_k),
        similarity_threshold: parse_env("SIMILARITY_THRESHOLD", defaults.similarity_threshold),
    }
}

fn worker_count_from_env() -> usize {
    parse_env("INDEXING_WORKERS", 3)
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}
