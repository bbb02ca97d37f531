use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::infrastructure::messaging::BackgroundIndexer;
use crate::presentation::http::{
    handlers::{ChatHandler, ConfigHandler, DocumentHandler},
    routes::{chat_routes, config_routes, document_routes},
};

pub struct HttpServer {
    chat_handler: Arc<ChatHandler>,
    document_handler: Arc<DocumentHandler>,
    config_handler: Arc<ConfigHandler>,
    background_indexer: Arc<BackgroundIndexer>,
    port: u16,
}

impl HttpServer {
    pub fn new(
        chat_handler: Arc<ChatHandler>,
        document_handler: Arc<DocumentHandler>,
        config_handler: Arc<ConfigHandler>,
        background_indexer: Arc<BackgroundIndexer>,
        port: Option<u16>,
    ) -> Self {
        Self {
            chat_handler,
            document_handler,
            config_handler,
            background_indexer,
            port: port.unwrap_or(8000),
        }
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let background_indexer = self.background_indexer.clone();
        tokio::spawn(async move {
            background_indexer.start().await;
        });

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = Router::new()
            .merge(chat_routes(self.chat_handler))
            .merge(document_routes(self.document_handler))
            .merge(config_routes(self.config_handler))
            .layer(cors)
            .layer(RequestBodyLimitLayer::new(50 * 1024 * 1024)) // 50MB uploads
            .layer(TraceLayer::new_for_http());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!(%addr, "knowrag listening");

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
