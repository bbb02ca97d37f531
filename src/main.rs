mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::env;

use infrastructure::AppContainer;
use presentation::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let container = AppContainer::new().await?;

    let port = env::var("PORT").ok().and_then(|raw| raw.parse().ok());

    let server = HttpServer::new(
        container.chat_handler.clone(),
        container.document_handler.clone(),
        container.config_handler.clone(),
        container.background_indexer.clone(),
        port,
    );

    server.run().await
}
