use financial_advisor_bot::api::start_server;
use financial_advisor_bot::session::{InMemorySessionStore, NullSpeechSink};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let api_port: u16 = std::env::var("PORT")
        .or_else(|_| std::env::var("API_PORT"))
        .unwrap_or_else(|_| "8080".to_string())
        .parse()?;

    info!("Financial Advisor Chatbot - API Server");
    info!("Port: {}", api_port);

    let store = Arc::new(InMemorySessionStore::new());
    let speech = Arc::new(NullSpeechSink);

    info!("Session store initialized (in-memory, session-scoped only)");

    start_server(store, speech, api_port).await?;

    Ok(())
}
