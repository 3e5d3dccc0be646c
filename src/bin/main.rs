use financial_advisor_bot::session::ChatSession;
use tracing::info;
use uuid::Uuid;

/// Scripted demo conversation covering every topic the bot handles.
fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Financial advisor chatbot demo starting");

    let mut session = ChatSession::new(Uuid::new_v4());

    if let Some(welcome) = session.messages().next() {
        println!("Bot:  {}\n", welcome.text);
    }

    let script = [
        "Hello!",
        "Help me create a budget",
        "I make $5,000 per month",
        "help me budget",
        "I'm 30 years old, help me plan for retirement",
        "do I need an emergency fund?",
        "I have $5000 in credit card debt",
        "how should I invest?",
    ];

    for text in script {
        println!("User: {}", text);
        let reply = session.submit(text);
        println!("Bot:  {}\n", reply.text);
    }

    info!(
        messages = session.message_count(),
        state = %session.context().conversation_state,
        "demo conversation complete"
    );
}
