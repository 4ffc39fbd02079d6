use std::io::Write;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use chat_stream_client::{ChatClient, ChatTurnRequest, ClientConfig, TurnOutcome};

#[derive(Parser)]
#[command(
    name = "chat-stream-client",
    about = "Send a chat message and stream the reply to stdout"
)]
struct Args {
    /// Message to send
    message: String,

    /// Continue an existing conversation
    #[arg(short, long)]
    conversation: Option<String>,

    /// Path to a TOML config file; defaults to environment configuration
    #[arg(short = 'f', long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    if args.message.trim().is_empty() {
        anyhow::bail!("Message must not be blank");
    }

    let config = match &args.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::from_env()?,
    };

    let client = ChatClient::new(config)?;

    let mut request = ChatTurnRequest::new(args.message);
    if let Some(id) = args.conversation {
        request = request.with_conversation(id);
    }

    let outcome = client
        .send_message(
            &request,
            |token| {
                print!("{}", token);
                let _ = std::io::stdout().flush();
            },
            |err| eprintln!("\nerror: {}", err),
            |_| {},
        )
        .await;

    match outcome {
        TurnOutcome::Completed {
            conversation_id, ..
        } => {
            println!();
            if let Some(id) = conversation_id {
                eprintln!("conversation: {}", id);
            }
            Ok(())
        }
        TurnOutcome::Failed { cause } => Err(cause.into()),
    }
}
