//! Slotify - conversational scheduling assistant
//!
//! Interactive chat loop over stdin/stdout.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use slotify_app::AppContext;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging first so .env loading is visible
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match dotenvy::dotenv() {
        Ok(path) => tracing::info!("Loaded .env from: {:?}", path),
        Err(e) => tracing::debug!("Could not load .env file: {}", e),
    }

    let context = AppContext::new().context("failed to initialize application context")?;

    println!("Slotify scheduling assistant. Type a request, or 'exit' to quit.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        match context.process_message(input).await {
            Ok(reply) => println!("{}", reply.text),
            Err(err) => {
                tracing::error!(error = %err, "message processing failed");
                println!("Sorry, I encountered an error: {}. Please try again.", err);
            }
        }
    }

    Ok(())
}
