use std::sync::Arc;

use futures::StreamExt;
use futures::stream;
use tokio::io::{AsyncBufReadExt, BufReader};

use scholarship_agent::config::AgentConfig;
use scholarship_agent::session::{Session, SubmitOutcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AgentConfig::default();
    eprintln!("🎓 Scholarship Agent v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Type a message and press Enter. /quit to exit.\n");

    let session = Arc::new(Session::new(config));

    // Print the seeded welcome message
    if let Some(welcome) = session.snapshot().await.messages.first() {
        println!("{}\n", welcome.text);
    }

    // Feed stdin lines through a channel, like the CLI channel loop
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    tokio::spawn(async move {
        let stdin = tokio::io::stdin();
        let reader = BufReader::new(stdin);
        let mut lines = reader.lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Ok(None) => break, // EOF
                Err(e) => {
                    tracing::error!("Error reading stdin: {}", e);
                    break;
                }
            }
        }
    });

    let mut lines = Box::pin(stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|line| (line, rx))
    }));

    eprint!("> ");
    while let Some(line) = lines.next().await {
        let trimmed = line.trim();
        if trimmed == "/quit" || trimmed == "/exit" {
            break;
        }

        match session.submit(&line).await {
            SubmitOutcome::Replied => {
                let snap = session.snapshot().await;
                if let Some(reply) = snap.messages.last() {
                    println!("\n{}\n", reply.text);
                }
                eprintln!(
                    "ℹ️  {} — profile {}%",
                    snap.stage.label(),
                    snap.progress_percent
                );
            }
            SubmitOutcome::IgnoredEmpty => {}
            SubmitOutcome::RejectedBusy => {
                eprintln!("⏳ Still thinking — one message at a time.");
            }
            SubmitOutcome::Cancelled => break,
        }
        eprint!("> ");
    }

    session.close().await;
    Ok(())
}
