//! Async batch synthesis example
//!
//! Renders several lines with at most three requests in flight. Failed
//! lines are reported without aborting the rest of the batch.
//!
//! Usage:
//!   MINIMAX_API_KEY=... MINIMAX_GROUP_ID=... cargo run --example async_batch

use minimax_speech::prelude::*;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const LINES: [&str; 5] = [
    "The quick brown fox jumps over the lazy dog.",
    "Batch requests keep their input order.",
    "At most three requests are in flight at once.",
    "Transient failures are retried automatically.",
    "A failed line does not stop the others.",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ClientConfigBuilder::from_env()
        .retry_policy(RetryPolicy::default().with_backoff(Backoff::Exponential))
        .build()?;
    let client = AsyncMiniMaxSpeech::new(config)?;

    let options = SpeechOptions::new().voice(SystemVoice::DeepVoiceMan.id());
    let requests = LINES
        .iter()
        .map(|line| options.to_request(*line))
        .collect::<minimax_speech::Result<Vec<_>>>()?;

    let started = Instant::now();
    let results = client.batch_text_to_speech(&requests, 3).await;
    println!("batch finished in {:.2}s", started.elapsed().as_secs_f64());

    for (idx, result) in results.into_iter().enumerate() {
        match result.and_then(|resp| resp.audio_bytes()) {
            Ok(audio) => {
                let path = format!("line_{}.mp3", idx + 1);
                tokio::fs::write(&path, &audio).await?;
                println!("  {path}: {} bytes", audio.len());
            }
            Err(err) => println!("  line {} failed: {err}", idx + 1),
        }
    }

    Ok(())
}
