//! Voice cloning walkthrough
//!
//! Uploads a reference recording, clones it under a new voice id, speaks
//! with the clone and finally deletes it.
//!
//! Usage:
//!   MINIMAX_API_KEY=... MINIMAX_GROUP_ID=... \
//!     cargo run --example voice_clone -- reference.mp3 MyVoice001

use anyhow::Context;
use minimax_speech::prelude::*;
use minimax_speech::types::DEFAULT_UPLOAD_PURPOSE;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let file = args.next().context("usage: voice_clone <audio file> <voice id>")?;
    let voice_id = args.next().context("usage: voice_clone <audio file> <voice id>")?;

    let client = AsyncMiniMaxSpeech::from_env()?;

    let uploaded = client.file_upload(&file, DEFAULT_UPLOAD_PURPOSE).await?;
    println!("uploaded {} as file {}", uploaded.filename, uploaded.file_id);

    let options = CloneOptions::new()
        .noise_reduction(true)
        .preview("Nice to meet you.", Model::Speech02Hd);
    let cloned = client
        .voice_clone_simple(uploaded.file_id, &voice_id, &options)
        .await?;
    if cloned.input_sensitive {
        println!("warning: the reference audio was flagged as sensitive");
    }
    if let Some(url) = &cloned.demo_audio {
        println!("preview: {url}");
    }

    let audio = client
        .text_to_speech_simple(
            "This sentence is spoken with the cloned voice.",
            &SpeechOptions::new().voice(voice_id.as_str()),
        )
        .await?;
    std::fs::write("cloned.mp3", &audio.audio)?;
    println!("cloned.mp3: {} bytes", audio.len());

    client
        .voice_delete(&voice_id, DeleteVoiceType::VoiceCloning)
        .await?;
    println!("deleted {voice_id}");

    Ok(())
}
