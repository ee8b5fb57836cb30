//! Basic usage example (blocking client)
//!
//! Synthesizes one sentence, lists the system voices and writes a 16 kHz
//! PCM rendition as a WAV file.
//!
//! Credentials are read from the environment:
//! - MINIMAX_API_KEY
//! - MINIMAX_GROUP_ID
//!
//! Usage:
//!   MINIMAX_API_KEY=... MINIMAX_GROUP_ID=... cargo run --example basic_usage

use minimax_speech::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = MiniMaxSpeech::from_env()?;

    let options = SpeechOptions::new()
        .voice(SystemVoice::CalmWoman.id())
        .emotion(Emotion::Happy)
        .speed(1.1);
    let audio = client.text_to_speech_simple("Hello! This is MiniMax speaking.", &options)?;
    std::fs::write("hello.mp3", &audio.audio)?;
    println!("hello.mp3: {} bytes", audio.len());
    if let Some(duration) = audio.duration {
        println!("duration: {:.2}s", duration.as_secs_f64());
    }

    println!("\nSystem voices:");
    for voice in client.system_voices()?.iter().take(10) {
        println!("  {:<28} {}", voice.voice_id, voice.voice_name);
    }

    let pcm = SpeechOptions::new()
        .format(AudioFormat::Pcm)
        .sample_rate(SampleRate::Hz16000);
    let audio = client.text_to_speech_simple("Raw PCM, wrapped as WAV.", &pcm)?;
    std::fs::write("hello.wav", audio.to_wav()?)?;
    println!("\nhello.wav written");

    Ok(())
}
