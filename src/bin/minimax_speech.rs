//! minimax-speech — MiniMax 语音接口命令行工具
//!
//! Usage:
//!   minimax-speech t2a <text> [--output <file>] [--wav]   Synthesize speech
//!   minimax-speech voices [--type <voice_type>]           List voices
//!   minimax-speech languages                              List language boost values
//!   minimax-speech upload <file> [--purpose <purpose>]    Upload an audio file
//!   minimax-speech clone <file_id> <voice_id>             Clone a voice
//!   minimax-speech delete <voice_id> [--type <type>]      Delete a custom voice
//!
//! Credentials come from `--api-key` / `--group-id` or from
//! `MINIMAX_API_KEY` / `MINIMAX_GROUP_ID`. Logging honours `RUST_LOG`.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use minimax_speech::types::{
    AudioFormat, Bitrate, DeleteVoiceType, Emotion, FileId, Language, Model, SampleRate,
    VoiceType, DEFAULT_UPLOAD_PURPOSE,
};
use minimax_speech::{ClientConfigBuilder, CloneOptions, MiniMaxSpeech, SpeechOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// MiniMax speech command line client
#[derive(Parser, Debug)]
#[command(name = "minimax-speech")]
#[command(version, about, long_about = None)]
struct Cli {
    /// API key (overrides MINIMAX_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Group id (overrides MINIMAX_GROUP_ID)
    #[arg(long, global = true)]
    group_id: Option<String>,

    /// Per-attempt timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    /// Retries for transient failures
    #[arg(long, global = true, default_value_t = 3)]
    max_retries: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert text to speech
    T2a {
        text: String,

        #[arg(long, default_value = "Wise_Woman")]
        voice_id: String,

        #[arg(long, default_value = "speech-02-hd")]
        model: Model,

        /// Output file (defaults to output.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long, default_value_t = 1.0)]
        speed: f64,

        #[arg(long, default_value_t = 1.0)]
        volume: f64,

        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        pitch: i32,

        #[arg(long)]
        emotion: Option<Emotion>,

        #[arg(long, default_value = "mp3")]
        format: AudioFormat,

        #[arg(long, default_value_t = 32000)]
        sample_rate: u32,

        #[arg(long, default_value_t = 128000)]
        bitrate: u32,

        #[arg(long)]
        language_boost: Option<Language>,

        /// Wrap PCM output in a WAV container
        #[arg(long)]
        wav: bool,
    },

    /// List available voices
    Voices {
        #[arg(long = "type", default_value = "all")]
        voice_type: VoiceType,
    },

    /// List supported language boost values
    Languages,

    /// Upload an audio file
    Upload {
        file: PathBuf,

        #[arg(long, default_value = DEFAULT_UPLOAD_PURPOSE)]
        purpose: String,
    },

    /// Clone a voice from an uploaded file
    Clone {
        file_id: FileId,
        voice_id: String,

        /// Preview text synthesized with the new voice
        #[arg(long)]
        text: Option<String>,

        /// Model used for the preview
        #[arg(long)]
        model: Option<Model>,

        #[arg(long, default_value_t = 0.7)]
        accuracy: f64,

        #[arg(long)]
        noise_reduction: bool,

        #[arg(long)]
        volume_normalization: bool,
    },

    /// Delete a cloned or generated voice
    Delete {
        voice_id: String,

        #[arg(long = "type", default_value = "voice_cloning")]
        voice_type: DeleteVoiceType,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Languages = cli.command {
        for language in Language::ALL {
            println!("{:<12} {}", language.as_str(), language.display_name());
        }
        return Ok(());
    }

    let mut builder = ClientConfigBuilder::from_env()
        .timeout(std::time::Duration::from_secs(cli.timeout))
        .max_retries(cli.max_retries);
    if let Some(key) = cli.api_key {
        builder = builder.api_key(key);
    }
    if let Some(group) = cli.group_id {
        builder = builder.group_id(group);
    }
    let client = MiniMaxSpeech::new(builder.build()?)?;

    match cli.command {
        Commands::T2a {
            text,
            voice_id,
            model,
            output,
            speed,
            volume,
            pitch,
            emotion,
            format,
            sample_rate,
            bitrate,
            language_boost,
            wav,
        } => {
            if wav && format != AudioFormat::Pcm {
                bail!("--wav requires --format pcm");
            }
            let mut options = SpeechOptions::new()
                .voice(voice_id)
                .model(model)
                .speed(speed)
                .volume(volume)
                .pitch(pitch)
                .format(format)
                .sample_rate(SampleRate::try_from(sample_rate)?)
                .bitrate(Bitrate::try_from(bitrate)?);
            if let Some(emotion) = emotion {
                options = options.emotion(emotion);
            }
            if let Some(language) = language_boost {
                options = options.language_boost(language);
            }

            let audio = client.text_to_speech_simple(&text, &options)?;
            let (bytes, extension) = if wav {
                (audio.to_wav()?, "wav")
            } else {
                (audio.audio.clone(), format.extension())
            };
            let path = output.unwrap_or_else(|| PathBuf::from(format!("output.{}", extension)));
            std::fs::write(&path, &bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;

            println!("Saved {} bytes to {}", bytes.len(), path.display());
            if let Some(duration) = audio.duration {
                println!("Duration: {:.2}s", duration.as_secs_f64());
            }
        }
        Commands::Voices { voice_type } => {
            let listing = client.get_voice(voice_type)?;
            let voices = listing.voices();
            if voices.is_empty() {
                println!("No voices found");
            }
            for voice in voices {
                println!(
                    "{:<16} {:<32} {:<24} {}",
                    voice.category.as_str(),
                    voice.id,
                    voice.name.as_deref().unwrap_or("-"),
                    voice.created_time.as_deref().unwrap_or("")
                );
            }
        }
        Commands::Upload { file, purpose } => {
            let uploaded = client.file_upload(&file, &purpose)?;
            println!(
                "Uploaded {} ({} bytes), file_id: {}",
                uploaded.filename, uploaded.bytes, uploaded.file_id
            );
        }
        Commands::Clone {
            file_id,
            voice_id,
            text,
            model,
            accuracy,
            noise_reduction,
            volume_normalization,
        } => {
            let mut options = CloneOptions::new()
                .accuracy(accuracy)
                .noise_reduction(noise_reduction)
                .volume_normalization(volume_normalization);
            options.text = text;
            options.model = model;

            let response = client.voice_clone_simple(file_id, &voice_id, &options)?;
            println!("Voice '{}' cloned", voice_id);
            if response.input_sensitive {
                println!("Warning: the source audio was flagged as sensitive");
            }
            if let Some(url) = response.demo_audio {
                println!("Preview: {}", url);
            }
        }
        Commands::Delete {
            voice_id,
            voice_type,
        } => {
            let response = client.voice_delete(&voice_id, voice_type)?;
            println!("Deleted voice '{}'", response.voice_id);
        }
        Commands::Languages => {}
    }

    Ok(())
}
