//! Voice listing types (`/get_voice`).

use super::common::BaseResp;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which voice list to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceType {
    System,
    VoiceCloning,
    VoiceGeneration,
    MusicGeneration,
    #[default]
    All,
}

impl VoiceType {
    pub const ALL: [VoiceType; 5] = [
        VoiceType::System,
        VoiceType::VoiceCloning,
        VoiceType::VoiceGeneration,
        VoiceType::MusicGeneration,
        VoiceType::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::VoiceCloning => "voice_cloning",
            Self::VoiceGeneration => "voice_generation",
            Self::MusicGeneration => "music_generation",
            Self::All => "all",
        }
    }
}

impl fmt::Display for VoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoiceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        VoiceType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                Error::validation(
                    "voice_type",
                    format!("unsupported voice type '{}'", s),
                    "system, voice_cloning, voice_generation, music_generation, all",
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSlot {
    pub voice_id: String,
    pub voice_name: String,
    #[serde(default)]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemVoiceInfo {
    pub voice_id: String,
    pub voice_name: String,
    #[serde(default)]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClonedVoice {
    pub voice_id: String,
    #[serde(default)]
    pub description: Vec<String>,
    /// yyyy-mm-dd
    pub created_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedVoice {
    pub voice_id: String,
    #[serde(default)]
    pub description: Vec<String>,
    pub created_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicVoice {
    pub voice_id: String,
    pub instrumental_id: String,
    pub created_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoiceListResponse {
    #[serde(default)]
    pub voice_slots: Option<Vec<VoiceSlot>>,
    #[serde(default)]
    pub system_voice: Option<Vec<SystemVoiceInfo>>,
    #[serde(default)]
    pub voice_cloning: Option<Vec<ClonedVoice>>,
    #[serde(default)]
    pub voice_generation: Option<Vec<GeneratedVoice>>,
    #[serde(default)]
    pub music_generation: Option<Vec<MusicVoice>>,
    pub base_resp: BaseResp,
}

/// Category tag of a flattened [`Voice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceCategory {
    Slot,
    System,
    Cloned,
    Generated,
    Music,
}

impl VoiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slot => "voice_slot",
            Self::System => "system",
            Self::Cloned => "voice_cloning",
            Self::Generated => "voice_generation",
            Self::Music => "music_generation",
        }
    }
}

/// Flattened, category-tagged view of any listed voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub id: String,
    /// Display name; only system voices and slots have one.
    pub name: Option<String>,
    pub description: Vec<String>,
    /// Creation date; only user-created voices have one.
    pub created_time: Option<String>,
    pub category: VoiceCategory,
}

impl VoiceListResponse {
    /// Every listed voice, in the order slots, system, cloned, generated, music.
    pub fn voices(&self) -> Vec<Voice> {
        let mut out = Vec::new();
        for v in self.voice_slots.iter().flatten() {
            out.push(Voice {
                id: v.voice_id.clone(),
                name: Some(v.voice_name.clone()),
                description: v.description.clone(),
                created_time: None,
                category: VoiceCategory::Slot,
            });
        }
        for v in self.system_voice.iter().flatten() {
            out.push(Voice {
                id: v.voice_id.clone(),
                name: Some(v.voice_name.clone()),
                description: v.description.clone(),
                created_time: None,
                category: VoiceCategory::System,
            });
        }
        for v in self.voice_cloning.iter().flatten() {
            out.push(Voice {
                id: v.voice_id.clone(),
                name: None,
                description: v.description.clone(),
                created_time: Some(v.created_time.clone()),
                category: VoiceCategory::Cloned,
            });
        }
        for v in self.voice_generation.iter().flatten() {
            out.push(Voice {
                id: v.voice_id.clone(),
                name: None,
                description: v.description.clone(),
                created_time: Some(v.created_time.clone()),
                category: VoiceCategory::Generated,
            });
        }
        for v in self.music_generation.iter().flatten() {
            out.push(Voice {
                id: v.voice_id.clone(),
                name: None,
                description: vec![format!("instrumental: {}", v.instrumental_id)],
                created_time: Some(v.created_time.clone()),
                category: VoiceCategory::Music,
            });
        }
        out
    }

    pub fn find(&self, voice_id: &str) -> Option<Voice> {
        self.voices().into_iter().find(|v| v.id == voice_id)
    }
}
