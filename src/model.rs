use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub(crate) const SAVE_VERSION: u32 = 1;

/// Stored mood of a monster. The sprite core consumes it read-only each
/// frame; the shell owns writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Mood {
    #[default]
    Happy,
    Sad,
    Angry,
    Hungry,
    Sleepy,
    #[serde(other)]
    Unknown,
}

impl Mood {
    pub(crate) const ALL: [Mood; 5] =
        [Mood::Happy, Mood::Sad, Mood::Angry, Mood::Hungry, Mood::Sleepy];

    /// Maps an out-of-set stored value back to the default mood.
    pub(crate) fn normalize(self) -> Mood {
        match self {
            Mood::Unknown => Mood::default(),
            m => m,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Hungry => "hungry",
            Mood::Sleepy => "sleepy",
            Mood::Unknown => "?",
        }
    }

    pub(crate) fn next(self) -> Mood {
        match self {
            Mood::Happy => Mood::Sad,
            Mood::Sad => Mood::Angry,
            Mood::Angry => Mood::Hungry,
            Mood::Hungry => Mood::Sleepy,
            Mood::Sleepy => Mood::Happy,
            Mood::Unknown => Mood::Happy,
        }
    }
}

/// A persisted monster record. `traits` is the opaque JSON payload
/// produced at adoption time; it crosses the storage boundary verbatim
/// and never changes after creation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct Monster {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) traits: String,
    pub(crate) mood: Mood,
    pub(crate) level: u32,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct SaveFile {
    pub(crate) version: u32,
    pub(crate) last_seen_utc: DateTime<Utc>,
    pub(crate) next_id: u64,
    pub(crate) monsters: Vec<Monster>,
}

impl SaveFile {
    pub(crate) fn empty() -> Self {
        Self {
            version: SAVE_VERSION,
            last_seen_utc: Utc::now(),
            next_id: 1,
            monsters: Vec::new(),
        }
    }

    pub(crate) fn create_monster(&mut self, name: &str, traits_payload: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let now = Utc::now();
        self.monsters.push(Monster {
            id,
            name: name.trim().to_string(),
            traits: traits_payload,
            mood: Mood::default(),
            level: 1,
            created_at: now,
            updated_at: now,
        });
        id
    }
}

/// Which screen the app is showing. Transient, never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Scene {
    Main,
    Adopt,
    Help,
}
