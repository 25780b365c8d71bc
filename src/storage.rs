use crate::config::atomic_rename;
use crate::model::SaveFile;
use anyhow::Result;
use chrono::Utc;
use std::{fs, path::Path};

/// Loads the monster collection, or starts an empty one when the file
/// is missing or unreadable.
pub(crate) fn load_or_init(path: &Path) -> Result<SaveFile> {
    if let Ok(s) = fs::read_to_string(path) {
        if let Ok(save) = serde_json::from_str::<SaveFile>(&s) {
            return Ok(save);
        }
    }
    Ok(SaveFile::empty())
}

pub(crate) fn save_atomic(path: &Path, save: &mut SaveFile) -> Result<()> {
    save.last_seen_utc = Utc::now();
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(save)?;
    fs::write(&tmp, data)?;
    atomic_rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mood;
    use crate::traits::Traits;

    #[test]
    fn save_and_reload_round_trips_the_collection() {
        let dir = std::env::temp_dir().join(format!("pixmon-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("monsters.json");

        let mut save = SaveFile::empty();
        let traits = Traits::generate();
        let id = save.create_monster("Mochi", traits.to_payload());
        save.monsters[0].mood = Mood::Sleepy;
        save_atomic(&path, &mut save).unwrap();

        let loaded = load_or_init(&path).unwrap();
        let m = loaded.monsters.iter().find(|m| m.id == id).unwrap();
        assert_eq!(m.name, "Mochi");
        assert_eq!(m.mood, Mood::Sleepy);
        // The opaque payload survives the round trip byte-for-byte.
        assert_eq!(m.traits, save.monsters[0].traits);
        assert_eq!(Traits::from_payload(&m.traits), Some(traits));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unreadable_save_falls_back_to_empty() {
        let dir = std::env::temp_dir().join(format!("pixmon-test-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("monsters.json");
        fs::write(&path, "{broken").unwrap();

        let loaded = load_or_init(&path).unwrap();
        assert!(loaded.monsters.is_empty());

        fs::remove_dir_all(&dir).ok();
    }
}
