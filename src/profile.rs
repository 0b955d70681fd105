use color_eyre::Result;
use color_eyre::eyre::eyre;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Schema version is part of the file name; an incompatible schema gets a
/// new file instead of a migration.
const PROFILE_FILE: &str = "profile-v1.json";

pub const MAX_RECENT_QUESTIONS: usize = 5;

/// What the assistant remembers about the user across sessions.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub name: Option<String>,
    pub recent_questions: Vec<String>,
}

impl Profile {
    /// Records a question at the front of the history, newest first,
    /// keeping at most `MAX_RECENT_QUESTIONS` entries.
    pub fn remember_question(&mut self, question: &str) {
        self.recent_questions.insert(0, question.to_string());
        self.recent_questions.truncate(MAX_RECENT_QUESTIONS);
    }
}

/// File-backed store for the profile. Loading is forgiving (a missing or
/// damaged file yields the default profile); saving overwrites in place.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store rooted at the platform data directory, created on demand.
    pub fn open_default() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "lumi")
            .ok_or_else(|| eyre!("Could not determine data directory"))?;
        let data_dir = dirs.data_dir();
        fs::create_dir_all(data_dir)?;
        Ok(Self::new(data_dir.join(PROFILE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored profile. Any failure (absent file, unreadable
    /// file, malformed JSON) falls back to the default profile so a bad
    /// disk state never blocks a chat session.
    pub fn load(&self) -> Profile {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, profile: &Profile) -> Result<()> {
        let data = serde_json::to_string_pretty(profile)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ProfileStore {
        ProfileStore::new(dir.path().join(PROFILE_FILE))
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let profile = store.load();
        assert_eq!(profile, Profile::default());
        assert!(profile.name.is_none());
        assert!(profile.recent_questions.is_empty());
    }

    #[test]
    fn test_load_corrupt_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{not valid json").unwrap();
        assert_eq!(store.load(), Profile::default());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut profile = Profile::default();
        profile.name = Some("Ana".to_string());
        profile.remember_question("best sunscreen for oily skin?");
        store.save(&profile).unwrap();
        assert_eq!(store.load(), profile);
    }

    #[test]
    fn test_save_overwrites_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "garbage").unwrap();
        let mut profile = Profile::default();
        profile.name = Some("Ana".to_string());
        store.save(&profile).unwrap();
        assert_eq!(store.load().name.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_stored_json_uses_camel_case_field() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut profile = Profile::default();
        profile.remember_question("night routine order?");
        store.save(&profile).unwrap();
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("recentQuestions"));
    }

    #[test]
    fn test_remember_question_newest_first() {
        let mut profile = Profile::default();
        profile.remember_question("first");
        profile.remember_question("second");
        assert_eq!(profile.recent_questions, vec!["second", "first"]);
    }

    #[test]
    fn test_remember_question_caps_at_five() {
        let mut profile = Profile::default();
        for index in 1..=6 {
            profile.remember_question(&format!("question {index}"));
        }
        assert_eq!(profile.recent_questions.len(), MAX_RECENT_QUESTIONS);
        assert_eq!(
            profile.recent_questions,
            vec![
                "question 6",
                "question 5",
                "question 4",
                "question 3",
                "question 2"
            ]
        );
    }

    #[test]
    fn test_partial_payload_fills_defaults() {
        let profile: Profile = serde_json::from_str(r#"{"name":"Ana"}"#).unwrap();
        assert_eq!(profile.name.as_deref(), Some("Ana"));
        assert!(profile.recent_questions.is_empty());
    }
}
