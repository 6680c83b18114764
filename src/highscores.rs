//! High score ledger
//!
//! Every saved run is appended to one list shared by all difficulties. The
//! splash screen shows the top 10 for the chosen difficulty.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HIGH_SCORES;
use crate::error::StorageError;
use crate::format_time;
use crate::sim::Difficulty;

/// A single saved run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub initials: String,
    pub score: u32,
    /// Elapsed play time, formatted as `"<m> min <s> sec"`
    pub total_time: String,
    /// Difficulty tier (1-3)
    pub difficulty: u8,
}

impl ScoreRecord {
    pub fn new(initials: &str, score: u32, elapsed: Duration, difficulty: Difficulty) -> Self {
        Self {
            initials: initials.to_string(),
            score,
            total_time: format_time(elapsed),
            difficulty: difficulty.tier(),
        }
    }
}

/// Storage for saved runs
pub trait ScoreLedger {
    /// Persist one record
    fn append(
        &mut self,
        initials: &str,
        score: u32,
        elapsed: Duration,
        difficulty: Difficulty,
    ) -> Result<(), StorageError>;

    /// Best `n` records for a difficulty, highest score first
    fn top_n(&self, difficulty: Difficulty, n: usize) -> Vec<ScoreRecord>;

    /// The splash screen's top-10 table
    fn top_ten(&self, difficulty: Difficulty) -> Vec<ScoreRecord> {
        self.top_n(difficulty, MAX_HIGH_SCORES)
    }
}

/// In-memory list of records in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<ScoreRecord>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, record: ScoreRecord) {
        self.entries.push(record);
    }

    /// Records for one difficulty, sorted by score descending.
    /// The sort is stable, so ties keep insertion order.
    pub fn top(&self, difficulty: Difficulty, n: usize) -> Vec<ScoreRecord> {
        let tier = difficulty.tier();
        let mut matching: Vec<ScoreRecord> = self
            .entries
            .iter()
            .filter(|e| e.difficulty == tier)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.score.cmp(&a.score));
        matching.truncate(n);
        matching
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl ScoreLedger for HighScores {
    fn append(
        &mut self,
        initials: &str,
        score: u32,
        elapsed: Duration,
        difficulty: Difficulty,
    ) -> Result<(), StorageError> {
        self.push(ScoreRecord::new(initials, score, elapsed, difficulty));
        Ok(())
    }

    fn top_n(&self, difficulty: Difficulty, n: usize) -> Vec<ScoreRecord> {
        self.top(difficulty, n)
    }
}

/// Scores kept as a JSON array on disk
#[derive(Debug, Clone)]
pub struct ScoreFile {
    path: PathBuf,
}

impl ScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record. A missing file is an empty list.
    pub fn load(&self) -> Result<HighScores, StorageError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HighScores::new()),
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };
        serde_json::from_str(&json).map_err(|e| StorageError::json(&self.path, e))
    }

    /// Read every record, treating unreadable or malformed data as empty
    pub fn load_or_default(&self) -> HighScores {
        match self.load() {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.len());
                scores
            }
            Err(e) => {
                log::warn!("Ignoring score file: {e}");
                HighScores::new()
            }
        }
    }

    /// Write every record, replacing the file
    pub fn save(&self, scores: &HighScores) -> Result<(), StorageError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        scores
            .serialize(&mut serializer)
            .map_err(|e| StorageError::json(&self.path, e))?;

        fs::write(&self.path, buf).map_err(|e| StorageError::io(&self.path, e))?;
        log::info!("High scores saved ({} entries)", scores.len());
        Ok(())
    }
}

impl ScoreLedger for ScoreFile {
    fn append(
        &mut self,
        initials: &str,
        score: u32,
        elapsed: Duration,
        difficulty: Difficulty,
    ) -> Result<(), StorageError> {
        let mut scores = self.load_or_default();
        scores.push(ScoreRecord::new(initials, score, elapsed, difficulty));
        self.save(&scores)
    }

    fn top_n(&self, difficulty: Difficulty, n: usize) -> Vec<ScoreRecord> {
        self.load_or_default().top(difficulty, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(initials: &str, score: u32, difficulty: u8) -> ScoreRecord {
        ScoreRecord {
            initials: initials.to_string(),
            score,
            total_time: "0 min 1 sec".to_string(),
            difficulty,
        }
    }

    #[test]
    fn test_top_filters_and_sorts() {
        let mut scores = HighScores::new();
        scores.push(record("AAA", 10, 2));
        scores.push(record("BBB", 30, 1));
        scores.push(record("CCC", 20, 2));
        scores.push(record("DDD", 40, 2));

        let top = scores.top(Difficulty::Normal, 10);
        let names: Vec<_> = top.iter().map(|r| r.initials.as_str()).collect();
        assert_eq!(names, ["DDD", "CCC", "AAA"]);
        assert!(scores.top(Difficulty::Hard, 10).is_empty());
    }

    #[test]
    fn test_top_limits_to_n() {
        let mut scores = HighScores::new();
        for i in 0..15 {
            scores.push(record("ZZZ", i, 3));
        }
        let top = scores.top_ten(Difficulty::Hard);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].score, 14);
        assert_eq!(top[9].score, 5);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut scores = HighScores::new();
        scores.push(record("1ST", 50, 1));
        scores.push(record("2ND", 70, 1));
        scores.push(record("3RD", 50, 1));
        scores.push(record("4TH", 50, 1));

        let top = scores.top(Difficulty::Easy, 10);
        let names: Vec<_> = top.iter().map(|r| r.initials.as_str()).collect();
        assert_eq!(names, ["2ND", "1ST", "3RD", "4TH"]);
    }

    #[test]
    fn test_record_formats_time() {
        let r = ScoreRecord::new("ABC", 12, Duration::from_secs(125), Difficulty::Hard);
        assert_eq!(r.total_time, "2 min 5 sec");
        assert_eq!(r.difficulty, 3);
    }

    #[test]
    fn test_score_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = ScoreFile::new(dir.path().join("scores.json"));
        assert!(file.top_n(Difficulty::Normal, 10).is_empty());

        file.append("AB", 7, Duration::from_secs(61), Difficulty::Normal)
            .unwrap();
        file.append("CD", 9, Duration::from_secs(5), Difficulty::Normal)
            .unwrap();
        file.append("EF", 99, Duration::from_secs(5), Difficulty::Easy)
            .unwrap();

        let top = file.top_n(Difficulty::Normal, 10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].initials, "CD");
        assert_eq!(top[1].total_time, "1 min 1 sec");
    }

    #[test]
    fn test_score_file_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        let mut file = ScoreFile::new(&path);
        file.append("JD", 3, Duration::from_secs(42), Difficulty::Hard)
            .unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "initials": "JD",
                "score": 3,
                "total_time": "0 min 42 sec",
                "difficulty": 3
            }])
        );
        assert!(raw.contains("\n        \"initials\""));
    }

    #[test]
    fn test_malformed_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "{ not json").unwrap();
        let file = ScoreFile::new(&path);

        assert!(matches!(file.load(), Err(StorageError::Json { .. })));
        assert!(file.top_n(Difficulty::Easy, 10).is_empty());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = ScoreFile::new(dir.path().join("nope.json"));
        assert!(file.load().unwrap().is_empty());
    }
}
