//! Score persistence seam
//!
//! A session creates one record when it starts and updates it after every commit. How
//! (or whether) records are stored is up to the recorder; the engine never looks at them
//! again.

use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::types::GameMode;

pub type RecordId = u64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRecord {
    pub score: f64,
    /// Milliseconds since the Unix epoch
    pub date_ms: u64,
    pub mode: GameMode,
}

impl ScoreRecord {
    /// A record stamped with the current wall-clock time
    pub fn now(score: f64, mode: GameMode) -> Self {
        Self {
            score,
            date_ms: now_ms(),
            mode,
        }
    }
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("unknown score record {0}")]
    UnknownRecord(RecordId),
    #[error("score log write failed: {0}")]
    Io(#[from] std::io::Error),
}

pub trait ScoreRecorder {
    fn create(&mut self, record: &ScoreRecord) -> Result<RecordId, RecordError>;
    fn update(&mut self, id: RecordId, record: &ScoreRecord) -> Result<(), RecordError>;
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRecorder;

impl ScoreRecorder for NullRecorder {
    fn create(&mut self, _record: &ScoreRecord) -> Result<RecordId, RecordError> {
        Ok(0)
    }

    fn update(&mut self, _id: RecordId, _record: &ScoreRecord) -> Result<(), RecordError> {
        Ok(())
    }
}

/// Keeps every record in memory, indexed by id
#[derive(Debug, Clone, Default)]
pub struct MemoryRecorder {
    records: Vec<ScoreRecord>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&ScoreRecord> {
        self.records.get(id as usize)
    }

    /// Highest score across all records
    pub fn best(&self) -> Option<&ScoreRecord> {
        self.records
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

impl ScoreRecorder for MemoryRecorder {
    fn create(&mut self, record: &ScoreRecord) -> Result<RecordId, RecordError> {
        self.records.push(*record);
        Ok((self.records.len() - 1) as RecordId)
    }

    fn update(&mut self, id: RecordId, record: &ScoreRecord) -> Result<(), RecordError> {
        let slot = self
            .records
            .get_mut(id as usize)
            .ok_or(RecordError::UnknownRecord(id))?;
        *slot = *record;
        Ok(())
    }
}

impl<R: ScoreRecorder + ?Sized> ScoreRecorder for &mut R {
    fn create(&mut self, record: &ScoreRecord) -> Result<RecordId, RecordError> {
        (**self).create(record)
    }

    fn update(&mut self, id: RecordId, record: &ScoreRecord) -> Result<(), RecordError> {
        (**self).update(id, record)
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(score: f64) -> ScoreRecord {
        ScoreRecord {
            score,
            date_ms: 1,
            mode: GameMode::Normal,
        }
    }

    #[test]
    fn test_memory_recorder_create_update() {
        let mut rec = MemoryRecorder::new();
        let a = rec.create(&record(0.0)).unwrap();
        let b = rec.create(&record(0.0)).unwrap();
        assert_ne!(a, b);

        rec.update(a, &record(12.5)).unwrap();
        assert_eq!(rec.get(a).map(|r| r.score), Some(12.5));
        assert_eq!(rec.get(b).map(|r| r.score), Some(0.0));
        assert_eq!(rec.best().map(|r| r.score), Some(12.5));
    }

    #[test]
    fn test_memory_recorder_unknown_id() {
        let mut rec = MemoryRecorder::new();
        let err = rec.update(3, &record(1.0)).unwrap_err();
        assert!(matches!(err, RecordError::UnknownRecord(3)));
    }

    #[test]
    fn test_record_now_is_stamped() {
        let r = ScoreRecord::now(4.0, GameMode::Chaos);
        assert!(r.date_ms > 0);
        assert_eq!(r.mode, GameMode::Chaos);
    }
}
