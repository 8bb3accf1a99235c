//! Score recorder that appends one JSON object per line to any writer.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::engine::{RecordError, RecordId, ScoreRecord, ScoreRecorder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordOp {
    #[serde(rename = "create")]
    Create,
    #[serde(rename = "update")]
    Update,
}

/// One line of the score log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub op: RecordOp,
    pub id: RecordId,
    pub score: f64,
    pub date_ms: u64,
    pub mode: String,
}

impl ScoreLine {
    fn new(op: RecordOp, id: RecordId, record: &ScoreRecord) -> Self {
        Self {
            op,
            id,
            score: record.score,
            date_ms: record.date_ms,
            mode: record.mode.as_str().to_string(),
        }
    }
}

pub struct JsonLinesRecorder<W: Write> {
    out: W,
    next_id: RecordId,
}

impl<W: Write> JsonLinesRecorder<W> {
    pub fn new(out: W) -> Self {
        Self { out, next_id: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &ScoreLine) -> Result<(), RecordError> {
        serde_json::to_writer(&mut self.out, line).map_err(std::io::Error::from)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> ScoreRecorder for JsonLinesRecorder<W> {
    fn create(&mut self, record: &ScoreRecord) -> Result<RecordId, RecordError> {
        let id = self.next_id;
        self.write_line(&ScoreLine::new(RecordOp::Create, id, record))?;
        self.next_id += 1;
        Ok(id)
    }

    fn update(&mut self, id: RecordId, record: &ScoreRecord) -> Result<(), RecordError> {
        if id >= self.next_id {
            return Err(RecordError::UnknownRecord(id));
        }
        self.write_line(&ScoreLine::new(RecordOp::Update, id, record))
    }
}
