//! One JSON file per competition. Writes go to a temp file that is renamed over the target,
//! so a failed save never leaves a half-written draw behind.

use crate::models::Bracket;
use crate::store::{is_valid_competition_id, prepare, BracketStore, StoreError, StoredBracket};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct JsonFileBracketStore {
    dir: PathBuf,
}

impl JsonFileBracketStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, competition_id: &str) -> PathBuf {
        self.dir.join(format!("{competition_id}.json"))
    }

    fn write_atomically(&self, target: &Path, record: &StoredBracket) -> Result<(), StoreError> {
        let tmp = self
            .dir
            .join(format!(".{}.{}.tmp", record.competition_id, Uuid::new_v4()));
        let result = (|| -> Result<(), StoreError> {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer_pretty(&mut writer, record)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
            fs::rename(&tmp, target)?;
            Ok(())
        })();
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }
}

impl BracketStore for JsonFileBracketStore {
    fn create_or_replace_pairings(
        &self,
        competition_id: &str,
        bracket: &Bracket,
    ) -> Result<StoredBracket, StoreError> {
        let record = prepare(competition_id, bracket)?;
        let target = self.path_for(competition_id);
        if let Err(e) = self.write_atomically(&target, &record) {
            log::warn!("Saving draw for {} failed: {}", competition_id, e);
            return Err(e);
        }
        log::info!("Saved draw for {} ({} matches)", competition_id, record.matches.len());
        Ok(record)
    }

    fn load_pairings(&self, competition_id: &str) -> Result<Option<StoredBracket>, StoreError> {
        if !is_valid_competition_id(competition_id) {
            return Err(StoreError::InvalidCompetitionId(competition_id.to_string()));
        }
        let file = match File::open(self.path_for(competition_id)) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record: StoredBracket = serde_json::from_reader(BufReader::new(file))?;
        let corrupt = |reason: String| StoreError::Corrupt {
            competition_id: competition_id.to_string(),
            reason,
        };
        if record.competition_id != competition_id {
            return Err(corrupt(format!("record belongs to {}", record.competition_id)));
        }
        record.matches.verify().map_err(|e| corrupt(e.to_string()))?;
        Ok(Some(record))
    }
}
