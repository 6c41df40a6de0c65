use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::watch;

use crate::games::tictactoe::Outcome;
use crate::storage::{
    ContentProvider, DocumentSerializer, DocumentStore, FileContentProvider, Validate,
    YamlSerializer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRecord {
    pub human_wins: u32,
    pub ai_wins: u32,
    pub draws: u32,
}

impl ScoreRecord {
    pub fn games_played(&self) -> u64 {
        u64::from(self.human_wins) + u64::from(self.ai_wins) + u64::from(self.draws)
    }

    /// The record after one more finished game. `InProgress` leaves it unchanged.
    pub fn with_outcome(self, outcome: Outcome) -> Self {
        match outcome {
            Outcome::HumanWins => Self {
                human_wins: self.human_wins.saturating_add(1),
                ..self
            },
            Outcome::AiWins => Self {
                ai_wins: self.ai_wins.saturating_add(1),
                ..self
            },
            Outcome::Draw => Self {
                draws: self.draws.saturating_add(1),
                ..self
            },
            Outcome::InProgress => self,
        }
    }
}

impl Validate for ScoreRecord {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Persistent win/loss/draw tally.
///
/// Read once when loaded, rewritten in full after every recorded game.
/// Subscribers receive each new snapshot through a watch channel.
pub struct ScoreLedger<TContentProvider = FileContentProvider, TSerializer = YamlSerializer>
where
    TContentProvider: ContentProvider,
    TSerializer: DocumentSerializer<ScoreRecord>,
{
    store: DocumentStore<TContentProvider, ScoreRecord, TSerializer>,
    sender: watch::Sender<ScoreRecord>,
}

impl ScoreLedger<FileContentProvider, YamlSerializer> {
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Result<Self, String> {
        Self::load(DocumentStore::from_yaml_file(file_path))
    }
}

impl<TContentProvider, TSerializer> ScoreLedger<TContentProvider, TSerializer>
where
    TContentProvider: ContentProvider,
    TSerializer: DocumentSerializer<ScoreRecord>,
{
    pub fn load(
        store: DocumentStore<TContentProvider, ScoreRecord, TSerializer>,
    ) -> Result<Self, String> {
        let record = store.get()?;
        let (sender, _) = watch::channel(record);
        Ok(Self { store, sender })
    }

    pub fn current(&self) -> ScoreRecord {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScoreRecord> {
        self.sender.subscribe()
    }

    pub fn record(&self, outcome: Outcome) -> Result<ScoreRecord, String> {
        if !outcome.is_finished() {
            return Ok(self.current());
        }
        self.replace(self.current().with_outcome(outcome))
    }

    pub fn reset(&self) -> Result<ScoreRecord, String> {
        self.replace(ScoreRecord::default())
    }

    fn replace(&self, record: ScoreRecord) -> Result<ScoreRecord, String> {
        self.store.set(&record)?;
        self.sender.send_replace(record);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryContentProvider;

    fn memory_ledger(provider: MemoryContentProvider) -> ScoreLedger<MemoryContentProvider> {
        ScoreLedger::load(DocumentStore::new(provider, YamlSerializer::new())).unwrap()
    }

    #[test]
    fn test_missing_record_starts_at_zero() {
        let ledger = memory_ledger(MemoryContentProvider::new());
        assert_eq!(ledger.current(), ScoreRecord::default());
        assert_eq!(ledger.current().games_played(), 0);
    }

    #[test]
    fn test_record_increments_matching_counter() {
        let ledger = memory_ledger(MemoryContentProvider::new());

        ledger.record(Outcome::HumanWins).unwrap();
        ledger.record(Outcome::AiWins).unwrap();
        ledger.record(Outcome::AiWins).unwrap();
        let record = ledger.record(Outcome::Draw).unwrap();

        assert_eq!(
            record,
            ScoreRecord {
                human_wins: 1,
                ai_wins: 2,
                draws: 1
            }
        );
        assert_eq!(ledger.current(), record);
    }

    #[test]
    fn test_in_progress_is_not_recorded() {
        let provider = MemoryContentProvider::new();
        let ledger = memory_ledger(provider.clone());

        ledger.record(Outcome::InProgress).unwrap();

        assert_eq!(ledger.current(), ScoreRecord::default());
        assert_eq!(provider.get_content().unwrap(), None);
    }

    #[test]
    fn test_record_is_persisted_and_reloaded() {
        let provider = MemoryContentProvider::new();
        let ledger = memory_ledger(provider.clone());
        ledger.record(Outcome::Draw).unwrap();
        ledger.record(Outcome::HumanWins).unwrap();

        let reloaded = memory_ledger(provider);

        assert_eq!(reloaded.current(), ledger.current());
    }

    #[test]
    fn test_partial_document_fills_missing_counters() {
        let ledger = memory_ledger(MemoryContentProvider::with_content("ai_wins: 4\n"));
        assert_eq!(
            ledger.current(),
            ScoreRecord {
                human_wins: 0,
                ai_wins: 4,
                draws: 0
            }
        );
    }

    #[test]
    fn test_corrupt_document_fails_to_load() {
        let store = DocumentStore::new(
            MemoryContentProvider::with_content("draws: -1\n"),
            YamlSerializer::new(),
        );
        assert!(ScoreLedger::load(store).is_err());
    }

    #[test]
    fn test_subscribers_see_new_snapshots() {
        let ledger = memory_ledger(MemoryContentProvider::new());
        let mut receiver = ledger.subscribe();
        assert!(!receiver.has_changed().unwrap());

        ledger.record(Outcome::AiWins).unwrap();

        assert!(receiver.has_changed().unwrap());
        assert_eq!(receiver.borrow_and_update().ai_wins, 1);
    }

    #[test]
    fn test_reset_clears_counters() {
        let ledger = memory_ledger(MemoryContentProvider::new());
        ledger.record(Outcome::HumanWins).unwrap();

        let record = ledger.reset().unwrap();

        assert_eq!(record, ScoreRecord::default());
        assert_eq!(ledger.current(), ScoreRecord::default());
    }

    #[test]
    fn test_counters_saturate() {
        let record = ScoreRecord {
            human_wins: u32::MAX,
            ..ScoreRecord::default()
        };
        assert_eq!(record.with_outcome(Outcome::HumanWins).human_wins, u32::MAX);
    }
}
