//! Best score and best survival time records
//!
//! Two separate per-key LocalStorage entries (`highestScore`,
//! `highestTime`), unchanged from earlier releases so old records survive
//! an update. Each updates independently: a run can set a new best time
//! without beating the best score.

use crate::persistence::KeyValueStore;

const SCORE_KEY: &str = "highestScore";
const TIME_KEY: &str = "highestTime";

/// Persisted records, loaded once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HighScores {
    pub best_score: u64,
    pub best_time_secs: f32,
}

impl HighScores {
    /// Load from the store; anything missing or unparseable reads as zero.
    pub fn load(store: &impl KeyValueStore) -> Self {
        Self {
            best_score: store
                .get_number(SCORE_KEY)
                .map(|v| v.max(0.0) as u64)
                .unwrap_or(0),
            best_time_secs: store
                .get_number(TIME_KEY)
                .map(|v| v.max(0.0) as f32)
                .unwrap_or(0.0),
        }
    }

    /// Fold a finished run into the records, persisting only the fields
    /// that improved. Returns (new best score, new best time).
    pub fn record_run(
        &mut self,
        store: &mut impl KeyValueStore,
        score: u64,
        time_secs: f32,
    ) -> (bool, bool) {
        let better_score = score > self.best_score;
        if better_score {
            self.best_score = score;
            store.set_number(SCORE_KEY, score as f64);
            log::info!("new best score: {score}");
        }

        let better_time = time_secs > self.best_time_secs;
        if better_time {
            self.best_time_secs = time_secs;
            store.set_number(TIME_KEY, f64::from(time_secs));
            log::info!("new best time: {time_secs:.2}s");
        }

        (better_score, better_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn empty_store_reads_as_zero() {
        let store = MemoryStore::default();
        assert_eq!(HighScores::load(&store), HighScores::default());
    }

    #[test]
    fn records_update_only_when_beaten() {
        let mut store = MemoryStore::default();
        let mut records = HighScores::load(&store);

        assert_eq!(records.record_run(&mut store, 40, 30.0), (true, true));
        // Better time, worse score
        assert_eq!(records.record_run(&mut store, 25, 45.5), (false, true));
        assert_eq!(records.best_score, 40);
        assert_eq!(records.best_time_secs, 45.5);

        // A worse run leaves the store untouched
        assert_eq!(records.record_run(&mut store, 10, 5.0), (false, false));
        let reloaded = HighScores::load(&store);
        assert_eq!(reloaded.best_score, 40);
        assert_eq!(reloaded.best_time_secs, 45.5);
    }

    #[test]
    fn garbage_in_the_store_is_ignored() {
        let mut store = MemoryStore::default();
        store.set("highestScore", "NaN-ish junk");
        store.set("highestTime", "");
        assert_eq!(HighScores::load(&store), HighScores::default());
    }
}
