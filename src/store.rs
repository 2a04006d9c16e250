use crate::github::{ItemKind, TrackedItem};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
struct SeenSets {
    #[serde(default)]
    prs: HashSet<u64>,
    #[serde(default)]
    issues: HashSet<u64>,
}

/// Record of item IDs that have already been announced, persisted as a flat
/// JSON file (`{"prs": [..], "issues": [..]}`) and reloaded at startup.
///
/// Cloning yields a handle to the same underlying sets, so the watcher task
/// and the command handlers stay in sync.
#[derive(Clone)]
pub struct SeenStore {
    sets: Arc<Mutex<SeenSets>>,
    path: PathBuf,
}

impl SeenStore {
    /// Load previously seen items from `path`. A missing file starts empty;
    /// an unreadable or corrupt file is logged and also starts empty.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let sets = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<SeenSets>(&content) {
                Ok(sets) => {
                    info!(
                        "Loaded {} seen PRs and {} seen issues",
                        sets.prs.len(),
                        sets.issues.len()
                    );
                    sets
                }
                Err(e) => {
                    warn!("Ignoring corrupt seen-item file {}: {}", path.display(), e);
                    SeenSets::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => SeenSets::default(),
            Err(e) => {
                warn!("Error loading seen items from {}: {}", path.display(), e);
                SeenSets::default()
            }
        };

        Self {
            sets: Arc::new(Mutex::new(sets)),
            path,
        }
    }

    /// Persist the current sets, overwriting the whole file.
    pub fn save(&self) -> anyhow::Result<()> {
        let json = {
            let sets = self.sets.lock().unwrap();
            serde_json::to_string(&*sets)?
        };
        fs::write(&self.path, json)
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", self.path.display(), e))?;
        Ok(())
    }

    /// Partition `fetched` into new and already-seen items for `kind`,
    /// claiming every new ID immediately so a failed delivery is never
    /// retried. The fetch order is newest-first; the returned new items are
    /// reversed so announcements run oldest-first.
    pub fn claim_new<T: TrackedItem>(&self, kind: ItemKind, fetched: Vec<T>) -> Vec<T> {
        let mut sets = self.sets.lock().unwrap();
        let seen = match kind {
            ItemKind::PullRequest => &mut sets.prs,
            ItemKind::Issue => &mut sets.issues,
        };

        let mut new_items: Vec<T> = fetched
            .into_iter()
            .filter(|item| seen.insert(item.id()))
            .collect();
        new_items.reverse();
        new_items
    }

    /// Tracked (pull request, issue) counts.
    pub fn counts(&self) -> (usize, usize) {
        let sets = self.sets.lock().unwrap();
        (sets.prs.len(), sets.issues.len())
    }

    /// Forget everything, so all currently open items count as new on the
    /// next cycle. The only path that ever removes an ID.
    pub fn reset(&self) {
        let mut sets = self.sets.lock().unwrap();
        sets.prs.clear();
        sets.issues.clear();
    }
}
