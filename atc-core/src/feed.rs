//! Operator command feed with idempotent alert ingestion.
//!
//! Alert texts are content-addressed: an identical text already pending is
//! the same logical alert and is not re-appended, so a condition persisting
//! across polls cannot spam the feed. Terminal entries (accepted, rejected)
//! never block re-creation.

use serde::Serialize;

use crate::types::{AtcError, Result};

/// Maximum retained entries; oldest dropped first.
pub const MAX_LOG: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AckState {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandEntry {
    pub id: u64,
    pub text: String,
    pub time: i64,
    pub state: AckState,
}

/// The command/acknowledgment log. Local-presentation only; operator
/// actions are not propagated anywhere.
#[derive(Debug, Default)]
pub struct CommandFeed {
    entries: Vec<CommandEntry>, // oldest first
    next_id: u64,
}

impl CommandFeed {
    pub fn new() -> Self {
        CommandFeed::default()
    }

    /// Fold one tick's alert batch into the log.
    ///
    /// Returns the number of entries actually created.
    pub fn ingest(&mut self, texts: &[String], now: i64) -> usize {
        let mut created = 0;
        for text in texts {
            let outstanding = self
                .entries
                .iter()
                .any(|e| e.state == AckState::Pending && e.text == *text);
            if outstanding {
                continue;
            }
            self.next_id += 1;
            self.entries.push(CommandEntry {
                id: self.next_id,
                text: text.clone(),
                time: now,
                state: AckState::Pending,
            });
            created += 1;
        }
        if self.entries.len() > MAX_LOG {
            let excess = self.entries.len() - MAX_LOG;
            self.entries.drain(..excess);
        }
        created
    }

    /// Accept an entry: terminal, stays visible.
    pub fn acknowledge(&mut self, id: u64) -> Result<()> {
        self.transition(id, AckState::Accepted)
    }

    /// Reject an entry: terminal, hidden from the visible list.
    pub fn reject(&mut self, id: u64) -> Result<()> {
        self.transition(id, AckState::Rejected)
    }

    fn transition(&mut self, id: u64, to: AckState) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(AtcError::UnknownCommand(id))?;
        if entry.state == AckState::Pending {
            entry.state = to;
        }
        Ok(())
    }

    /// Non-rejected entries, most recent first.
    pub fn visible(&self) -> Vec<&CommandEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| e.state != AckState::Rejected)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
