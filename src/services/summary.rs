//! Save summaries
//!
//! The short description shown when listing saves: how far the run got,
//! the team and who played.

use crate::crypto;
use crate::document::{Player, RunStat, SaveDocument};
use crate::error::SaveResult;

/// Listing information for one save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSummary {
    /// Current level of the run
    pub level: i64,
    pub team_name: String,
    /// Players in `playerNames` order
    pub players: Vec<Player>,
}

impl SaveSummary {
    pub fn from_document(doc: &SaveDocument) -> Self {
        Self {
            level: doc.run_stat(RunStat::Level),
            team_name: doc.team_name().to_string(),
            players: doc.players(),
        }
    }

    /// Decode a container and summarize it
    pub fn from_container(container: &[u8], password: &str) -> SaveResult<Self> {
        let text = crypto::decode_string(container, password)?;
        let doc = SaveDocument::parse(&text)?;
        Ok(Self::from_document(&doc))
    }

    /// Player names joined for a one-line listing, or "N/A"
    pub fn player_list(&self) -> String {
        if self.players.is_empty() {
            return "N/A".to_string();
        }
        self.players
            .iter()
            .map(|p| if p.name.is_empty() { p.id.as_str() } else { p.name.as_str() })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
