//! Typed view over a save document
//!
//! A `SaveDocument` owns the whole JSON tree and exposes the known fields
//! through total accessors. Anything the editor does not model is carried
//! through untouched, in its original key order.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::error::{SaveError, SaveResult};

use super::access::{int_or_default, kind, object_at, object_at_mut, str_or_default};
use super::fields::{FieldPath, FieldValue, PlayerField, RunStat, Upgrade};

/// Wrapper key holding the per-player tables and run statistics
const DICTIONARY_OF_DICTIONARIES: &str = "dictionaryOfDictionaries";
/// Every top-level entry stores its payload under this key
const VALUE: &str = "value";
const RUN_STATS: &str = "runStats";
const TEAM_NAME: &str = "teamName";
const PLAYER_NAMES: &str = "playerNames";

/// Indentation used when no setting overrides it
pub const DEFAULT_INDENT: usize = 4;

/// A player listed in `playerNames`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Player id (a Steam id in practice), always in string form
    pub id: String,
    /// Display name, or "" when the entry is not a string
    pub name: String,
}

/// Non-fatal observations made while loading a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The root is valid JSON but not an object; no known field can be edited
    RootNotObject(&'static str),
    /// `playerNames` is absent, so no per-player fields are available
    NoPlayers,
    /// `runStats` is absent; stats read as 0 and are created on save
    NoRunStats,
    /// A known player has no entry in `playerHealth`
    MissingHealth { player_id: String },
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RootNotObject(kind) => write!(f, "document root is {}, not an object", kind),
            Self::NoPlayers => write!(f, "no playerNames table; player fields unavailable"),
            Self::NoRunStats => write!(f, "no runStats table; stats default to 0"),
            Self::MissingHealth { player_id } => {
                write!(f, "player {} has no health entry; defaults to 0", player_id)
            }
        }
    }
}

/// A save document: a JSON tree plus typed access to the known fields
#[derive(Debug, Clone, PartialEq)]
pub struct SaveDocument {
    root: Value,
}

impl Default for SaveDocument {
    fn default() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }
}

impl SaveDocument {
    /// Parse a document from JSON text
    pub fn parse(text: &str) -> SaveResult<Self> {
        let root = serde_json::from_str(text)?;
        Ok(Self { root })
    }

    /// Wrap an already parsed tree
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// The underlying JSON tree
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Consume the document, returning the JSON tree
    pub fn into_value(self) -> Value {
        self.root
    }

    /// Render as pretty-printed JSON with the default indentation
    pub fn serialize(&self) -> SaveResult<String> {
        self.serialize_with_indent(DEFAULT_INDENT)
    }

    /// Render as pretty-printed JSON with `indent` spaces per level
    pub fn serialize_with_indent(&self, indent: usize) -> SaveResult<String> {
        let indent = " ".repeat(indent);
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(
            &mut buf,
            PrettyFormatter::with_indent(indent.as_bytes()),
        );
        self.root.serialize(&mut ser)?;
        String::from_utf8(buf)
            .map_err(|e| SaveError::Encoding(format!("Serialized document is not UTF-8: {}", e)))
    }

    /// Structural problems worth telling the user about after a load
    pub fn load_warnings(&self) -> Vec<LoadWarning> {
        if !self.root.is_object() {
            return vec![LoadWarning::RootNotObject(kind(&self.root))];
        }

        let mut warnings = Vec::new();
        if object_at(&self.root, &[DICTIONARY_OF_DICTIONARIES, VALUE, RUN_STATS]).is_none() {
            warnings.push(LoadWarning::NoRunStats);
        }

        let players = self.players();
        if object_at(&self.root, &[PLAYER_NAMES, VALUE]).is_none() {
            warnings.push(LoadWarning::NoPlayers);
        }

        let health_key = PlayerField::Health.table_key();
        let health = object_at(
            &self.root,
            &[DICTIONARY_OF_DICTIONARIES, VALUE, health_key.as_str()],
        );
        for player in players {
            if health.map_or(true, |table| !table.contains_key(&player.id)) {
                warnings.push(LoadWarning::MissingHealth {
                    player_id: player.id,
                });
            }
        }
        warnings
    }

    // ----- run stats and team -----

    pub fn run_stat(&self, stat: RunStat) -> i64 {
        int_or_default(
            &self.root,
            &[DICTIONARY_OF_DICTIONARIES, VALUE, RUN_STATS, stat.key()],
        )
    }

    pub fn set_run_stat(&mut self, stat: RunStat, value: i64) -> SaveResult<()> {
        self.object_mut(&[DICTIONARY_OF_DICTIONARIES, VALUE, RUN_STATS])?
            .insert(stat.key().to_string(), Value::from(value));
        Ok(())
    }

    pub fn team_name(&self) -> &str {
        str_or_default(&self.root, &[TEAM_NAME, VALUE])
    }

    pub fn set_team_name(&mut self, name: &str) -> SaveResult<()> {
        self.object_mut(&[TEAM_NAME])?
            .insert(VALUE.to_string(), Value::from(name));
        Ok(())
    }

    // ----- players -----

    /// Players from `playerNames`, in document order
    pub fn players(&self) -> Vec<Player> {
        object_at(&self.root, &[PLAYER_NAMES, VALUE])
            .map(|names| {
                names
                    .iter()
                    .map(|(id, name)| Player {
                        id: id.clone(),
                        name: name.as_str().unwrap_or_default().to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Ids of every known player
    pub fn player_ids(&self) -> Vec<String> {
        self.players().into_iter().map(|p| p.id).collect()
    }

    /// Integer value of a per-player column for one player
    pub fn player_value(&self, field: PlayerField, player_id: &str) -> i64 {
        let table = field.table_key();
        int_or_default(
            &self.root,
            &[DICTIONARY_OF_DICTIONARIES, VALUE, table.as_str(), player_id],
        )
    }

    /// Set a per-player column for one player, keyed by the id's string form
    pub fn set_player_value(
        &mut self,
        field: PlayerField,
        player_id: &str,
        value: i64,
    ) -> SaveResult<()> {
        let table = field.table_key();
        self.object_mut(&[DICTIONARY_OF_DICTIONARIES, VALUE, table.as_str()])?
            .insert(player_id.to_string(), Value::from(value));
        Ok(())
    }

    /// A whole per-player column; non-integer entries read as 0
    pub fn player_table(&self, field: PlayerField) -> BTreeMap<String, i64> {
        let table = field.table_key();
        object_at(&self.root, &[DICTIONARY_OF_DICTIONARIES, VALUE, table.as_str()])
            .map(|entries| {
                entries
                    .iter()
                    .map(|(id, v)| (id.clone(), v.as_i64().unwrap_or(0)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn player_health(&self, player_id: &str) -> i64 {
        self.player_value(PlayerField::Health, player_id)
    }

    pub fn set_player_health(&mut self, player_id: &str, value: i64) -> SaveResult<()> {
        self.set_player_value(PlayerField::Health, player_id, value)
    }

    pub fn player_upgrade(&self, upgrade: Upgrade, player_id: &str) -> i64 {
        self.player_value(PlayerField::Upgrade(upgrade), player_id)
    }

    pub fn set_player_upgrade(
        &mut self,
        upgrade: Upgrade,
        player_id: &str,
        value: i64,
    ) -> SaveResult<()> {
        self.set_player_value(PlayerField::Upgrade(upgrade), player_id, value)
    }

    // ----- generic field access -----

    /// Read any known field
    pub fn get_field(&self, path: &FieldPath) -> FieldValue {
        match path {
            FieldPath::RunStat(stat) => FieldValue::Integer(self.run_stat(*stat)),
            FieldPath::TeamName => FieldValue::Text(self.team_name().to_string()),
            FieldPath::PlayerHealth(id) => FieldValue::Integer(self.player_health(id)),
            FieldPath::PlayerUpgrade(upgrade, id) => {
                FieldValue::Integer(self.player_upgrade(*upgrade, id))
            }
        }
    }

    /// Write any known field; the value kind must match the field
    pub fn set_field(&mut self, path: &FieldPath, value: FieldValue) -> SaveResult<()> {
        match (path, value) {
            (FieldPath::TeamName, FieldValue::Text(name)) => self.set_team_name(&name),
            (FieldPath::RunStat(stat), FieldValue::Integer(n)) => self.set_run_stat(*stat, n),
            (FieldPath::PlayerHealth(id), FieldValue::Integer(n)) => self.set_player_health(id, n),
            (FieldPath::PlayerUpgrade(upgrade, id), FieldValue::Integer(n)) => {
                self.set_player_upgrade(*upgrade, id, n)
            }
            (path, value) => Err(SaveError::Validation(format!(
                "Field {} cannot hold value {:?}",
                path, value
            ))),
        }
    }

    fn object_mut(&mut self, path: &[&str]) -> SaveResult<&mut Map<String, Value>> {
        object_at_mut(&mut self.root, path).map_err(SaveError::Validation)
    }
}
