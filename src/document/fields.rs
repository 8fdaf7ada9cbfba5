//! Known field addressing
//!
//! Typed names for every location in the save document the editor
//! understands. Text forms mirror the JSON key names so that command-line
//! input like `runStats.level` or `playerUpgradeSpeed.76561198000000001`
//! reads the same as the document it edits.

use std::fmt;
use std::str::FromStr;

use crate::error::SaveError;

/// Macro to generate closed enums whose variants map 1:1 to JSON key names
macro_rules! define_key_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in display order
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            /// The JSON key name for this variant
            pub fn key(&self) -> &'static str {
                match self {
                    $(Self::$variant => $key),+
                }
            }

            /// Parse from the JSON key name (case-insensitive)
            pub fn parse(s: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.key().eq_ignore_ascii_case(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

define_key_enum!(
    /// Integer statistics stored under `runStats`
    RunStat {
        Level => "level",
        Currency => "currency",
        Lives => "lives",
        ChargingStationCharge => "chargingStationCharge",
        TotalHaul => "totalHaul",
    }
);

define_key_enum!(
    /// Per-player upgrades, each stored as a `playerUpgrade<Name>` table
    Upgrade {
        Health => "Health",
        Stamina => "Stamina",
        ExtraJump => "ExtraJump",
        Launch => "Launch",
        MapPlayerCount => "MapPlayerCount",
        Speed => "Speed",
        Strength => "Strength",
        Range => "Range",
        Throw => "Throw",
    }
);

impl Upgrade {
    /// The name of the player table holding this upgrade
    pub fn table_key(&self) -> String {
        format!("{}{}", UPGRADE_TABLE_PREFIX, self.key())
    }
}

const UPGRADE_TABLE_PREFIX: &str = "playerUpgrade";
const HEALTH_TABLE: &str = "playerHealth";
const RUN_STATS: &str = "runStats";
const TEAM_NAME: &str = "teamName";

/// A per-player integer column, used for batch edits across all players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerField {
    Health,
    Upgrade(Upgrade),
}

impl PlayerField {
    /// Name of the JSON table holding this column
    pub fn table_key(&self) -> String {
        match self {
            Self::Health => HEALTH_TABLE.to_string(),
            Self::Upgrade(upgrade) => upgrade.table_key(),
        }
    }

    /// Address this column for a single player
    pub fn for_player(&self, player_id: impl Into<String>) -> FieldPath {
        match self {
            Self::Health => FieldPath::PlayerHealth(player_id.into()),
            Self::Upgrade(upgrade) => FieldPath::PlayerUpgrade(*upgrade, player_id.into()),
        }
    }
}

impl fmt::Display for PlayerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.table_key())
    }
}

impl FromStr for PlayerField {
    type Err = SaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(HEALTH_TABLE) {
            return Ok(Self::Health);
        }
        strip_prefix_ignore_case(s, UPGRADE_TABLE_PREFIX)
            .and_then(Upgrade::parse)
            .map(Self::Upgrade)
            .ok_or_else(|| SaveError::Validation(format!("Unknown player field: {}", s)))
    }
}

/// A known path in the save document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldPath {
    /// `runStats.<stat>`
    RunStat(RunStat),
    /// `teamName`
    TeamName,
    /// `playerHealth.<player_id>`
    PlayerHealth(String),
    /// `playerUpgrade<Name>.<player_id>`
    PlayerUpgrade(Upgrade, String),
}

impl FieldPath {
    /// Whether this field holds an integer (everything except the team name)
    pub fn is_integer(&self) -> bool {
        !matches!(self, Self::TeamName)
    }

    /// The player this field belongs to, if any
    pub fn player_id(&self) -> Option<&str> {
        match self {
            Self::PlayerHealth(id) | Self::PlayerUpgrade(_, id) => Some(id),
            Self::RunStat(_) | Self::TeamName => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RunStat(stat) => write!(f, "{}.{}", RUN_STATS, stat),
            Self::TeamName => f.write_str(TEAM_NAME),
            Self::PlayerHealth(id) => write!(f, "{}.{}", HEALTH_TABLE, id),
            Self::PlayerUpgrade(upgrade, id) => write!(f, "{}.{}", upgrade.table_key(), id),
        }
    }
}

impl FromStr for FieldPath {
    type Err = SaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let unknown = || SaveError::Validation(format!("Unknown field: {}", s));

        if s.eq_ignore_ascii_case(TEAM_NAME) {
            return Ok(Self::TeamName);
        }

        match s.split_once('.') {
            None => RunStat::parse(s).map(Self::RunStat).ok_or_else(unknown),
            Some((head, tail)) if head.eq_ignore_ascii_case(RUN_STATS) => {
                RunStat::parse(tail).map(Self::RunStat).ok_or_else(unknown)
            }
            Some((head, id)) => {
                if id.is_empty() {
                    return Err(SaveError::Validation(format!(
                        "Missing player id in field: {}",
                        s
                    )));
                }
                let column: PlayerField = head.parse().map_err(|_| unknown())?;
                Ok(column.for_player(id))
            }
        }
    }
}

/// A value read from a known field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_stat_paths() {
        assert_eq!(
            "runStats.level".parse::<FieldPath>().unwrap(),
            FieldPath::RunStat(RunStat::Level)
        );
        assert_eq!(
            "totalHaul".parse::<FieldPath>().unwrap(),
            FieldPath::RunStat(RunStat::TotalHaul)
        );
        assert_eq!(
            "runStats.chargingstationcharge".parse::<FieldPath>().unwrap(),
            FieldPath::RunStat(RunStat::ChargingStationCharge)
        );
    }

    #[test]
    fn test_parse_player_paths() {
        assert_eq!(
            "playerHealth.76561198000000001".parse::<FieldPath>().unwrap(),
            FieldPath::PlayerHealth("76561198000000001".into())
        );
        assert_eq!(
            "playerUpgradeMapPlayerCount.42".parse::<FieldPath>().unwrap(),
            FieldPath::PlayerUpgrade(Upgrade::MapPlayerCount, "42".into())
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("runStats.gold".parse::<FieldPath>().unwrap_err().is_validation());
        assert!("playerUpgradeFlight.1".parse::<FieldPath>().is_err());
        assert!("playerHealth.".parse::<FieldPath>().is_err());
        assert!("nonsense".parse::<FieldPath>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let paths = [
            FieldPath::RunStat(RunStat::Lives),
            FieldPath::TeamName,
            FieldPath::PlayerHealth("7".into()),
            FieldPath::PlayerUpgrade(Upgrade::ExtraJump, "7".into()),
        ];
        for path in paths {
            assert_eq!(path.to_string().parse::<FieldPath>().unwrap(), path);
        }
    }

    #[test]
    fn test_player_field() {
        assert_eq!("playerHealth".parse::<PlayerField>().unwrap(), PlayerField::Health);
        assert_eq!(
            "playerUpgradeThrow".parse::<PlayerField>().unwrap(),
            PlayerField::Upgrade(Upgrade::Throw)
        );
        assert_eq!(
            PlayerField::Upgrade(Upgrade::Speed).for_player("9"),
            FieldPath::PlayerUpgrade(Upgrade::Speed, "9".into())
        );
        assert!("health".parse::<PlayerField>().is_err());
    }

    #[test]
    fn test_upgrade_table_keys() {
        assert_eq!(Upgrade::ALL.len(), 9);
        assert_eq!(Upgrade::Strength.table_key(), "playerUpgradeStrength");
    }
}
