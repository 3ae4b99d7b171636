use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Clone,
            Debug,
            Serialize,
            Deserialize,
            ToSchema,
            JsonSchema,
            Eq,
            PartialEq,
            Ord,
            PartialOrd,
            Hash,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}
id_newtype!(StudentId);
id_newtype!(ClassLabel);
id_newtype!(RoomId);

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub class: ClassLabel,
    pub family_name: String,
    pub given_name: String,
}

impl Student {
    pub fn new(id: &str, class: &str, family_name: &str, given_name: &str) -> Self {
        Self {
            id: id.into(),
            class: class.into(),
            family_name: family_name.to_string(),
            given_name: given_name.to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq)]
pub struct Room {
    pub id: RoomId,
}

impl Room {
    pub fn new(id: &str) -> Self {
        Self { id: id.into() }
    }
}

pub const DEFAULT_MAX_PER_ROOM: u32 = 23;
pub const DEFAULT_MAX_PER_CLASS_IN_ROOM: u32 = 3;
pub const DEFAULT_ATTEMPTS: u32 = 400;

fn default_max_per_room() -> u32 {
    DEFAULT_MAX_PER_ROOM
}
fn default_max_per_class_in_room() -> u32 {
    DEFAULT_MAX_PER_CLASS_IN_ROOM
}
fn default_attempts() -> u32 {
    DEFAULT_ATTEMPTS
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceParams {
    #[serde(default = "default_max_per_room")]
    pub max_per_room: u32,
    #[serde(default = "default_max_per_class_in_room")]
    pub max_per_class_in_room: u32,
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    /// Fixed seed for reproducible runs. Drawn from the OS when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for BalanceParams {
    fn default() -> Self {
        Self {
            max_per_room: DEFAULT_MAX_PER_ROOM,
            max_per_class_in_room: DEFAULT_MAX_PER_CLASS_IN_ROOM,
            attempts: DEFAULT_ATTEMPTS,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct BalanceEnvelope {
    pub rooms: Vec<Room>,
    pub students: Vec<Student>,
    #[serde(default)]
    pub params: BalanceParams,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq)]
pub struct RoomAllocation {
    pub room: RoomId,
    pub students: Vec<Student>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq)]
pub struct Improvement {
    pub attempt: u32,
    pub unassigned: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct BalanceStats {
    pub seed: u64,
    pub attempts_run: u32,
    pub best_attempt: u32,
    #[serde(default)]
    pub improvements: Vec<Improvement>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Default, Eq, PartialEq)]
pub struct Counts {
    pub total: usize,
    pub assigned: usize,
    pub unassigned: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema)]
pub struct BalanceResult {
    /// One entry per room, in the order the rooms were supplied.
    pub allocations: Vec<RoomAllocation>,
    pub unassigned: Vec<Student>,
    pub counts: Counts,
    pub stats: BalanceStats,
}

/// Header names expected in the uploaded tables and used in the reports.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, JsonSchema, Eq, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Columns {
    pub room: String,
    pub id: String,
    pub class: String,
    pub family_name: String,
    pub given_name: String,
    pub index: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            room: "Кабинет".into(),
            id: "ИИН".into(),
            class: "Сыныбы".into(),
            family_name: "Тегі".into(),
            given_name: "Аты".into(),
            index: "№".into(),
        }
    }
}

impl Columns {
    pub fn student_columns(&self) -> [&str; 4] {
        [
            self.id.as_str(),
            self.class.as_str(),
            self.family_name.as_str(),
            self.given_name.as_str(),
        ]
    }
}
