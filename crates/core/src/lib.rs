pub mod audit;
pub mod table;

use async_trait::async_trait;
use thiserror::Error;

pub use types::{
    BalanceEnvelope, BalanceParams, BalanceResult, ClassLabel, Columns, Counts, Room,
    RoomAllocation, RoomId, Student, StudentId,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{table} table is missing columns: {}", .columns.join(", "))]
    MissingColumns {
        table: &'static str,
        columns: Vec<String>,
    },
    #[error("invalid input: {0}")]
    Msg(String),
}

/// Trims room labels and drops the blank ones, as empty label cells are
/// dropped when reading the rooms sheet.
pub fn normalize(mut env: BalanceEnvelope) -> BalanceEnvelope {
    env.rooms.retain(|r| !r.id.0.trim().is_empty());
    for r in &mut env.rooms {
        r.id.0 = r.id.0.trim().to_string();
    }
    env
}

/// Checks an envelope before it is handed to a balancer.
///
/// Every problem found is reported, joined with `; `.
pub fn validate(env: &BalanceEnvelope) -> Result<(), ValidationError> {
    let mut errors: Vec<String> = Vec::new();

    if env.rooms.is_empty() {
        errors.push("rooms is empty".into());
    }

    let mut seen = std::collections::HashSet::new();
    for r in &env.rooms {
        if r.id.0.trim().is_empty() {
            errors.push("room label is blank".into());
            continue;
        }
        if !seen.insert(r.id.0.as_str()) {
            errors.push(format!("duplicate room id: {}", r.id));
        }
    }

    let p = &env.params;
    if p.max_per_room == 0 {
        errors.push("maxPerRoom must be at least 1".into());
    }
    if p.max_per_class_in_room == 0 {
        errors.push("maxPerClassInRoom must be at least 1".into());
    }
    if p.attempts == 0 {
        errors.push("attempts must be at least 1".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Msg(errors.join("; ")))
    }
}

#[async_trait]
pub trait Balancer: Send + Sync + 'static {
    async fn balance(&self, env: BalanceEnvelope) -> anyhow::Result<BalanceResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(rooms: &[&str]) -> BalanceEnvelope {
        BalanceEnvelope {
            rooms: rooms.iter().map(|r| Room::new(r)).collect(),
            students: vec![Student::new("001", "7A", "Smith", "Ann")],
            params: BalanceParams::default(),
        }
    }

    #[test]
    fn accepts_well_formed_envelope() {
        assert_eq!(validate(&env(&["A101", "A102"])), Ok(()));
    }

    #[test]
    fn reports_every_problem_at_once() {
        let mut e = env(&[]);
        e.params.attempts = 0;
        e.params.max_per_room = 0;
        let Err(ValidationError::Msg(msg)) = validate(&e) else {
            panic!("expected validation failure");
        };
        assert!(msg.contains("rooms is empty"));
        assert!(msg.contains("maxPerRoom"));
        assert!(msg.contains("attempts"));
        assert!(!msg.contains("maxPerClassInRoom"));
    }

    #[test]
    fn rejects_duplicate_and_blank_rooms() {
        let Err(ValidationError::Msg(msg)) = validate(&env(&["A", " ", "A"])) else {
            panic!("expected validation failure");
        };
        assert_eq!(msg, "room label is blank; duplicate room id: A");
    }

    #[test]
    fn normalize_drops_blank_rooms_and_trims() {
        let e = normalize(env(&[" A101 ", "", "  ", "007"]));
        let ids: Vec<&str> = e.rooms.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["A101", "007"]);
        assert_eq!(validate(&e), Ok(()));
    }

    #[test]
    fn missing_columns_message_names_them() {
        let e = ValidationError::MissingColumns {
            table: "students",
            columns: vec!["Аты".into(), "Тегі".into()],
        };
        assert_eq!(e.to_string(), "students table is missing columns: Аты, Тегі");
    }
}
