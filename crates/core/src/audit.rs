use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use types::{BalanceParams, BalanceResult, ClassLabel, RoomId};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct RoomOverflow {
    pub room: RoomId,
    pub occupants: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ClassOverflow {
    pub room: RoomId,
    pub class: ClassLabel,
    pub occupants: usize,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub room_overflows: Vec<RoomOverflow>,
    pub class_overflows: Vec<ClassOverflow>,
    /// Students counted in the allocations plus the unassigned list.
    pub placed_or_dropped: usize,
    /// `counts` disagrees with the lists it summarizes.
    pub counts_mismatch: bool,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.room_overflows.is_empty() && self.class_overflows.is_empty() && !self.counts_mismatch
    }
}

/// Recounts a result against the bounds it was produced under.
pub fn audit(result: &BalanceResult, params: &BalanceParams) -> AuditReport {
    let mut report = AuditReport::default();
    let max_room = params.max_per_room as usize;
    let max_class = params.max_per_class_in_room as usize;

    let mut assigned = 0usize;
    for a in &result.allocations {
        assigned += a.students.len();
        if a.students.len() > max_room {
            report.room_overflows.push(RoomOverflow {
                room: a.room.clone(),
                occupants: a.students.len(),
            });
        }

        let mut per_class: HashMap<&ClassLabel, usize> = HashMap::new();
        for s in &a.students {
            *per_class.entry(&s.class).or_default() += 1;
        }
        let mut over: Vec<_> = per_class
            .into_iter()
            .filter(|&(_, n)| n > max_class)
            .collect();
        over.sort_by(|x, y| x.0.cmp(y.0));
        for (class, n) in over {
            report.class_overflows.push(ClassOverflow {
                room: a.room.clone(),
                class: class.clone(),
                occupants: n,
            });
        }
    }

    report.placed_or_dropped = assigned + result.unassigned.len();
    let c = &result.counts;
    report.counts_mismatch = c.assigned != assigned
        || c.unassigned != result.unassigned.len()
        || c.total != report.placed_or_dropped;
    report
}
