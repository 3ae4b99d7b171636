//! Randomized multi-attempt room balancer.
//!
//! Each attempt walks the students class by class, largest class first, and
//! drops every student into the room that currently holds the fewest of
//! their classmates, then the fewest occupants overall. Nothing is undone
//! within an attempt; quality comes from retrying with fresh orderings and
//! keeping the attempt that left the fewest students without a seat.

use async_trait::async_trait;
use rand::{seq::SliceRandom, Rng};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use seat_core::{BalanceEnvelope, BalanceResult, Balancer};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};
use types::{BalanceParams, BalanceStats, Counts, Improvement, Room, RoomAllocation, Student};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BalanceError {
    #[error("{0} must be at least 1")]
    ZeroBound(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub max_per_room: u32,
    pub max_per_class_in_room: u32,
    pub attempts: u32,
}

impl Bounds {
    fn check(&self) -> Result<(), BalanceError> {
        if self.max_per_room == 0 {
            return Err(BalanceError::ZeroBound("max_per_room"));
        }
        if self.max_per_class_in_room == 0 {
            return Err(BalanceError::ZeroBound("max_per_class_in_room"));
        }
        if self.attempts == 0 {
            return Err(BalanceError::ZeroBound("attempts"));
        }
        Ok(())
    }
}

impl From<&BalanceParams> for Bounds {
    fn from(p: &BalanceParams) -> Self {
        Self {
            max_per_room: p.max_per_room,
            max_per_class_in_room: p.max_per_class_in_room,
            attempts: p.attempts,
        }
    }
}

/// Students grouped by class label, classes in order of first appearance.
struct Classes {
    members: Vec<Vec<usize>>,
    of_student: Vec<usize>,
}

impl Classes {
    fn group(students: &[Student]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut members: Vec<Vec<usize>> = Vec::new();
        let mut of_student = Vec::with_capacity(students.len());
        for (si, s) in students.iter().enumerate() {
            let ci = *index.entry(s.class.as_str()).or_insert_with(|| {
                members.push(Vec::new());
                members.len() - 1
            });
            members[ci].push(si);
            of_student.push(ci);
        }
        Self {
            members,
            of_student,
        }
    }

    fn len(&self) -> usize {
        self.members.len()
    }
}

/// Student indices placed per room, plus those left over.
#[derive(Clone, Debug)]
pub struct Attempt {
    pub rooms: Vec<Vec<usize>>,
    pub unassigned: Vec<usize>,
}

#[derive(Clone, Debug)]
pub struct Outcome {
    pub best: Attempt,
    pub attempts_run: u32,
    /// 1-based number of the attempt that produced `best`.
    pub best_attempt: u32,
    pub improvements: Vec<Improvement>,
}

fn processing_order<R: Rng + ?Sized>(classes: &Classes, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<(usize, f64)> = (0..classes.len()).map(|c| (c, rng.gen())).collect();
    order.sort_by(|a, b| {
        classes.members[b.0]
            .len()
            .cmp(&classes.members[a.0].len())
            .then(a.1.total_cmp(&b.1))
    });

    let mut seq = Vec::with_capacity(classes.of_student.len());
    for (c, _) in order {
        let mut members = classes.members[c].clone();
        members.shuffle(rng);
        seq.extend(members);
    }
    seq
}

fn attempt<R: Rng + ?Sized>(
    classes: &Classes,
    n_rooms: usize,
    bounds: &Bounds,
    rng: &mut R,
) -> Attempt {
    let n_classes = classes.len();
    let mut sizes = vec![0u32; n_rooms];
    let mut class_counts = vec![0u32; n_rooms * n_classes];
    let mut rooms: Vec<Vec<usize>> = vec![Vec::new(); n_rooms];
    let mut unassigned = Vec::new();
    let mut candidates: Vec<usize> = Vec::with_capacity(n_rooms);

    for s in processing_order(classes, rng) {
        let c = classes.of_student[s];

        // Lexicographic minimum of (classmates in room, room size) over rooms
        // that still have space for this class.
        candidates.clear();
        let mut best = (u32::MAX, u32::MAX);
        for r in 0..n_rooms {
            let in_class = class_counts[r * n_classes + c];
            if sizes[r] >= bounds.max_per_room || in_class >= bounds.max_per_class_in_room {
                continue;
            }
            let key = (in_class, sizes[r]);
            if key < best {
                best = key;
                candidates.clear();
            }
            if key == best {
                candidates.push(r);
            }
        }

        match candidates.choose(rng) {
            Some(&r) => {
                rooms[r].push(s);
                sizes[r] += 1;
                class_counts[r * n_classes + c] += 1;
            }
            None => unassigned.push(s),
        }
    }

    Attempt { rooms, unassigned }
}

/// Runs up to `bounds.attempts` attempts and keeps the one with the fewest
/// unassigned students. Stops as soon as an attempt places everyone.
///
/// An empty room list is accepted and leaves every student unassigned.
pub fn run<R: Rng + ?Sized>(
    students: &[Student],
    rooms: &[Room],
    bounds: &Bounds,
    rng: &mut R,
) -> Result<Outcome, BalanceError> {
    bounds.check()?;
    let classes = Classes::group(students);

    let first = attempt(&classes, rooms.len(), bounds, rng);
    let mut out = Outcome {
        improvements: vec![Improvement {
            attempt: 1,
            unassigned: first.unassigned.len(),
        }],
        best: first,
        attempts_run: 1,
        best_attempt: 1,
    };

    while out.attempts_run < bounds.attempts && !out.best.unassigned.is_empty() {
        out.attempts_run += 1;
        let a = attempt(&classes, rooms.len(), bounds, rng);
        if a.unassigned.len() < out.best.unassigned.len() {
            debug!(
                attempt = out.attempts_run,
                unassigned = a.unassigned.len(),
                "improved"
            );
            out.improvements.push(Improvement {
                attempt: out.attempts_run,
                unassigned: a.unassigned.len(),
            });
            out.best = a;
            out.best_attempt = out.attempts_run;
        }
    }

    Ok(out)
}

impl Outcome {
    pub fn into_result(self, students: &[Student], rooms: &[Room], seed: u64) -> BalanceResult {
        let pick = |idx: &[usize]| -> Vec<Student> {
            idx.iter().map(|&i| students[i].clone()).collect()
        };
        let allocations: Vec<RoomAllocation> = rooms
            .iter()
            .zip(&self.best.rooms)
            .map(|(room, idx)| RoomAllocation {
                room: room.id.clone(),
                students: pick(idx),
            })
            .collect();
        let unassigned = pick(&self.best.unassigned);

        BalanceResult {
            counts: Counts {
                total: students.len(),
                assigned: students.len() - unassigned.len(),
                unassigned: unassigned.len(),
            },
            allocations,
            unassigned,
            stats: BalanceStats {
                seed,
                attempts_run: self.attempts_run,
                best_attempt: self.best_attempt,
                improvements: self.improvements,
            },
        }
    }
}

/// Balances an envelope with a ChaCha8 stream seeded from `params.seed`, or
/// from the thread RNG when no seed is given. The seed used is reported in
/// the result stats.
pub fn balance(env: &BalanceEnvelope) -> Result<BalanceResult, BalanceError> {
    let seed = env
        .params
        .seed
        .unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let bounds = Bounds::from(&env.params);

    let out = run(&env.students, &env.rooms, &bounds, &mut rng)?;
    let res = out.into_result(&env.students, &env.rooms, seed);
    info!(
        seed,
        students = res.counts.total,
        rooms = env.rooms.len(),
        attempts = res.stats.attempts_run,
        unassigned = res.counts.unassigned,
        "balanced"
    );
    Ok(res)
}

pub struct HeurBalancer;
impl HeurBalancer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeurBalancer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Balancer for HeurBalancer {
    async fn balance(&self, env: BalanceEnvelope) -> anyhow::Result<BalanceResult> {
        seat_core::validate(&env)?;
        Ok(balance(&env)?)
    }
}
