use balancer::{run, Bounds};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;
use types::{Room, Student};

fn school(n_students: usize, n_classes: usize) -> Vec<Student> {
    (0..n_students)
        .map(|i| {
            Student::new(
                &format!("{i:012}"),
                &format!("{}{}", 5 + i % n_classes / 4, (b'A' + (i % 4) as u8) as char),
                "Family",
                "Given",
            )
        })
        .collect()
}

fn bench_balance(c: &mut Criterion) {
    let mut group = c.benchmark_group("balance");
    for &(n_students, n_rooms) in &[(120usize, 6usize), (500, 22), (1500, 66)] {
        let students = school(n_students, 28);
        let rooms: Vec<Room> = (0..n_rooms).map(|i| Room::new(&format!("A{i:03}"))).collect();
        let bounds = Bounds {
            max_per_room: 23,
            max_per_class_in_room: 3,
            attempts: 50,
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{n_students}x{n_rooms}")),
            &(students, rooms),
            |b, (students, rooms)| {
                b.iter(|| {
                    let mut rng = ChaCha8Rng::seed_from_u64(7);
                    black_box(run(students, rooms, &bounds, &mut rng).map(|o| o.best.unassigned.len()))
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_balance);
criterion_main!(benches);
