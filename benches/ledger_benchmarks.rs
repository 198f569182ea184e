use chrono::Duration;
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use parking_ledger::core::{LedgerBuilder, ManualClock, ParkingLedger};
use std::sync::Arc;

fn full_ledger(total_slots: usize) -> (ParkingLedger, Vec<String>) {
    let mut ledger = LedgerBuilder::new()
        .total_slots(total_slots)
        .seed(1)
        .build()
        .unwrap();
    let tokens = (0..total_slots)
        .map(|i| {
            ledger
                .park("Owner", "0000000000", &format!("PLATE-{i}"), 1)
                .unwrap()
                .to_string()
        })
        .collect();
    (ledger, tokens)
}

fn bench_park(c: &mut Criterion) {
    c.bench_function("park into empty ledger of 1000", |b| {
        b.iter_batched(
            || LedgerBuilder::new().total_slots(1000).seed(2).build().unwrap(),
            |mut ledger| {
                for i in 0..100 {
                    black_box(ledger.park("Owner", "000", &format!("P{i}"), 2).unwrap());
                }
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("park into nearly full ledger", |b| {
        b.iter_batched(
            || {
                let (mut ledger, tokens) = full_ledger(500);
                ledger.remove(&tokens[250]).unwrap();
                ledger
            },
            |mut ledger| black_box(ledger.park("Late", "000", "LATE-1", 3).unwrap()),
            BatchSize::SmallInput,
        );
    });
}

fn bench_remove(c: &mut Criterion) {
    c.bench_function("remove and bill from ledger of 500", |b| {
        b.iter_batched(
            || {
                let clock = Arc::new(ManualClock::starting_now());
                let mut ledger = LedgerBuilder::new()
                    .total_slots(500)
                    .clock(Arc::clone(&clock))
                    .seed(3)
                    .build()
                    .unwrap();
                let token = ledger.park("Owner", "000", "BENCH", 5).unwrap();
                for i in 0..499 {
                    ledger.park("Owner", "000", &format!("P{i}"), 1).unwrap();
                }
                clock.advance(Duration::minutes(137));
                (ledger, token)
            },
            |(mut ledger, token)| black_box(ledger.remove(token.as_str()).unwrap()),
            BatchSize::SmallInput,
        );
    });
}

fn bench_listing(c: &mut Criterion) {
    let (ledger, _) = full_ledger(1000);
    c.bench_function("iterate occupied ledger of 1000", |b| {
        b.iter(|| {
            let count = ledger
                .occupied()
                .vehicles()
                .map_or(0, |vehicles| vehicles.iter().count());
            black_box(count)
        });
    });
}

criterion_group!(benches, bench_park, bench_remove, bench_listing);
criterion_main!(benches);
