use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wiredit_editor::{DocumentHistory, GuardConfig, ReconciliationGuard, DEFAULT_TEMPLATE};

fn bench_history_push(c: &mut Criterion) {
    let snapshots: Vec<String> = (0..100)
        .map(|i| format!("{DEFAULT_TEMPLATE}\n# revision {i}"))
        .collect();

    c.bench_function("history_push_evict", |b| {
        b.iter(|| {
            let mut history = DocumentHistory::new(DEFAULT_TEMPLATE);
            for snapshot in &snapshots {
                history.push(black_box(snapshot.as_str()));
            }
            history
        })
    });
}

fn bench_guard_edit_undo(c: &mut Criterion) {
    c.bench_function("guard_edit_undo_redo", |b| {
        b.iter(|| {
            let mut guard = ReconciliationGuard::new(GuardConfig::default());
            for i in 0..20 {
                guard.on_user_edit(format!("rev {i}"));
            }
            while guard.undo().is_ok() {}
            while guard.redo().is_ok() {}
            black_box(guard.text().len())
        })
    });
}

criterion_group!(benches, bench_history_push, bench_guard_edit_undo);
criterion_main!(benches);
