use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use orrery::{Simulation, SystemConfig};

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("orrery_advance");

    // Sun-only forces, the default.
    {
        let mut sim = Simulation::solar_system();
        group.throughput(Throughput::Elements(sim.bodies().len() as u64));
        group.bench_function("sun_only", |b| {
            b.iter(|| sim.advance());
        });
    }

    // Every pair, sequential vs Rayon.
    let mut config = SystemConfig::solar_system();
    config.physics.pairwise_interactions = true;
    config.physics.relativity = true;

    for use_rayon in [false, true] {
        let mut sim = Simulation::from_config(&config).expect("preset is valid");
        sim.set_use_rayon(use_rayon);
        let name = if use_rayon { "pairwise_rayon" } else { "pairwise" };
        group.bench_function(name, |b| {
            b.iter(|| sim.advance());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_advance);
criterion_main!(benches);
