use contigsim::contig::Contig;
use contigsim::dcj::dcj;
use contigsim::pool::SampleTree;
use contigsim::simulation::Model;
use contigsim::simulation::Parameters;
use contigsim::simulation::StartingState;
use rand::SeedableRng;
use rand::rngs::SmallRng;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        sampling_weighted_pool,
        churning_weighted_pool,
        rewriting_linear_pair,
        simulating_rearrangements,
}

fn sampling_weighted_pool(c: &mut criterion::Criterion) {
    let mut tree = SampleTree::default();
    for i in 1..=1000 {
        tree.insert(Contig::circular(i), i);
    }
    let ref mut rng = SmallRng::seed_from_u64(0);
    c.bench_function("sample a 1000-contig pool", |b| b.iter(|| tree.sample(rng)));
}

fn churning_weighted_pool(c: &mut criterion::Criterion) {
    let mut tree = SampleTree::default();
    for i in 1..=1000 {
        tree.insert(Contig::circular(i), i);
    }
    let ref mut rng = SmallRng::seed_from_u64(1);
    c.bench_function("replace a sampled contig", |b| {
        b.iter(|| {
            let (slot, _) = tree.sample(rng).expect("weighted pool");
            let contig = tree.remove(slot);
            tree.insert(contig, contig.num_bases())
        })
    });
}

fn rewriting_linear_pair(c: &mut criterion::Criterion) {
    let c1 = Contig::linear(1_000_000);
    let c2 = Contig::linear(500_000);
    c.bench_function("dcj across two linear contigs", |b| {
        b.iter(|| dcj(&c1, 123_456, 98_765, true, Some(&c2)))
    });
}

fn simulating_rearrangements(c: &mut criterion::Criterion) {
    c.bench_function("simulate 1000 time units", |b| {
        b.iter(|| {
            let mut model = Model::new(42);
            let parameters = Parameters {
                n: 10_000,
                rll: 0.001,
                ..Parameters::default()
            };
            model.set_parameters(parameters).expect("parameters");
            model
                .set_starting_state(StartingState { garbage: 0, linear: 20, circular: 5 })
                .expect("starting state");
            model.simulate(1_000.);
            model.counters().total()
        })
    });
}
