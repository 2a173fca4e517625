pub mod contig;
pub mod dcj;
pub mod experiment;
pub mod pool;
pub mod simulation;

/// dimensional analysis types
pub type Bases = u64;
pub type Edges = u64;
pub type Time = f64;
pub type Rate = f64;
pub type Probability = f64;
pub type Seed = u64;

/// sample tree branching factor; throughput is flat across [2, 16]
pub const DEFAULT_DEGREE: usize = 4;

/// trait for random generation, mainly (strictly?) for testing
pub trait Arbitrary {
    fn random() -> Self;
}

/// initialize terminal logging
pub fn init() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("initialize logger");
}
