use anyhow::Result;
use clap::Parser;
use contigsim::Bases;
use contigsim::Rate;
use contigsim::Seed;
use contigsim::Time;
use contigsim::experiment::Experiment;
use contigsim::experiment::Trial;
use contigsim::pool::Category;
use contigsim::simulation::Parameters;
use contigsim::simulation::StartingState;
use std::path::PathBuf;

/// run a dcj rearrangement experiment and summarize the contig size
/// distribution per category
#[derive(Parser, Debug)]
#[command(name = "contigsim", version, about)]
struct Args {
    /// number of replicates to run
    #[arg(long, default_value_t = 50)]
    replicates: usize,
    /// histogram bin size in bases
    #[arg(long, default_value_t = 1_000_000)]
    bin_size: Bases,
    /// total base count
    #[arg(long, default_value_t = 3_000_000_000)]
    n: Bases,
    /// simulated time horizon
    #[arg(long, default_value_t = 10_000.)]
    t: Time,
    /// live-live dcj rate per base; defaults to 1/n
    #[arg(long)]
    rll: Option<Rate>,
    /// live-dead dcj rate per base
    #[arg(long, default_value_t = 0.)]
    rld: Rate,
    /// dead-dead dcj rate per base
    #[arg(long, default_value_t = 0.)]
    rdd: Rate,
    /// telomere loss modifier in [0, 1]
    #[arg(long, default_value_t = 0.)]
    fl: f64,
    /// telomere gain modifier in [0, 1]
    #[arg(long, default_value_t = 0.)]
    fg: f64,
    /// probability a dead-dead fission spawns a live piece
    #[arg(long, default_value_t = 0.)]
    pgain: f64,
    /// dead garbage contig size in bases
    #[arg(long, default_value_t = 0)]
    garbage: Bases,
    /// starting linear contig count
    #[arg(long, default_value_t = 25)]
    linear: usize,
    /// starting circular contig count
    #[arg(long, default_value_t = 0)]
    circular: usize,
    /// base seed for the replicate rngs
    #[arg(long, default_value_t = 2012)]
    seed: Seed,
    /// save the finished experiment to this path
    #[arg(long, conflicts_with = "load_sim")]
    save_sim: Option<PathBuf>,
    /// load a previously saved experiment instead of running
    #[arg(long)]
    load_sim: Option<PathBuf>,
    /// print the full results as json
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    contigsim::init();
    let args = Args::parse();
    let experiment = match args.load_sim {
        Some(ref path) => Experiment::load(path)?,
        None => {
            let mut experiment = Experiment::new(args.seed);
            experiment.add_parameters(
                args.t,
                Parameters {
                    n: args.n,
                    rll: args.rll.unwrap_or(1. / args.n as Rate),
                    rld: args.rld,
                    rdd: args.rdd,
                    fl: args.fl,
                    fg: args.fg,
                    pgain: args.pgain,
                },
            );
            experiment.add_starting_state(StartingState {
                garbage: args.garbage,
                linear: args.linear,
                circular: args.circular,
            });
            experiment.run(args.replicates, args.bin_size)?;
            experiment
        }
    };
    if let Some(ref path) = args.save_sim {
        experiment.save(path)?;
    }
    for trial in experiment.results() {
        summarize(trial, experiment.bin_size());
    }
    if args.json {
        println!("{}", experiment.json()?);
    }
    Ok(())
}

/// per-category contig and base totals from the mean histograms, binned
/// so the base figures are approximate
fn summarize(trial: &Trial, bin_size: Bases) {
    println!(
        "t={} n={} garbage={} linear={} circular={}",
        trial.horizon,
        trial.parameters.n,
        trial.start.garbage,
        trial.start.linear,
        trial.start.circular
    );
    for &category in [Category::AliveLinear, Category::AliveCircular, Category::Dead].iter() {
        let mean = trial.mean(category);
        let contigs = mean.values().sum::<f64>();
        let bases = mean
            .iter()
            .map(|(&bin, &count)| bin as f64 * bin_size as f64 * count)
            .sum::<f64>();
        println!("{}: contigs={:.1} bases={:.0}", category, contigs, bases);
    }
}
