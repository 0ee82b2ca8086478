// times locating particles over a sweep of problem sizes and writes csv results.

extern crate particle_locate as root;

use root::parsing::{get_config, Config};
use root::particles::time_seed;
use root::sweep::{run_sweep, write_sweep_output};
use root::{init_logging, parse_log_level};

#[macro_use]
extern crate tracing;

use std::process;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(rename_all = "kebab-case")]
struct Opt {
    #[structopt(long, default_value = "data/config.toml")]
    pub config_file: String,
    #[structopt(long)]
    pub seed: Option<u64>,
    #[structopt(long)]
    pub output_directory: Option<String>,
    #[structopt(long, default_value = "info")]
    pub log_level: String,
}

fn run(opts: Opt, mut config: Config) -> anyhow::Result<()> {
    config.sweep.output_directory = opts
        .output_directory
        .unwrap_or(config.sweep.output_directory);
    let seed = opts.seed.or(config.seed).unwrap_or_else(time_seed);
    info!("sweeping with seed {}", seed);

    let mut rng = StdRng::seed_from_u64(seed);
    let now = Instant::now();
    let records = run_sweep(&config.sweep, config.domain, &mut rng)?;
    info!(
        "{} runs finished in {}s",
        records.len(),
        now.elapsed().as_secs_f64()
    );

    let stats = write_sweep_output(&config.sweep.output_directory, &records)?;
    for s in &stats {
        info!(
            "{} N = {}, Nx = {}: mean {}s, std dev {}s",
            s.method, s.n, s.n_x, s.mean, s.std_dev
        );
    }
    Ok(())
}

fn main() {
    let opts = Opt::from_args();
    init_logging(parse_log_level(&opts.log_level, tracing::Level::INFO));

    let config = match get_config(Some(&opts.config_file)) {
        Ok(config) => config,
        Err(e) => {
            error!("couldn't read config file, {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(opts, config) {
        error!("{:#}", e);
        process::exit(1);
    }
}
