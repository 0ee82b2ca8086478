extern crate particle_locate as root;

use root::parsing::{get_config, Config};
use root::prelude::*;
use root::report::{print_data, CrossCheck};
use root::{init_logging, parse_log_level};

#[macro_use]
extern crate tracing;

use std::process;
use std::time::Instant;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    rename_all = "kebab-case",
    about = "locate random particles on a uniform 1d grid"
)]
struct Opt {
    /// number of particles
    pub n: usize,
    /// number of grid points, at least 2
    pub n_x: usize,
    #[structopt(long)]
    pub config_file: Option<String>,
    /// overrides the config file seed
    #[structopt(long)]
    pub seed: Option<u64>,
    /// "binary" or "linear", overrides the config file locator
    #[structopt(long)]
    pub method: Option<LocatorKind>,
    /// print every grid point and particle
    #[structopt(short = "p", long)]
    pub print: bool,
    /// cross check the result against linear search
    #[structopt(long)]
    pub validate: bool,
    #[structopt(long, default_value = "warn")]
    pub log_level: String,
}

fn run(opts: Opt, mut config: Config) -> anyhow::Result<()> {
    // command line arguments win over the config file
    config.seed = opts.seed.or(config.seed);
    config.locator = opts.method.unwrap_or(config.locator);
    let Config {
        domain, locator, ..
    } = config;

    let grid = Grid::uniform(opts.n_x, domain.x_min, domain.x_max)?;

    let seed = config.seed.unwrap_or_else(time_seed);
    info!("generating {} particles with seed {}", opts.n, seed);
    let particles = ParticleSet::from_seed(opts.n, domain.x_min, domain.x_max, seed)?;

    let locator = construct_locator(locator);
    let now = Instant::now();
    let found = locator.locate_all(&grid, &particles);
    let elapsed = now.elapsed().as_secs_f64();
    SearchProfile::from_found(&found).pretty_print(locator.name(), elapsed);

    if opts.print {
        print_data(&grid, &particles, &found)?;
    }

    if opts.validate {
        let check = CrossCheck::run(&grid, &particles, &found);
        check.report(&particles, &found);
    }
    Ok(())
}

fn main() {
    let opts = Opt::from_args();
    init_logging(parse_log_level(&opts.log_level, tracing::Level::WARN));

    let config = match get_config(opts.config_file.as_deref()) {
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
