// timing sweeps over power-of-two problem sizes, written out as csv.

use crate::grid::Grid;
use crate::locator::{construct_locator, LocatorKind};
use crate::parsing::{Domain, SweepSettings};
use crate::particles::ParticleSet;
use crate::profile::SearchProfile;

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::hint::black_box;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{ensure, Context};
use rand::Rng;

/// Largest exponent a sweep accepts for N or N_x.
pub const MAX_LOG2_SIZE: u32 = 32;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProblemSize {
    pub n: usize,
    pub n_x: usize,
}

/// Every `(2^a, 2^b)` for `a` in `log2_n` and `b` in `log2_nx`, both inclusive.
pub fn problem_sizes(log2_n: (u32, u32), log2_nx: (u32, u32)) -> Vec<ProblemSize> {
    let mut sizes = Vec::new();
    for a in log2_n.0..=log2_n.1 {
        for b in log2_nx.0..=log2_nx.1 {
            sizes.push(ProblemSize {
                n: 1 << a,
                n_x: 1 << b,
            });
        }
    }
    sizes
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RunRecord {
    pub method: LocatorKind,
    pub n: usize,
    pub n_x: usize,
    /// 1-based
    pub run: usize,
    /// seconds spent locating all particles
    pub runtime: f64,
}

/// Builds fresh particles for one run and times locating all of them.
pub fn time_run<R: Rng + ?Sized>(
    method: LocatorKind,
    grid: &Grid,
    n: usize,
    domain: Domain,
    run: usize,
    rng: &mut R,
) -> anyhow::Result<(RunRecord, SearchProfile)> {
    let locator = construct_locator(method);
    let particles = ParticleSet::generate(n, domain.x_min, domain.x_max, rng)?;

    let now = Instant::now();
    let found = black_box(locator.locate_all(grid, black_box(&particles)));
    let runtime = now.elapsed().as_secs_f64();

    let record = RunRecord {
        method,
        n,
        n_x: grid.len(),
        run,
        runtime,
    };
    Ok((record, SearchProfile::from_found(&found)))
}

fn validate(settings: &SweepSettings) -> anyhow::Result<()> {
    let SweepSettings {
        log2_n,
        log2_nx,
        runs,
        methods,
        ..
    } = settings;
    ensure!(*runs > 0, "a sweep needs at least one run per problem size");
    ensure!(!methods.is_empty(), "a sweep needs at least one locator");
    ensure!(
        log2_n.0 <= log2_n.1 && log2_nx.0 <= log2_nx.1,
        "exponent ranges must be ordered, got {:?} and {:?}",
        log2_n,
        log2_nx
    );
    ensure!(
        log2_n.1 <= MAX_LOG2_SIZE && log2_nx.1 <= MAX_LOG2_SIZE,
        "exponents must be at most {}, got {:?} and {:?}",
        MAX_LOG2_SIZE,
        log2_n,
        log2_nx
    );
    ensure!(log2_nx.0 >= 1, "grids need at least 2 points, log2_nx must start at 1 or more");
    Ok(())
}

pub fn run_sweep<R: Rng + ?Sized>(
    settings: &SweepSettings,
    domain: Domain,
    rng: &mut R,
) -> anyhow::Result<Vec<RunRecord>> {
    validate(settings)?;

    let sizes = problem_sizes(settings.log2_n, settings.log2_nx);
    let mut records = Vec::with_capacity(sizes.len() * settings.methods.len() * settings.runs);
    for size in sizes {
        let grid = Grid::uniform(size.n_x, domain.x_min, domain.x_max)?;
        for &method in &settings.methods {
            info!(
                "timing {} search with N = {}, Nx = {} over {} runs",
                method, size.n, size.n_x, settings.runs
            );
            let mut profile = SearchProfile::default();
            for run in 1..=settings.runs {
                let (record, run_profile) = time_run(method, &grid, size.n, domain, run, rng)?;
                debug!("run {} took {}s", run, record.runtime);
                profile = profile.combine(run_profile);
                records.push(record);
            }
            if profile.not_found > 0 {
                warn!(
                    "{} of {} particles were not located for N = {}, Nx = {}",
                    profile.not_found, profile.queries, size.n, size.n_x
                );
            }
        }
    }
    Ok(records)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RuntimeStats {
    pub method: LocatorKind,
    pub n: usize,
    pub n_x: usize,
    pub runs: usize,
    pub mean: f64,
    /// sample standard deviation, 0 for a single run
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl RuntimeStats {
    pub fn from_runtimes(method: LocatorKind, n: usize, n_x: usize, runtimes: &[f64]) -> Self {
        let runs = runtimes.len();
        let mean = runtimes.iter().sum::<f64>() / runs as f64;
        let std_dev = if runs > 1 {
            let variance = runtimes.iter().map(|t| (t - mean).powi(2)).sum::<f64>()
                / (runs - 1) as f64;
            variance.sqrt()
        } else {
            0.0
        };
        let min = runtimes.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = runtimes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        RuntimeStats {
            method,
            n,
            n_x,
            runs,
            mean,
            std_dev,
            min,
            max,
        }
    }
}

/// One entry per (N, Nx, method), ordered by N, then Nx, then method.
pub fn summarize(records: &[RunRecord]) -> Vec<RuntimeStats> {
    let mut groups: BTreeMap<(usize, usize, LocatorKind), Vec<f64>> = BTreeMap::new();
    for record in records {
        groups
            .entry((record.n, record.n_x, record.method))
            .or_default()
            .push(record.runtime);
    }
    groups
        .into_iter()
        .map(|((n, n_x, method), runtimes)| RuntimeStats::from_runtimes(method, n, n_x, &runtimes))
        .collect()
}

pub fn write_raw_csv<W: Write>(out: &mut W, records: &[RunRecord]) -> io::Result<()> {
    writeln!(out, "method,N,Nx,nrun,runtime")?;
    for record in records {
        writeln!(
            out,
            "{},{},{},{},{}",
            record.method, record.n, record.n_x, record.run, record.runtime
        )?;
    }
    Ok(())
}

pub fn write_summary_csv<W: Write>(out: &mut W, stats: &[RuntimeStats]) -> io::Result<()> {
    writeln!(out, "method,N,Nx,runs,mean,std_dev,min,max")?;
    for s in stats {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            s.method, s.n, s.n_x, s.runs, s.mean, s.std_dev, s.min, s.max
        )?;
    }
    Ok(())
}

fn ensure_directory(path: &Path) -> anyhow::Result<()> {
    if path.is_dir() {
        info!("directory '{}' already exists", path.display());
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory {}", path.display()))?;
        info!("directory '{}' created", path.display());
    }
    Ok(())
}

fn write_csv_file<F>(path: &Path, write: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write(&mut out)
        .and_then(|_| out.flush())
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

/// Writes `<dir>/N<N>/raw.csv` for every particle count and `<dir>/summary.csv`.
pub fn write_sweep_output<P: AsRef<Path>>(
    directory: P,
    records: &[RunRecord],
) -> anyhow::Result<Vec<RuntimeStats>> {
    let directory = directory.as_ref();
    ensure_directory(directory)?;

    let mut by_n: BTreeMap<usize, Vec<RunRecord>> = BTreeMap::new();
    for record in records {
        by_n.entry(record.n).or_default().push(*record);
    }
    for (n, n_records) in &by_n {
        let n_directory = directory.join(format!("N{}", n));
        ensure_directory(&n_directory)?;
        write_csv_file(&n_directory.join("raw.csv"), |out| {
            write_raw_csv(out, n_records)
        })?;
    }

    let stats = summarize(records);
    write_csv_file(&directory.join("summary.csv"), |out| {
        write_summary_csv(out, &stats)
    })?;
    Ok(stats)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(method: LocatorKind, n: usize, n_x: usize, run: usize, runtime: f64) -> RunRecord {
        RunRecord {
            method,
            n,
            n_x,
            run,
            runtime,
        }
    }

    #[test]
    fn test_problem_sizes() {
        let sizes = problem_sizes((1, 2), (3, 4));
        let expected = [(2, 8), (2, 16), (4, 8), (4, 16)];
        assert_eq!(sizes.len(), expected.len());
        for (size, &(n, n_x)) in sizes.iter().zip(expected.iter()) {
            assert_eq!(*size, ProblemSize { n, n_x });
        }
    }

    #[test]
    fn test_runtime_stats() {
        let stats = RuntimeStats::from_runtimes(LocatorKind::Binary, 8, 16, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(stats.runs, 4);
        assert_relative_eq!(stats.mean, 2.5);
        assert_relative_eq!(stats.std_dev, (5.0f64 / 3.0).sqrt());
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);

        let single = RuntimeStats::from_runtimes(LocatorKind::Linear, 8, 16, &[0.5]);
        assert_eq!(single.std_dev, 0.0);
        assert_eq!(single.mean, 0.5);
    }

    #[test]
    fn test_summarize_groups_and_orders() {
        let records = vec![
            record(LocatorKind::Linear, 4, 8, 1, 3.0),
            record(LocatorKind::Binary, 4, 8, 1, 1.0),
            record(LocatorKind::Binary, 2, 8, 1, 0.5),
            record(LocatorKind::Binary, 4, 8, 2, 2.0),
        ];
        let stats = summarize(&records);
        assert_eq!(stats.len(), 3);
        assert_eq!((stats[0].n, stats[0].method), (2, LocatorKind::Binary));
        assert_eq!((stats[1].n, stats[1].method, stats[1].runs), (4, LocatorKind::Binary, 2));
        assert_relative_eq!(stats[1].mean, 1.5);
        assert_eq!((stats[2].n, stats[2].method), (4, LocatorKind::Linear));
    }

    #[test]
    fn test_raw_csv() {
        let records = vec![
            record(LocatorKind::Binary, 1024, 2048, 1, 0.25),
            record(LocatorKind::Binary, 1024, 2048, 2, 0.5),
        ];
        let mut buffer = Vec::new();
        write_raw_csv(&mut buffer, &records).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "method,N,Nx,nrun,runtime\nbinary,1024,2048,1,0.25\nbinary,1024,2048,2,0.5\n"
        );
    }

    #[test]
    fn test_summary_csv_header() {
        let stats = summarize(&[record(LocatorKind::Linear, 2, 4, 1, 1.0)]);
        let mut buffer = Vec::new();
        write_summary_csv(&mut buffer, &stats).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("method,N,Nx,runs,mean,std_dev,min,max"));
        assert_eq!(lines.next(), Some("linear,2,4,1,1,0,1,1"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_small_sweep() {
        let settings = SweepSettings {
            log2_n: (0, 3),
            log2_nx: (1, 4),
            runs: 2,
            methods: vec![LocatorKind::Binary, LocatorKind::Linear],
            output_directory: String::new(),
        };
        let mut rng = StdRng::seed_from_u64(5);
        let records = run_sweep(&settings, Domain::default(), &mut rng).unwrap();
        assert_eq!(records.len(), 4 * 4 * 2 * 2);
        assert!(records.iter().all(|r| r.runtime >= 0.0 && (1..=2).contains(&r.run)));
        assert_eq!(summarize(&records).len(), 4 * 4 * 2);
    }

    #[test]
    fn test_sweep_rejects_bad_settings() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut settings = SweepSettings {
            log2_n: (0, 1),
            log2_nx: (0, 1),
            ..SweepSettings::default()
        };
        assert!(run_sweep(&settings, Domain::default(), &mut rng).is_err());
        settings.log2_nx = (1, 1);
        settings.runs = 0;
        assert!(run_sweep(&settings, Domain::default(), &mut rng).is_err());
        settings.runs = 1;
        settings.methods.clear();
        assert!(run_sweep(&settings, Domain::default(), &mut rng).is_err());
    }

    #[test]
    fn test_sweep_rejects_oversized_problems() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut settings = SweepSettings {
            log2_n: (0, 47),
            log2_nx: (1, 1),
            ..SweepSettings::default()
        };
        let err = run_sweep(&settings, Domain::default(), &mut rng).unwrap_err();
        assert!(err.to_string().contains("at most 32"));
        settings.log2_n = (0, 0);
        settings.log2_nx = (1, MAX_LOG2_SIZE + 1);
        assert!(run_sweep(&settings, Domain::default(), &mut rng).is_err());
    }

    #[test]
    fn test_write_sweep_output() {
        let directory = std::env::temp_dir().join(format!("sweep-output-{}", std::process::id()));
        let records = vec![
            record(LocatorKind::Binary, 2, 4, 1, 1.0),
            record(LocatorKind::Binary, 8, 4, 1, 2.0),
        ];
        let stats = write_sweep_output(&directory, &records).unwrap();
        assert_eq!(stats.len(), 2);
        assert!(directory.join("N2").join("raw.csv").is_file());
        assert!(directory.join("N8").join("raw.csv").is_file());
        let summary = fs::read_to_string(directory.join("summary.csv")).unwrap();
        assert_eq!(summary.lines().count(), 3);
        fs::remove_dir_all(&directory).unwrap();
    }
}
