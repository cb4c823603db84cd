use std::fmt::Write as _;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rand::Rng;
use serde::Serialize;
use sysinfo::{get_current_pid, ProcessRefreshKind, System};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use grid_dp::generate::{random_grid, random_letters, seeded_rng};
use grid_dp::report::{ascii_graph, render_grid, render_weights};
use grid_dp::trials::{mean_millis, mean_of, run_trials};
use grid_dp::utils::bytes_to_mib;
use grid_dp::verify::{verify_square, verify_substring};
use grid_dp::weights::{DEFAULT_MAX_WEIGHT, DEFAULT_MIN_WEIGHT};
use grid_dp::{
    Grid, Scoring, Storage, WeightScenario, WeightTable, WeightedSubstringMatcher,
    ZeroSquareFinder,
};

const EXAMPLE_GRID: [[u8; 5]; 5] = [
    [1, 0, 0, 1, 0],
    [0, 0, 0, 0, 1],
    [0, 0, 0, 0, 0],
    [1, 0, 0, 0, 0],
    [0, 0, 1, 0, 0],
];
const EXAMPLE_S1: &str = "ABCAABCAA";
const EXAMPLE_S2: &str = "ABBCAACCBBBBBB";

const MATRIX_SIZES: &[(usize, usize)] = &[(10, 10), (10, 100), (10, 1000), (100, 1000), (1000, 1000)];
const STRING_LENGTHS: &[usize] = &[50, 100, 200, 500, 1000];
const SWEEP_STEPS: usize = 10;
const SWEEP_STEP_WIDTH: f64 = 0.9;

#[derive(Parser, Debug)]
#[command(name = "dp_experiments")]
#[command(about = "Timing, memory, and correctness experiments for the grid DP engines")]
#[command(version)]
struct Args {
    /// Which experiment to run
    #[arg(value_enum, default_value_t = Experiment::All)]
    experiment: Experiment,

    /// Output format for the measurement rows written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Seed for every random input
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// DP table storage
    #[arg(long, value_enum, default_value_t = StorageArg::Full)]
    storage: StorageArg,

    /// Probability that a generated grid cell is empty
    #[arg(long, default_value_t = 0.7)]
    empty_probability: f64,

    /// Trials per size (default: 10 for small grids, 3 for large; 5 for strings)
    #[arg(long)]
    trials: Option<usize>,

    /// Weight scenario for the substring experiment
    #[arg(long, value_enum, default_value_t = ScenarioArg::Uniform)]
    scenario: ScenarioArg,

    /// Mismatch penalty
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    penalty: f64,

    /// Lower bound of the frequency weight range
    #[arg(long, default_value_t = DEFAULT_MIN_WEIGHT)]
    min_weight: f64,

    /// Upper bound of the frequency weight range
    #[arg(long, default_value_t = DEFAULT_MAX_WEIGHT)]
    max_weight: f64,

    /// Also sweep the frequency scenario over [1, 1 + 0.9k] for k = 0..=10
    /// (always on for `all`)
    #[arg(long)]
    sweep: bool,

    /// Number of random grids checked by the brute-force verifier
    #[arg(long, default_value_t = 10)]
    verify_count: usize,

    /// Skip the ASCII graphs
    #[arg(long)]
    no_graphs: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Experiment {
    Matrix,
    Substring,
    Verify,
    All,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum StorageArg {
    Full,
    Rolling,
}

impl From<StorageArg> for Storage {
    fn from(value: StorageArg) -> Self {
        match value {
            StorageArg::Full => Storage::Full,
            StorageArg::Rolling => Storage::Rolling,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ScenarioArg {
    Uniform,
    Frequency,
}

#[derive(Serialize, Default)]
struct Report {
    matrix: Vec<MatrixRow>,
    substring: Vec<SubstringRow>,
    verify: Vec<VerifyRow>,
}

#[derive(Serialize)]
struct MatrixRow {
    rows: usize,
    cols: usize,
    trials: usize,
    avg_max_square: f64,
    avg_time_ms: f64,
    estimated_mib: f64,
    rss_delta_mib: f64,
}

#[derive(Serialize)]
struct SubstringRow {
    scenario: String,
    len1: usize,
    len2: usize,
    trials: usize,
    avg_score: f64,
    avg_length: f64,
    avg_time_ms: f64,
}

#[derive(Serialize)]
struct VerifyRow {
    test: usize,
    kind: &'static str,
    shape: String,
    result: String,
    status: VerificationStatus,
    detail: Option<String>,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum VerificationStatus {
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::Passed => "PASSED",
            VerificationStatus::Failed => "FAILED",
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    info!(?args, "parsed arguments");

    if !(0.0..=1.0).contains(&args.empty_probability) {
        bail!(
            "--empty-probability must lie in [0, 1], got {}",
            args.empty_probability
        );
    }
    if args.trials == Some(0) {
        bail!("--trials must be positive");
    }

    let mut sys = System::new();
    let mut report = Report::default();

    if matches!(args.experiment, Experiment::Matrix | Experiment::All) {
        report.matrix = run_matrix(&args, &mut sys)?;
    }
    if matches!(args.experiment, Experiment::Substring | Experiment::All) {
        report.substring = run_substring(&args)?;
    }
    if matches!(args.experiment, Experiment::Verify | Experiment::All) {
        report.verify = run_verify(&args)?;
    }

    write_report(&report, args.format)?;

    let failed = report
        .verify
        .iter()
        .filter(|r| r.status == VerificationStatus::Failed)
        .count();
    if failed > 0 {
        bail!("{failed} verification test(s) failed");
    }
    Ok(())
}

fn run_matrix(args: &Args, sys: &mut System) -> Result<Vec<MatrixRow>> {
    let finder = ZeroSquareFinder::with_storage(args.storage.into());

    eprintln!("=== LARGEST ZERO SUB-MATRIX EXPERIMENTS ===\n");
    eprintln!("Example Test:");
    eprintln!("--------------");
    let example = Grid::from_rows(&EXAMPLE_GRID)?;
    let result = finder.find(&example);
    if let Some(text) = render_grid(&example, Some(&result)) {
        eprintln!("Matrix:\n{text}");
    }
    eprintln!("{result}\n");

    let mut rng = seeded_rng(args.seed);
    let mut rows_out = Vec::with_capacity(MATRIX_SIZES.len());
    for &(m, n) in MATRIX_SIZES {
        let trials = args
            .trials
            .unwrap_or(if m * n <= 10_000 { 10 } else { 3 });
        info!(rows = m, cols = n, trials, "matrix experiment");

        let before = rss_bytes(sys);
        let grids = (0..trials)
            .map(|_| random_grid(m, n, args.empty_probability, &mut rng))
            .collect::<grid_dp::Result<Vec<_>>>()?;
        let outcomes = run_trials(&grids, |g| finder.find(g));
        let after = rss_bytes(sys);

        let estimated = grids
            .first()
            .map(|g| g.estimated_footprint_bytes())
            .unwrap_or_default();
        rows_out.push(MatrixRow {
            rows: m,
            cols: n,
            trials,
            avg_max_square: mean_of(&outcomes, |r| r.size as f64),
            avg_time_ms: mean_millis(&outcomes),
            estimated_mib: bytes_to_mib(estimated),
            rss_delta_mib: bytes_to_mib(after.saturating_sub(before)),
        });
    }

    eprintln!("=== COMPLEXITY ANALYSIS ===");
    eprintln!("Time: O(m × n), every cell is filled once");
    eprintln!(
        "Space: {}",
        match finder.storage() {
            Storage::Full => "O(m × n) for the DP table",
            Storage::Rolling => "O(n) for two DP rows, plus the O(m × n) input",
        }
    );

    if !args.no_graphs {
        let cells: Vec<f64> = rows_out.iter().map(|r| (r.rows * r.cols) as f64).collect();
        let times: Vec<f64> = rows_out.iter().map(|r| r.avg_time_ms).collect();
        let mems: Vec<f64> = rows_out.iter().map(|r| r.estimated_mib).collect();
        eprintln!("\n=== TIME COMPLEXITY GRAPH (ASCII) ===");
        eprint!("{}", ascii_graph(&cells, &times, "Matrix Size (m×n)", "Time (ms)"));
        eprintln!("\n=== MEMORY USAGE GRAPH (ASCII) ===");
        eprint!("{}", ascii_graph(&cells, &mems, "Matrix Size (m×n)", "Memory (MB)"));
    }
    eprintln!();
    Ok(rows_out)
}

fn run_substring(args: &Args) -> Result<Vec<SubstringRow>> {
    let storage: Storage = args.storage.into();

    eprintln!("=== WEIGHTED APPROXIMATE COMMON SUBSTRING EXPERIMENTS ===\n");
    eprintln!("Example Test:");
    eprintln!("--------------");
    let example = WeightedSubstringMatcher::from_scenario(WeightScenario::Uniform, args.penalty)?
        .with_storage(storage);
    let result = example.find(EXAMPLE_S1, EXAMPLE_S2)?;
    eprintln!("String 1: {EXAMPLE_S1}");
    eprintln!("String 2: {EXAMPLE_S2}");
    eprintln!("\nResult:\n{result}\n");

    let mut rows_out = Vec::new();
    for scenario in substring_scenarios(args) {
        let label = scenario_label(&scenario);
        let scoring = Scoring::from_scenario(scenario, args.penalty)
            .with_context(|| format!("building weights for {label}"))?;
        eprintln!("=== SCENARIO {label}, penalty={} ===", args.penalty);
        eprint!("{}", render_weights(scoring.weights()));
        let matcher = WeightedSubstringMatcher::new(scoring).with_storage(storage);
        rows_out.extend(run_substring_scenario(args, &matcher, &label)?);
    }
    eprintln!();
    Ok(rows_out)
}

/// The selected scenario, followed by the weight-range sweep when `--sweep`
/// is given or every experiment runs.
fn substring_scenarios(args: &Args) -> Vec<WeightScenario> {
    let mut scenarios = vec![match args.scenario {
        ScenarioArg::Uniform => WeightScenario::Uniform,
        ScenarioArg::Frequency => WeightScenario::EnglishFrequency {
            min_weight: args.min_weight,
            max_weight: args.max_weight,
        },
    }];
    if args.sweep || args.experiment == Experiment::All {
        scenarios.extend((0..=SWEEP_STEPS).map(|k| WeightScenario::EnglishFrequency {
            min_weight: 1.0,
            max_weight: 1.0 + k as f64 * SWEEP_STEP_WIDTH,
        }));
    }
    scenarios
}

fn run_substring_scenario(
    args: &Args,
    matcher: &WeightedSubstringMatcher,
    label: &str,
) -> Result<Vec<SubstringRow>> {
    let trials = args.trials.unwrap_or(5);
    let mut rng = seeded_rng(args.seed);
    let mut rows_out = Vec::new();

    for &len1 in STRING_LENGTHS {
        for &len2 in STRING_LENGTHS {
            if len1 > 200 && len2 > 200 {
                continue;
            }
            let pairs: Vec<(String, String)> = (0..trials)
                .map(|_| (random_letters(len1, &mut rng), random_letters(len2, &mut rng)))
                .collect();
            let outcomes = run_trials(&pairs, |(s1, s2)| matcher.find(s1, s2));
            let mut results = Vec::with_capacity(outcomes.len());
            for outcome in outcomes {
                results.push(grid_dp::trials::TrialOutcome {
                    value: outcome.value?,
                    elapsed: outcome.elapsed,
                });
            }
            rows_out.push(SubstringRow {
                scenario: label.to_string(),
                len1,
                len2,
                trials,
                avg_score: mean_of(&results, |r| r.score),
                avg_length: mean_of(&results, |r| r.length as f64),
                avg_time_ms: mean_millis(&results),
            });
        }
    }
    Ok(rows_out)
}

fn run_verify(args: &Args) -> Result<Vec<VerifyRow>> {
    eprintln!("=== VERIFICATION TESTS ===");
    let storage: Storage = args.storage.into();
    let finder = ZeroSquareFinder::with_storage(storage);
    let matcher = WeightedSubstringMatcher::new(Scoring::new(
        WeightTable::english_frequency(args.min_weight, args.max_weight)?,
        args.penalty,
    )?)
    .with_storage(storage);
    let mut rng = seeded_rng(args.seed);
    let mut rows_out = Vec::with_capacity(args.verify_count * 2);

    for test in 1..=args.verify_count {
        let m = rng.gen_range(10..30);
        let n = rng.gen_range(10..30);
        let grid = random_grid(m, n, args.empty_probability, &mut rng)?;
        let result = finder.find(&grid);
        let verdict = verify_square(&grid, &result);
        rows_out.push(verify_row(test, "matrix", format!("{m}x{n}"), result.to_string(), verdict));
    }

    for test in 1..=args.verify_count {
        let len1 = rng.gen_range(5..40);
        let len2 = rng.gen_range(5..40);
        let s1 = random_letters(len1, &mut rng);
        let s2 = random_letters(len2, &mut rng);
        let result = matcher.find(&s1, &s2)?;
        let verdict = verify_substring(&s1, &s2, matcher.scoring(), &result);
        rows_out.push(verify_row(
            test,
            "substring",
            format!("{len1}x{len2}"),
            format!("score={:.3} length={}", result.score, result.length),
            verdict,
        ));
    }

    let all_passed = rows_out
        .iter()
        .all(|r| r.status == VerificationStatus::Passed);
    for row in &rows_out {
        eprintln!(
            "Test {} {} ({}): {}",
            row.test,
            row.kind,
            row.shape,
            row.status.label()
        );
    }
    eprintln!(
        "\nAll tests {}\n",
        if all_passed { "PASSED" } else { "FAILED" }
    );
    Ok(rows_out)
}

fn verify_row<E: std::fmt::Display>(
    test: usize,
    kind: &'static str,
    shape: String,
    result: String,
    verdict: std::result::Result<(), E>,
) -> VerifyRow {
    let (status, detail) = match verdict {
        Ok(()) => (VerificationStatus::Passed, None),
        Err(err) => {
            warn!(test, kind, %err, "verification failed");
            (VerificationStatus::Failed, Some(err.to_string()))
        }
    };
    VerifyRow {
        test,
        kind,
        shape,
        result,
        status,
        detail,
    }
}

fn scenario_label(scenario: &WeightScenario) -> String {
    match scenario {
        WeightScenario::Uniform => "uniform".to_string(),
        WeightScenario::EnglishFrequency {
            min_weight,
            max_weight,
        } => format!("frequency[{min_weight:.1},{max_weight:.1}]"),
    }
}

/// Resident set size of this process, or 0 if it cannot be read.
fn rss_bytes(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    match get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        Some(process) => process.memory(),
        None => {
            warn!("could not read process memory, reporting 0");
            0
        }
    }
}

fn write_report(report: &Report, format: OutputFormat) -> Result<()> {
    let text = match format {
        OutputFormat::Json => {
            let mut s = serde_json::to_string_pretty(report)?;
            s.push('\n');
            s
        }
        OutputFormat::Csv => render_csv(report),
        OutputFormat::Table => render_table(report),
    };
    print!("{text}");
    Ok(())
}

fn render_csv(report: &Report) -> String {
    let mut out = String::new();
    if !report.matrix.is_empty() {
        let _ = writeln!(
            out,
            "rows,cols,trials,avg_max_square,avg_time_ms,estimated_mib,rss_delta_mib"
        );
        for r in &report.matrix {
            let _ = writeln!(
                out,
                "{},{},{},{:.1},{:.3},{:.2},{:.2}",
                r.rows, r.cols, r.trials, r.avg_max_square, r.avg_time_ms, r.estimated_mib, r.rss_delta_mib
            );
        }
    }
    if !report.substring.is_empty() {
        let _ = writeln!(out, "scenario,len1,len2,trials,avg_score,avg_length,avg_time_ms");
        for r in &report.substring {
            let _ = writeln!(
                out,
                "\"{}\",{},{},{},{:.2},{:.1},{:.3}",
                r.scenario, r.len1, r.len2, r.trials, r.avg_score, r.avg_length, r.avg_time_ms
            );
        }
    }
    if !report.verify.is_empty() {
        let _ = writeln!(out, "test,kind,shape,result,status,detail");
        for r in &report.verify {
            let _ = writeln!(
                out,
                "{},{},{},\"{}\",{},\"{}\"",
                r.test,
                r.kind,
                r.shape,
                r.result.replace('"', "'"),
                r.status.label(),
                r.detail.as_deref().unwrap_or("").replace('"', "'")
            );
        }
    }
    out
}

fn render_table(report: &Report) -> String {
    let mut out = String::new();
    if !report.matrix.is_empty() {
        let _ = writeln!(
            out,
            "Matrix Size    | Max Square | Time (ms) | Memory (MB) | Memory Used (MB)"
        );
        let _ = writeln!(out, "{}", "-".repeat(74));
        for r in &report.matrix {
            let _ = writeln!(
                out,
                "{:4} × {:4}    | {:10.1} | {:9.3} | {:11.2} | {:15.2}",
                r.rows, r.cols, r.avg_max_square, r.avg_time_ms, r.estimated_mib, r.rss_delta_mib
            );
        }
        out.push('\n');
    }
    if !report.substring.is_empty() {
        let width = report
            .substring
            .iter()
            .map(|r| r.scenario.len())
            .max()
            .unwrap_or(0)
            .max("Scenario".len());
        let _ = writeln!(
            out,
            "{:<width$} | String Lengths | Avg Score | Avg Length | Avg Time(ms)",
            "Scenario"
        );
        let _ = writeln!(out, "{}", "-".repeat(width + 56));
        for r in &report.substring {
            let _ = writeln!(
                out,
                "{:<width$} | {:4} x {:4}    | {:9.2} | {:10.1} | {:11.3}",
                r.scenario, r.len1, r.len2, r.avg_score, r.avg_length, r.avg_time_ms
            );
        }
        out.push('\n');
    }
    if !report.verify.is_empty() {
        for r in &report.verify {
            let _ = writeln!(
                out,
                "Test {:2} {:<9} ({:>5}): {} {}",
                r.test,
                r.kind,
                r.shape,
                r.status.label(),
                r.detail.as_deref().unwrap_or("")
            );
        }
    }
    out
}
