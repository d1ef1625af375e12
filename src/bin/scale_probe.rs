use std::time::Instant;

use burst_dp::decoders::{TrellisDecoder, ViterbiDecoder};
use burst_dp::{BurstEngine, EventSeries, StateDecoder};
use clap::{Parser, ValueEnum};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

/// Run both decoders on synthetic bursty streams of increasing length,
/// cross-check their answers and report time and memory.
#[derive(Parser, Debug)]
#[command(name = "scale_probe", about, long_about = None)]
struct Options {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Largest stream length for which the trellis decoder is run and compared
    #[arg(long, default_value_t = 1024)]
    verify_limit: usize,

    /// Largest stream length to probe
    #[arg(long, default_value_t = 8192)]
    max_len: usize,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn write(self, measurements: &[Measurement]) {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

#[derive(Clone)]
struct Measurement {
    decoder: &'static str,
    len: usize,
    states: usize,
    cost: f64,
    switches: usize,
    wall_s: f64,
    rss_delta_kib: u64,
    status: VerificationStatus,
    detail: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            VerificationStatus::Passed => "✓",
            VerificationStatus::Failed => "✗",
            VerificationStatus::NotChecked => "○",
        }
    }
}

const LENGTHS: &[usize] = &[64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384, 32768];

fn main() {
    let options = Options::parse();
    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("Burst decoder scaling probe");
    eprintln!("  viterbi: O(n k^2) forward DP");
    eprintln!("  trellis: Bellman-Ford on the layered graph, cross-checked up to n = {}", options.verify_limit);
    eprintln!();

    for &len in LENGTHS.iter().filter(|&&len| len <= options.max_len) {
        let series = match EventSeries::new(bursty_stream(len)) {
            Ok(series) => series,
            Err(err) => {
                eprintln!("scale_probe: synthetic stream of length {len} rejected: {err}");
                std::process::exit(1);
            }
        };

        eprint!("  n={len:<6} viterbi... ");
        let (viterbi, states) = measure(ViterbiDecoder, &series, &mut sys);
        eprintln!("cost={:.3}, time={:.3}s", viterbi.cost, viterbi.wall_s);
        let reference_cost = viterbi.cost;
        measurements.push(viterbi);

        if len <= options.verify_limit {
            eprint!("  n={len:<6} trellis... ");
            let (mut trellis, trellis_states) = measure(TrellisDecoder::new(), &series, &mut sys);
            let agree = trellis_states == states
                && (trellis.cost - reference_cost).abs() <= 1e-9 * reference_cost.abs().max(1.0);
            if agree {
                trellis.status = VerificationStatus::Passed;
            } else {
                trellis.status = VerificationStatus::Failed;
                trellis.detail = Some(format!(
                    "viterbi cost={reference_cost:.6}, trellis cost={:.6}",
                    trellis.cost
                ));
            }
            eprintln!(
                "{} cost={:.3}, time={:.3}s",
                trellis.status.icon(),
                trellis.cost,
                trellis.wall_s
            );
            measurements.push(trellis);
        }
    }

    let failed = measurements
        .iter()
        .filter(|m| m.status == VerificationStatus::Failed)
        .count();
    eprintln!();
    eprintln!("{} measurement(s), {failed} disagreement(s)", measurements.len());

    options.format.write(&measurements);
    if failed > 0 {
        std::process::exit(1);
    }
}

fn measure<D: StateDecoder>(
    decoder: D,
    series: &EventSeries,
    sys: &mut System,
) -> (Measurement, Vec<usize>) {
    let name = decoder.name();
    let engine = BurstEngine::new(decoder);
    let before = rss_kib(sys);
    let start = Instant::now();
    let result = engine.run(series);
    let wall_s = start.elapsed().as_secs_f64();
    let after = rss_kib(sys);

    match result {
        Ok(detection) => (
            Measurement {
                decoder: name,
                len: series.len(),
                states: detection.space.num_states(),
                cost: detection.decoding.cost,
                switches: detection.decoding.switches(),
                wall_s,
                rss_delta_kib: after.saturating_sub(before),
                status: VerificationStatus::NotChecked,
                detail: None,
            },
            detection.decoding.states,
        ),
        Err(err) => (
            Measurement {
                decoder: name,
                len: series.len(),
                states: 0,
                cost: f64::NAN,
                switches: 0,
                wall_s,
                rss_delta_kib: after.saturating_sub(before),
                status: VerificationStatus::Failed,
                detail: Some(err.to_string()),
            },
            Vec::new(),
        ),
    }
}

/// Slow background traffic with a dense burst in every fourth block of 32 events.
fn bursty_stream(len: usize) -> Vec<f64> {
    let mut t = 0.0;
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        out.push(t);
        let base = if (i / 32) % 4 == 1 { 0.05 } else { 1.0 };
        let jitter = 1.0 + 0.25 * (((i * 7919) % 13) as f64 / 13.0 - 0.5);
        t += base * jitter;
    }
    out
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory() / 1024
    } else {
        0
    }
}

fn write_csv(measurements: &[Measurement]) {
    println!("decoder,len,states,cost,switches,wall_s,rss_delta_kib,status,detail");
    for m in measurements {
        println!(
            "{},{},{},{:.6},{},{:.3},{},{},\"{}\"",
            m.decoder,
            m.len,
            m.states,
            m.cost,
            m.switches,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            m.detail.as_deref().unwrap_or("").replace('"', "'")
        );
    }
}

fn write_table(measurements: &[Measurement]) {
    println!(
        "{:<8}  {:>6}  {:>6}  {:>14}  {:>8}  {:>10}  {:>13}  {:<11}  detail",
        "decoder", "len", "states", "cost", "switches", "wall_s", "rss_delta_kib", "status"
    );
    println!("{:-<100}", "");
    for m in measurements {
        println!(
            "{:<8}  {:>6}  {:>6}  {:>14.3}  {:>8}  {:>10.3}  {:>13}  {:<11}  {}",
            m.decoder,
            m.len,
            m.states,
            m.cost,
            m.switches,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            m.detail.as_deref().unwrap_or("")
        );
    }
}

fn write_json(measurements: &[Measurement]) {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = match &m.detail {
            Some(d) => format!("\"{}\"", d.replace('"', "'")),
            None => "null".to_string(),
        };
        println!(
            "  {{\"decoder\":\"{}\",\"len\":{},\"states\":{},\"cost\":{:.6},\"switches\":{},\"wall_s\":{:.3},\"rss_delta_kib\":{},\"status\":\"{}\",\"detail\":{}}}{}",
            m.decoder,
            m.len,
            m.states,
            m.cost,
            m.switches,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            detail,
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
}
