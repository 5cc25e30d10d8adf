use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anchor_2048::codec;
use anchor_2048::engine::{Direction, Grid, Reward};
use anchor_2048::features::{PolicyInputs, StepMeta};
use anchor_2048::greedy::{self, Decision, Greedy, GreedyConfig};
use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;

#[derive(Parser, Debug)]
#[command(
    name = "evaluate",
    version,
    about = "Pick the greedy move for every transport frame (one per line)"
)]
struct Args {
    /// Frames file; reads stdin when omitted
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: Option<PathBuf>,
    /// Emit one JSON object per frame instead of plain text
    #[arg(long)]
    json: bool,
    /// Include policy input features (JSON output only)
    #[arg(long)]
    features: bool,
    /// On all-zero rewards prefer a direction that changes the grid
    #[arg(long)]
    prefer_legal: bool,
    /// Worker threads (defaults to rayon's choice)
    #[arg(short = 't', long = "threads", value_name = "N")]
    threads: Option<usize>,
    /// Show a progress bar while evaluating
    #[arg(long)]
    progress: bool,
}

#[derive(serde::Serialize)]
struct DecisionJson<'a> {
    line: usize,
    direction: Direction,
    code: u8,
    reward: Reward,
    grid: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    features: Option<Vec<f64>>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("failed to size the rayon pool")?;
    }

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let (lines, grids) = read_frames(reader)?;
    info!("decoded {} frames", grids.len());

    let cfg = GreedyConfig { prefer_legal: args.prefer_legal };
    let decisions = if args.progress {
        let pb = ProgressBar::new(grids.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} frames ({eta})")
                .context("bad progress template")?
                .progress_chars("=>-"),
        );
        let search = Greedy::with_config(cfg);
        let out: Vec<Decision> = grids
            .par_iter()
            .map(|g| {
                let d = search.best_move(g);
                pb.inc(1);
                d
            })
            .collect();
        pb.finish_and_clear();
        out
    } else {
        greedy::best_moves_par_with(&grids, cfg)
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for ((line, grid), decision) in lines.iter().zip(&grids).zip(&decisions) {
        if args.json {
            let wire = codec::encode(&decision.grid).ok();
            let rec = DecisionJson {
                line: *line,
                direction: decision.direction,
                code: decision.direction.code(),
                reward: decision.reward,
                grid: wire.as_deref(),
                features: args.features.then(|| PolicyInputs::build(grid, &StepMeta::default()).to_vec()),
            };
            serde_json::to_writer(&mut out, &rec)?;
            out.write_all(b"\n")?;
        } else {
            writeln!(out, "{} {}", decision.direction, decision.reward)?;
        }
    }
    out.flush()?;

    let total: Reward = decisions.iter().map(|d| d.reward).sum();
    info!("evaluated {} frames, total reward {}", decisions.len(), total);
    Ok(())
}

/// Decode every non-empty line; malformed frames are logged and skipped.
fn read_frames(reader: impl BufRead) -> anyhow::Result<(Vec<usize>, Vec<Grid>)> {
    let mut lines = Vec::new();
    let mut grids = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.context("failed to read frame")?;
        let frame = line.trim_end_matches('\r');
        if frame.is_empty() {
            continue;
        }
        match codec::decode_frame(frame) {
            Ok(grid) => {
                lines.push(idx + 1);
                grids.push(grid);
            }
            Err(e) => warn!("skipping line {}: {}", idx + 1, e),
        }
    }
    Ok((lines, grids))
}
