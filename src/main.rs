use anchor_2048::codec;
use anchor_2048::engine::Direction;
use anchor_2048::greedy;
use anyhow::Context;
use clap::Parser;

const SAMPLE: &str = "2x2  22 4 4 x 8A";

#[derive(Parser, Debug)]
#[command(name = "anchor-2048", version, about = "Simulate every direction for one grid and show the greedy choice")]
struct Args {
    /// Wire grid or transport frame (`board=...`); a built-in 4x4 sample when omitted
    grid: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let raw = args.grid.as_deref().unwrap_or(SAMPLE);
    let grid = codec::decode_frame(raw).with_context(|| format!("invalid grid {:?}", raw))?;
    println!("{}", grid);
    for dir in Direction::ALL {
        let out = grid.shift(dir);
        println!("{} (reward {})", dir, out.reward);
        println!("{}", out.grid);
    }
    let best = greedy::best_move(&grid);
    println!(
        "Best move: {}, reward: {}, max tile: {}, empty cells: {}",
        best.direction,
        best.reward,
        best.grid.max_tile_value(),
        best.grid.empty_count()
    );
    Ok(())
}
