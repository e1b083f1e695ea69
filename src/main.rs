//! Plinko - headless board runner
//!
//! Drops a batch of balls down a board, runs the frame loop until every ball
//! has left, and reports where they landed. The browser build drives the
//! same engine through `plinko_board::web::PlinkoEngine` instead.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::{Context, Result, bail};
    use clap::Parser;
    use plinko_board::{BoardPreset, Runner, SimConfig, SimEvent, Simulation};

    /// Ticks between successive drops from the spawn point
    const DROP_INTERVAL: u64 = 20;

    #[derive(Parser)]
    #[command(name = "plinko")]
    #[command(about = "Run a Plinko board headless and report slot hits")]
    struct Args {
        /// Number of balls to drop
        #[arg(short, long, default_value_t = 10)]
        balls: u32,

        /// Launch force (0-15); 0 drops straight down
        #[arg(short, long, default_value_t = 0.0)]
        force: f32,

        /// RNG seed (overrides the config file)
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON config file (overrides --preset)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Board layout: compact, classic or tall
        #[arg(short, long, default_value = "classic", value_parser = parse_preset)]
        preset: BoardPreset,

        /// Give up after this many ticks
        #[arg(long, default_value_t = 100_000)]
        max_ticks: u64,

        /// Shake the board every N ticks (0 = never)
        #[arg(long, default_value_t = 0)]
        shake_every: u64,

        /// Write the effective config to this path and continue
        #[arg(long)]
        save_config: Option<PathBuf>,
    }

    fn parse_preset(s: &str) -> Result<BoardPreset, String> {
        BoardPreset::from_str(s).ok_or_else(|| format!("unknown preset '{s}' (compact, classic, tall)"))
    }

    /// Per-slot results of a run
    struct Tally {
        hits: Vec<u32>,
        score: f32,
        missed: u32,
    }

    impl Tally {
        fn new(slots: usize) -> Self {
            Self {
                hits: vec![0; slots],
                score: 0.0,
                missed: 0,
            }
        }

        fn record(&mut self, event: &SimEvent) {
            match *event {
                SimEvent::Scored { slot, multiplier, .. } => {
                    if let Some(count) = self.hits.get_mut(slot) {
                        *count += 1;
                    }
                    self.score += multiplier;
                }
                SimEvent::Retired { scored: false, .. } => self.missed += 1,
                _ => {}
            }
        }
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();

        let mut config = match &args.config {
            Some(path) => SimConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
            None => SimConfig::from_preset(args.preset, SimConfig::default().seed),
        };
        if let Some(seed) = args.seed {
            config.seed = seed;
        }
        if let Some(path) = &args.save_config {
            config
                .save(path)
                .with_context(|| format!("saving {}", path.display()))?;
        }

        let sim = Simulation::new(config).context("building board")?;
        let slots = sim.board.slot_count();
        let multipliers: Vec<f32> = sim.board.slots.slots.iter().map(|s| s.multiplier).collect();
        let spawn = sim.board.spawn_point();

        log::info!(
            "Board {}x{}, {} pins, {} slots, seed {}",
            sim.board.width,
            sim.board.height,
            sim.board.pins.len(),
            slots,
            sim.seed()
        );

        let mut runner = Runner::new(sim);
        let mut tally = Tally::new(slots);
        let mut dropped = 0;
        runner.start();

        loop {
            let now = runner.sim().time_ticks;
            if dropped == args.balls && runner.sim().is_empty() {
                break;
            }
            if now >= args.max_ticks {
                runner.stop();
                bail!(
                    "tick limit {} reached with {} ball(s) still on the board",
                    args.max_ticks,
                    runner.sim().balls.len()
                );
            }

            if dropped < args.balls && now % DROP_INTERVAL == 0 {
                runner.sim_mut().drop_with_force(spawn, args.force);
                dropped += 1;
            }
            if args.shake_every > 0 && now > 0 && now % args.shake_every == 0 {
                runner.sim_mut().shake();
            }

            for event in runner.frame() {
                tally.record(&event);
            }
        }
        runner.stop();

        println!("Slot  Mult  Hits");
        for (index, (hits, mult)) in tally.hits.iter().zip(&multipliers).enumerate() {
            println!("{:>4}  {:>4.1}  {:>4}", index, mult, hits);
        }
        println!();
        println!("Balls:  {}", dropped);
        println!("Missed: {}", tally.missed);
        println!("Ticks:  {}", runner.sim().time_ticks);
        println!("Score:  {:.1}", tally.score);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the PlinkoEngine export, this is just to satisfy the compiler
}
