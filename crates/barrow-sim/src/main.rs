//! Headless Barrow runs: build a world from a config, spawn a population,
//! and drive the hero with scripted random commands.
//!
//! Usage:
//!   cargo run -p barrow-sim -- --seed 7 --rounds 40 --hunters 3 --json

use std::fs;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use barrow_core::{
    Actor, ActorId, Command, Direction, HunterController, LoadoutStats, PlayerController, Pos,
    Resistances, RoundResult, SimConfig, SimRng, StatBlock, TileGrid, WandererController, World,
};

/// Commands queued for the hero each time the round pauses
const COMMANDS_PER_ROUND: usize = 4;

#[derive(Parser, Debug)]
#[command(name = "barrow-sim")]
#[command(version, about = "Run a Barrow world without a UI", long_about = None)]
struct Args {
    /// JSON config file; the flags below override its fields
    #[arg(short, long)]
    config: Option<String>,

    /// World seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Grid width
    #[arg(long)]
    width: Option<i32>,

    /// Grid height
    #[arg(long)]
    height: Option<i32>,

    /// Rounds to run before stopping
    #[arg(short, long, default_value = "30")]
    rounds: u32,

    /// Hunters stalking the hero
    #[arg(long, default_value = "2")]
    hunters: u32,

    /// Wanderers drifting about
    #[arg(long, default_value = "4")]
    wanderers: u32,

    /// Print a JSON summary instead of the journal
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    rounds: u32,
    turns: u64,
    clock: f64,
    hero_alive: bool,
    hero_hp: f64,
    survivors: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let text =
                fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
            SimConfig::from_json(&text).with_context(|| format!("loading config {path}"))?
        }
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    config.validate().context("applying command line overrides")?;

    let summary = run(&config, &args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "-- {} turns over {} rounds; {} actors left{}",
            summary.turns,
            summary.rounds,
            summary.survivors,
            if summary.hero_alive { "" } else { " (hero fell)" },
        );
    }
    Ok(())
}

fn run(config: &SimConfig, args: &Args) -> Result<Summary> {
    let mut rng = SimRng::new(config.seed);
    let mut world = World::new(
        Box::new(TileGrid::walled(config.width, config.height, config.layers)),
        Box::new(loadout()),
    );
    let hero = populate(&mut world, &mut rng, config, args)?;

    let mut rounds = 0;
    while rounds < args.rounds {
        match world.update() {
            RoundResult::Done => {
                report(&mut world, args.json);
                break;
            }
            RoundResult::Paused => {
                rounds += 1;
                report(&mut world, args.json);
                if !feed_hero(&mut world, hero, &mut rng) {
                    break;
                }
            }
        }
    }

    Ok(Summary {
        seed: config.seed,
        rounds,
        turns: world.turns(),
        clock: world.clock(),
        hero_alive: world.player().is_some_and(Actor::is_alive),
        hero_hp: world.player().map_or(0.0, Actor::hp),
        survivors: world.actor_count(),
    })
}

/// Species stat table. Hunters trade toughness for speed; the hero heals.
fn loadout() -> LoadoutStats {
    let mut stats = LoadoutStats::new(StatBlock::default());
    stats.set(
        "hero",
        StatBlock {
            guard: 0.2,
            regen: 0.4,
            resists: Resistances::FIRE,
            ..Default::default()
        },
    );
    stats.set(
        "hunter",
        StatBlock {
            speed: 1.25,
            regen: 0.1,
            ..Default::default()
        },
    );
    stats.set(
        "wanderer",
        StatBlock {
            speed: 0.8,
            ..Default::default()
        },
    );
    stats
}

fn populate(
    world: &mut World,
    rng: &mut SimRng,
    config: &SimConfig,
    args: &Args,
) -> Result<ActorId> {
    let hero_pos = free_tile(world, rng, config)?;
    let hero = world.add_actor(
        Actor::new("hero", hero_pos, 30.0, config.turn_delay)
            .with_controller(Box::new(PlayerController::new())),
    )?;
    world.set_player(hero)?;

    for _ in 0..args.hunters {
        let pos = free_tile(world, rng, config)?;
        world.add_actor(
            Actor::new("hunter", pos, 12.0, config.turn_delay * 1.5)
                .with_controller(Box::new(HunterController::new(rng.fork()))),
        )?;
    }
    for _ in 0..args.wanderers {
        let pos = free_tile(world, rng, config)?;
        let mut wanderer = WandererController::new(rng.fork());
        wanderer.earshot = config.earshot;
        world.add_actor(
            Actor::new("wanderer", pos, 10.0, config.turn_delay)
                .with_controller(Box::new(wanderer)),
        )?;
    }
    Ok(hero)
}

/// Find a free walkable tile by rejection sampling.
fn free_tile(world: &World, rng: &mut SimRng, config: &SimConfig) -> Result<Pos> {
    for _ in 0..1000 {
        let pos = Pos::new(
            1 + rng.rn2((config.width - 2).max(1) as u32) as i32,
            1 + rng.rn2((config.height - 2).max(1) as u32) as i32,
            rng.rn2(config.layers.max(1) as u32) as i32,
        );
        if !world.terrain().is_wall(pos) && world.occupant_at(pos).is_none() {
            return Ok(pos);
        }
    }
    bail!("no free tile after 1000 attempts; the grid is too crowded")
}

/// Queue the hero's next batch of commands: mostly walking, with the odd
/// swing or shout to stir the neighbours up.
fn feed_hero(world: &mut World, hero: ActorId, rng: &mut SimRng) -> bool {
    let Some(controller) = world
        .actor_mut(hero)
        .and_then(|actor| actor.controller_mut())
        .and_then(|controller| controller.downcast_mut::<PlayerController>())
    else {
        return false;
    };
    for _ in 0..COMMANDS_PER_ROUND {
        let dir = rng
            .choose(&Direction::ALL)
            .copied()
            .unwrap_or(Direction::North);
        let command = if rng.one_in(8) {
            Command::Shout
        } else if rng.one_in(6) {
            Command::Strike(dir)
        } else {
            Command::Move(dir)
        };
        controller.enqueue(command);
    }
    true
}

fn report(world: &mut World, quiet: bool) {
    let journal = world.take_journal();
    if quiet {
        return;
    }
    for line in journal {
        println!("{line}");
    }
}
