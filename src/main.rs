use anyhow::Context;
use clap::Parser;
use rogue_party::difficulty::{MAX_BOSS_COUNT, PARTY_SIZE};
use rogue_party::{
    begin_adventure, choose_route_trainers, EncounterContext, GameData, GameSettings, MonDisplay, PartyGenerator,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the run
    #[arg(long, default_value = "0")]
    seed: u64,

    /// RON file with game settings (defaults are used when absent)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Only generate bosses up to and including this tier
    #[arg(long, default_value = "13")]
    max_tier: u8,

    /// Number of route trainers to generate for each tier
    #[arg(long, default_value = "0")]
    routes: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = match &args.settings {
        Some(path) => GameSettings::load(path).with_context(|| format!("loading settings from {}", path.display()))?,
        None => GameSettings::default(),
    };
    let data = GameData::embedded().context("loading embedded tables")?;

    log::info!("Starting run with seed {}", args.seed);
    let mut run = begin_adventure(data, &settings, args.seed)?;
    let generator = PartyGenerator::new(data, &settings);
    let dex = &data.pokedex;
    let encounter = EncounterContext::default();

    for tier in 0..MAX_BOSS_COUNT.min(args.max_tier.saturating_add(1)) {
        run.tier = tier;

        if let Some(boss) = run.boss_for_tier(tier) {
            let party = generator.create_trainer_party(&mut run, boss, PARTY_SIZE, &encounter)?;
            let trainer = data.trainers.trainer(boss);
            println!(
                "=== Tier {}: {} (weather: {:?}) ===",
                tier,
                trainer.name,
                trainer.weather(&settings, tier)
            );
            for mon in &party {
                print!("{}", MonDisplay { dex, mon });
            }
            println!();
        }

        if let Some(rival) = run.rival.filter(|_| run.is_rival_encounter_tier()) {
            let party = generator.create_trainer_party(&mut run, rival, PARTY_SIZE, &encounter)?;
            let trainer = data.trainers.trainer(rival);
            println!(
                "--- Rival {} (weather: {:?}) ---",
                trainer.name,
                trainer.weather(&settings, tier)
            );
            for mon in &party {
                print!("{}", MonDisplay { dex, mon });
            }
            println!();
        }

        let routes = choose_route_trainers(&data.trainers, &settings, &mut run.rng, args.routes)?;
        for id in routes {
            let party = generator.create_trainer_party(&mut run, id, PARTY_SIZE, &encounter)?;
            let names: Vec<&str> = party.iter().map(|mon| dex.name(mon.species)).collect();
            println!("  {} : {}", data.trainers.trainer(id).name, names.join(", "));
        }
    }

    println!("Rival roster:");
    for line in run.describe_rival_roster(dex) {
        println!("  {}", line);
    }

    Ok(())
}
