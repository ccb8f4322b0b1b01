//! Picking trainers: the boss table and rival of a new adventure, and route trainers.

use crate::data::GameData;
use crate::difficulty::{
    CHAMP_START_TIER, ELITE_START_TIER, FINAL_CHAMP_TIER, GYM_MID_TIER, MAX_BOSS_COUNT, TRAINER_SHINY_PERCENT,
};
use crate::errors::{GenerationError, GenerationResult};
use crate::query::TrainerQuery;
use crate::rng::RogueRng;
use crate::run_state::{RivalRoster, RunState};
use crate::settings::{GameSettings, TrainerOrder};
use crate::trainers::{TrainerCatalog, TrainerId};
use log::debug;
use schema::TrainerFlags;
use std::collections::VecDeque;

pub const TRAINER_HISTORY_CAPACITY: usize = MAX_BOSS_COUNT as usize;

/// Recently picked type-group keys. Trainers sharing a key are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeGroupHistory {
    entries: VecDeque<u16>,
    capacity: usize,
}

impl TypeGroupHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a key, forgetting the oldest one once full.
    pub fn push(&mut self, key: u16) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, key: u16) -> bool {
        self.entries.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.entries.iter().copied()
    }
}

impl Default for TypeGroupHistory {
    fn default() -> Self {
        Self::new(TRAINER_HISTORY_CAPACITY)
    }
}

/// Include and exclude flags every trainer pick is subject to.
pub fn global_filter_flags(settings: &GameSettings) -> (TrainerFlags, TrainerFlags) {
    let mut include = settings.region_flags();
    if include.is_empty() {
        include = TrainerFlags::REGION_DEFAULT;
    }
    let exclude = match settings.trainer_order {
        TrainerOrder::Rainbow => TrainerFlags::MISC_RAINBOW_EXCLUDE,
        _ => TrainerFlags::MISC_RAINBOW_ONLY,
    };
    (include, exclude)
}

fn eligible_trainers<'c>(
    catalog: &'c TrainerCatalog,
    settings: &GameSettings,
    include: TrainerFlags,
    exclude: TrainerFlags,
    history: Option<&TypeGroupHistory>,
) -> TrainerQuery<'c> {
    let mut query = TrainerQuery::all(catalog);
    query.retain_flags(include);
    query.exclude_flags(exclude);

    let (global_include, global_exclude) = global_filter_flags(settings);
    query.retain_flags(global_include);
    query.exclude_flags(global_exclude);

    if let Some(history) = history {
        for key in history.iter() {
            query.exclude_type_group(key);
        }
    }
    query
}

/// Picks a trainer matching `include` (any of) and none of `exclude`, avoiding
/// type groups in `history`. When the history rules everything out it is
/// cleared and the pick retried once.
pub fn choose_trainer_id(
    catalog: &TrainerCatalog,
    settings: &GameSettings,
    rng: &mut RogueRng,
    include: TrainerFlags,
    exclude: TrainerFlags,
    mut history: Option<&mut TypeGroupHistory>,
) -> GenerationResult<TrainerId> {
    let mut picked = None;
    for _ in 0..2 {
        let query = eligible_trainers(catalog, settings, include, exclude, history.as_deref());
        if !query.is_empty() {
            picked = query.select(rng.next());
            break;
        }

        match history.as_deref_mut() {
            Some(history) if !history.is_empty() => {
                debug!("Trainer history exhausted every option, clearing it");
                history.clear();
            }
            _ => break,
        }
    }

    let id = picked.ok_or(GenerationError::NoEligibleTrainer { include, exclude })?;
    if let Some(history) = history {
        history.push(catalog.trainer(id).type_group_key(id));
    }
    Ok(id)
}

/// Class flags a boss at `tier` is drawn from under the given trainer order.
pub fn boss_class_flags(order: TrainerOrder, tier: u8) -> TrainerFlags {
    match order {
        TrainerOrder::Default => {
            if tier >= CHAMP_START_TIER {
                TrainerFlags::CLASS_CHAMP
            } else if tier >= ELITE_START_TIER {
                TrainerFlags::CLASS_ANY_ELITE
            } else {
                TrainerFlags::CLASS_ANY_GYM
            }
        }
        TrainerOrder::Rainbow => TrainerFlags::CLASS_ANY_MAIN_BOSS,
        TrainerOrder::Official => {
            if tier < ELITE_START_TIER {
                TrainerFlags::gym(tier)
            } else if tier < CHAMP_START_TIER {
                TrainerFlags::elite(tier - ELITE_START_TIER)
            } else {
                TrainerFlags::CLASS_CHAMP
            }
        }
    }
}

pub fn choose_boss_trainer_id(
    catalog: &TrainerCatalog,
    settings: &GameSettings,
    rng: &mut RogueRng,
    tier: u8,
    history: &mut TypeGroupHistory,
) -> GenerationResult<TrainerId> {
    let include = boss_class_flags(settings.trainer_order, tier);
    choose_trainer_id(catalog, settings, rng, include, TrainerFlags::empty(), Some(history))
}

/// Fills the run's boss table. The rival must already be chosen: it is the final boss.
pub fn choose_bosses_for_new_adventure(
    catalog: &TrainerCatalog,
    settings: &GameSettings,
    run: &mut RunState,
) -> GenerationResult<()> {
    let rival = run.rival.ok_or(GenerationError::NoRival)?;
    let mut history = TypeGroupHistory::default();
    run.boss_trainers = [None; MAX_BOSS_COUNT as usize];

    debug!("Picking trainers");
    for tier in 0..MAX_BOSS_COUNT {
        let id = if tier == FINAL_CHAMP_TIER {
            rival
        } else {
            // Types may repeat across stages, except in rainbow mode.
            if settings.trainer_order != TrainerOrder::Rainbow
                && (tier == ELITE_START_TIER || tier == CHAMP_START_TIER)
            {
                history.clear();
            }
            choose_boss_trainer_id(catalog, settings, &mut run.rng, tier, &mut history)?
        };

        run.boss_trainers[tier as usize] = Some(id);
        debug!("    [{}] = {}", tier, catalog.trainer(id).name);
    }
    Ok(())
}

/// Picks the rival, rolls its shininess and schedules its route encounters.
pub fn choose_rival_for_new_adventure(
    catalog: &TrainerCatalog,
    settings: &GameSettings,
    run: &mut RunState,
) -> GenerationResult<TrainerId> {
    let id = choose_trainer_id(
        catalog,
        settings,
        &mut run.rng,
        TrainerFlags::CLASS_RIVAL,
        TrainerFlags::empty(),
        None,
    )?;
    debug!("Picking rival = {}", catalog.trainer(id).name);

    run.rival = Some(id);
    run.rival_has_shiny = run.rng.chance(TRAINER_SHINY_PERCENT);
    run.rival_roster = RivalRoster::Unpopulated;

    let rng = &mut run.rng;
    let encounters = &mut run.rival_encounters;

    // Just before or just after the first badge.
    encounters[0] = rng.range(2) as u8;
    encounters[1] = GYM_MID_TIER - 1 + rng.range(3) as u8;

    if rng.range(4) == 0 {
        // Occasionally two encounters around the middle of the run.
        encounters[1] = 3 + rng.range(2) as u8;
        encounters[2] = GYM_MID_TIER + 1 + rng.range(2) as u8;
    } else {
        encounters[1] = GYM_MID_TIER - 1 + rng.range(3) as u8;
        encounters[2] = encounters[1];
    }

    // Just before or just after the last gym.
    encounters[3] = ELITE_START_TIER - rng.range(2) as u8;

    Ok(id)
}

/// Route trainers for a stretch of the run, avoiding repeats.
pub fn choose_route_trainers(
    catalog: &TrainerCatalog,
    settings: &GameSettings,
    rng: &mut RogueRng,
    count: usize,
) -> GenerationResult<Vec<TrainerId>> {
    let mut history = TypeGroupHistory::default();
    (0..count)
        .map(|_| {
            choose_trainer_id(
                catalog,
                settings,
                rng,
                TrainerFlags::CLASS_ROUTE,
                TrainerFlags::empty(),
                Some(&mut history),
            )
        })
        .collect()
}

/// Starts a new adventure: rival first, then the boss table.
pub fn begin_adventure(data: &GameData, settings: &GameSettings, base_seed: u64) -> GenerationResult<RunState> {
    let mut run = RunState::new(base_seed);
    choose_rival_for_new_adventure(&data.trainers, settings, &mut run)?;
    choose_bosses_for_new_adventure(&data.trainers, settings, &mut run)?;
    Ok(run)
}
