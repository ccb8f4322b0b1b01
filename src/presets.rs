//! Competitive set selection for trainer mons.
//!
//! Each party keeps a [`HeldItemUsage`] record so limited items (leftovers,
//! shell bell, choice items, mega stones, Z-crystals) show up at most once.
//! Presets that would repeat one are scored down, and if one still wins its
//! item is demoted to a weaker stand-in.

use crate::rng::RogueRng;
use crate::settings::{BattleFormat, GameSettings};
use schema::{CompetitiveSet, Item, Move, PresetFlags};

/// Limited held-item categories already given out in the current party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldItemUsage {
    pub leftovers: bool,
    pub shell_bell: bool,
    pub choice_item: bool,
    pub mega_stone: bool,
    pub z_crystal: bool,
}

/// How strictly a chosen set is applied to a mon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompetitiveSetRules {
    /// Keep empty move slots instead of topping them up from the level-up moves.
    pub allow_missing_moves: bool,
    /// Leave the mon's own nature in place.
    pub skip_nature: bool,
}

const BASE_PRESET_SCORE: u16 = 1024;
const FORMAT_MATCH_BONUS: u16 = 32;
const SCORE_JITTER: u32 = 64;

pub fn is_choice_item(item: Item, expansion: bool) -> bool {
    match item {
        Item::ChoiceBand => true,
        Item::ChoiceSpecs | Item::ChoiceScarf => expansion,
        _ => false,
    }
}

fn is_mega_stone(item: Option<Item>, settings: &GameSettings) -> bool {
    settings.expansion && item.is_some_and(Item::is_mega_stone)
}

fn is_z_crystal(item: Option<Item>, settings: &GameSettings) -> bool {
    settings.expansion && item.is_some_and(Item::is_z_crystal)
}

fn is_primal_orb(item: Option<Item>, settings: &GameSettings) -> bool {
    settings.expansion && item.is_some_and(Item::is_primal_orb)
}

fn format_flag(settings: &GameSettings) -> PresetFlags {
    match settings.battle_format {
        BattleFormat::Singles => PresetFlags::SINGLES_STRONG,
        BattleFormat::Doubles => PresetFlags::DOUBLES_STRONG,
    }
}

fn score_preset(preset: &CompetitiveSet, usage: &HeldItemUsage, settings: &GameSettings) -> u16 {
    let item = preset.held_item;
    let mut score = BASE_PRESET_SCORE;

    if !preset.has_damaging_move() {
        score /= 2;
    }
    if preset.flags.contains(format_flag(settings)) {
        score += FORMAT_MATCH_BONUS;
    }

    if item == Some(Item::Leftovers) && usage.leftovers {
        score /= 2;
    }
    if item == Some(Item::ShellBell) && usage.shell_bell {
        score /= 2;
    }
    if item.is_some_and(|i| is_choice_item(i, settings.expansion)) && usage.choice_item {
        score /= 2;
    }

    if is_primal_orb(item, settings) && !settings.mega_evolution_enabled() {
        score /= 4;
    }
    if is_mega_stone(item, settings) && (usage.mega_stone || !settings.mega_evolution_enabled()) {
        score /= 4;
    }
    if is_z_crystal(item, settings) && (usage.z_crystal || !settings.z_moves_enabled()) {
        score /= 4;
    }

    score
}

/// Replaces items the party has already used (or the ruleset disables) with weaker ones.
fn demote_held_item(mut item: Option<Item>, usage: &HeldItemUsage, settings: &GameSettings) -> Option<Item> {
    if item == Some(Item::Leftovers) && usage.leftovers {
        item = Some(Item::ShellBell);
    }
    if item == Some(Item::ShellBell) && usage.shell_bell {
        item = None;
    }

    if let Some(choice) = item.filter(|&i| is_choice_item(i, settings.expansion)) {
        if usage.choice_item {
            item = match choice {
                Item::ChoiceBand if settings.expansion => Some(Item::MuscleBand),
                Item::ChoiceSpecs => Some(Item::WiseGlasses),
                Item::ChoiceScarf => Some(Item::QuickClaw),
                _ => None,
            };
        }
    }

    if is_primal_orb(item, settings) && !settings.mega_evolution_enabled() {
        item = None;
    }
    if is_mega_stone(item, settings) && (usage.mega_stone || !settings.mega_evolution_enabled()) {
        item = None;
    }
    if is_z_crystal(item, settings) && (usage.z_crystal || !settings.z_moves_enabled()) {
        item = None;
    }
    item
}

/// Picks the preset that best fits the party so far and fixes up its held item.
///
/// Presets are scanned from a random offset; each gets a small random bonus so
/// equally suited sets share the pick. Returns `None` when the species has no
/// presets. Marks the chosen item's category as used.
pub fn select_next_preset(
    presets: &[CompetitiveSet],
    usage: &mut HeldItemUsage,
    settings: &GameSettings,
    rng: &mut RogueRng,
) -> Option<CompetitiveSet> {
    if presets.is_empty() {
        return None;
    }

    let count = presets.len();
    let offset = if count == 1 { 0 } else { rng.range(count as u32) as usize };

    let mut best: Option<(u16, &CompetitiveSet)> = None;
    for i in 0..count {
        let preset = &presets[(offset + i) % count];
        let score = score_preset(preset, usage, settings) + (rng.next() % SCORE_JITTER) as u16;

        match best {
            Some((best_score, _)) if score <= best_score => {}
            _ => best = Some((score, preset)),
        }
    }

    let mut chosen = best.map(|(_, preset)| preset.clone())?;
    chosen.held_item = demote_held_item(chosen.held_item, usage, settings);

    match chosen.held_item {
        None => {
            chosen.held_item = Some(if rng.range(2) == 0 {
                Item::LumBerry
            } else {
                Item::SitrusBerry
            });
        }
        Some(Item::Leftovers) => usage.leftovers = true,
        Some(Item::ShellBell) => usage.shell_bell = true,
        Some(item) if is_choice_item(item, settings.expansion) => usage.choice_item = true,
        item if is_mega_stone(item, settings) => usage.mega_stone = true,
        item if is_z_crystal(item, settings) => usage.z_crystal = true,
        Some(_) => {}
    }

    Some(chosen)
}

/// Adjusts a chosen preset to what the trainer AI can use and returns the
/// rules it should be applied with.
pub fn modify_trainer_mon_preset(
    preset: &mut CompetitiveSet,
    settings: &GameSettings,
    uses_valid_natures: bool,
) -> CompetitiveSetRules {
    let mut rules = CompetitiveSetRules::default();

    // Without the expansion the AI cannot use Trick.
    if !settings.expansion && preset.knows(Move::Trick) {
        preset.moves.retain(|&m| m != Move::Trick);
        rules.allow_missing_moves = true;
    }

    // A choice-locked mon must only carry attacks.
    if preset
        .held_item
        .is_some_and(|item| is_choice_item(item, settings.expansion))
        && preset.moves.len() > 2
    {
        rules.allow_missing_moves = true;
        preset.moves.retain(|m| m.is_damaging());
    }

    if !uses_valid_natures {
        rules.skip_nature = true;
    }
    rules
}
