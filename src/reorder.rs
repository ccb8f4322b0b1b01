//! Lead ordering for boss and rival parties.

use crate::difficulty::ELITE_START_TIER;
use crate::party::TrainerMon;
use crate::pokedex::Pokedex;
use crate::settings::{Difficulty, GameSettings};
use crate::trainers::Trainer;
use schema::Move;

const LATE_GAME_BST: u16 = 540;

const LEAD_MOVES: [Move; 7] = [
    Move::FakeOut,
    Move::LightScreen,
    Move::Reflect,
    Move::Spikes,
    Move::Taunt,
    Move::Trick,
    Move::Toxic,
];

const EXPANSION_LEAD_MOVES: [Move; 8] = [
    Move::UTurn,
    Move::FlipTurn,
    Move::PartingShot,
    Move::VoltSwitch,
    Move::ToxicSpikes,
    Move::StealthRock,
    Move::StickyWeb,
    Move::TrickRoom,
];

/// Higher scores lead, lower scores are saved for the back.
pub fn sort_score(mon: &TrainerMon, dex: &Pokedex, expansion: bool) -> i16 {
    let mut score: i16 = 0;

    if expansion && mon.held_item.is_some_and(|i| i.is_mega_stone() || i.is_z_crystal()) {
        score -= 20;
    }
    if dex.is_legendary(mon.species) {
        score -= 20;
    }
    if dex.bst(mon.species) >= LATE_GAME_BST {
        score -= 10;
    }

    score += LEAD_MOVES.iter().filter(|&&m| mon.knows(m)).count() as i16;

    if mon.knows(Move::BatonPass) {
        score += 1;
        // Substitute only matters when it can be passed.
        if mon.knows(Move::Substitute) {
            score += 1;
        }
    }

    if expansion {
        score += EXPANSION_LEAD_MOVES.iter().filter(|&&m| mon.knows(m)).count() as i16;
    }

    score
}

/// Bubble-sorts boss and rival parties so lead-friendly mons go first and
/// strong mons go last. Generic trainers keep their generated order.
pub fn reorder_party(party: &mut [TrainerMon], trainer: &Trainer, settings: &GameSettings, tier: u8, dex: &Pokedex) {
    if !trainer.is_any_boss() || party.len() < 2 {
        return;
    }

    // Before the elites only the back of the party is arranged.
    let clamp_lead = !settings.gauntlet && settings.difficulty < Difficulty::Hard && tier < ELITE_START_TIER;
    let score = |mon: &TrainerMon| {
        let score = sort_score(mon, dex, settings.expansion);
        if clamp_lead {
            score.min(0)
        } else {
            score
        }
    };

    let mut sort_length = party.len() - 1;
    while sort_length != 0 {
        let mut any_swaps = false;
        for i in 0..party.len() - 1 {
            if score(&party[i + 1]) > score(&party[i]) {
                party.swap(i, i + 1);
                any_swaps = true;
            }
        }

        if any_swaps {
            sort_length -= 1;
        } else {
            sort_length = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GameData;
    use pretty_assertions::assert_eq;
    use schema::Item;

    fn mon(name: &str, moves: &[Move]) -> TrainerMon {
        let dex = &GameData::embedded().unwrap().pokedex;
        let mut mon = TrainerMon::new(dex, dex.find(name).unwrap(), 50, 0);
        mon.moves = moves.to_vec();
        mon
    }

    fn trainer(name: &str) -> &'static Trainer {
        let data = GameData::embedded().unwrap();
        data.trainers.trainer(data.trainers.find(name).unwrap())
    }

    fn names(party: &[TrainerMon]) -> Vec<&'static str> {
        let dex = &GameData::embedded().unwrap().pokedex;
        party.iter().map(|m| dex.name(m.species)).collect()
    }

    #[test]
    fn test_sort_scores() {
        let dex = &GameData::embedded().unwrap().pokedex;
        assert_eq!(sort_score(&mon("Mewtwo", &[Move::Psychic]), dex, false), -30);
        assert_eq!(sort_score(&mon("Pidgey", &[Move::Tackle]), dex, false), 0);
        assert_eq!(sort_score(&mon("Pidgey", &[Move::Toxic, Move::Taunt]), dex, false), 2);
        assert_eq!(
            sort_score(&mon("Pidgey", &[Move::BatonPass, Move::Substitute]), dex, false),
            2
        );
        // Substitute alone is not a lead move.
        assert_eq!(sort_score(&mon("Pidgey", &[Move::Substitute]), dex, false), 0);
        assert_eq!(sort_score(&mon("Pidgey", &[Move::UTurn]), dex, false), 0);
        assert_eq!(sort_score(&mon("Pidgey", &[Move::UTurn]), dex, true), 1);

        let mut mega = mon("Pidgey", &[Move::Tackle]);
        mega.held_item = Some(Item::Venusaurite);
        assert_eq!(sort_score(&mega, dex, true), -20);
        assert_eq!(sort_score(&mega, dex, false), 0);
    }

    #[test]
    fn test_hard_boss_leads_with_support() {
        let dex = &GameData::embedded().unwrap().pokedex;
        let settings = GameSettings {
            difficulty: Difficulty::Hard,
            ..Default::default()
        };
        let mut party = vec![
            mon("Mewtwo", &[Move::Psychic]),
            mon("Pidgey", &[Move::Tackle]),
            mon("Rattata", &[Move::FakeOut, Move::Taunt]),
        ];
        reorder_party(&mut party, trainer("Brock"), &settings, 3, dex);
        assert_eq!(names(&party), vec!["Rattata", "Pidgey", "Mewtwo"]);
    }

    #[test]
    fn test_clamped_lead_only_pushes_strong_back() {
        let dex = &GameData::embedded().unwrap().pokedex;
        let settings = GameSettings::default();
        let mut party = vec![
            mon("Mewtwo", &[Move::Psychic]),
            mon("Pidgey", &[Move::Tackle]),
            mon("Rattata", &[Move::FakeOut, Move::Taunt]),
        ];
        reorder_party(&mut party, trainer("Brock"), &settings, 3, dex);
        // Positive scores are clamped, so the support mon does not jump ahead.
        assert_eq!(names(&party), vec!["Pidgey", "Rattata", "Mewtwo"]);
    }

    #[test]
    fn test_generic_trainers_keep_order() {
        let dex = &GameData::embedded().unwrap().pokedex;
        let settings = GameSettings {
            difficulty: Difficulty::Brutal,
            ..Default::default()
        };
        let mut party = vec![mon("Mewtwo", &[Move::Psychic]), mon("Pidgey", &[Move::Toxic])];
        reorder_party(&mut party, trainer("Youngster"), &settings, 10, dex);
        assert_eq!(names(&party), vec!["Mewtwo", "Pidgey"]);
    }

    #[test]
    fn test_equal_scores_are_stable() {
        let dex = &GameData::embedded().unwrap().pokedex;
        let settings = GameSettings {
            difficulty: Difficulty::Brutal,
            ..Default::default()
        };
        let mut party = vec![
            mon("Pidgey", &[Move::Tackle]),
            mon("Rattata", &[Move::Tackle]),
            mon("Oddish", &[Move::Tackle]),
        ];
        reorder_party(&mut party, trainer("Gary"), &settings, 13, dex);
        assert_eq!(names(&party), vec!["Pidgey", "Rattata", "Oddish"]);
    }
}
