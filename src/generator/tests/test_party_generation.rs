#[cfg(test)]
mod tests {
    use crate::difficulty::{EncounterContext, Policy, RouteModifier};
    use crate::generator::tests::common::{
        data, dex, generate, has_no_similar_pairs, species_names, trainer_id, TestRunBuilder,
    };
    use crate::difficulty::MAX_BOSS_COUNT;
    use crate::generator::PartyGenerator;
    use crate::presets::is_choice_item;
    use crate::settings::{Difficulty, GameSettings};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{Item, PokemonType, TypeMask};

    #[rstest]
    #[case(Difficulty::Medium, 0, 3)]
    #[case(Difficulty::Medium, 4, 4)]
    #[case(Difficulty::Medium, 6, 5)]
    #[case(Difficulty::Medium, 7, 6)]
    #[case(Difficulty::Hard, 0, 4)]
    #[case(Difficulty::Brutal, 0, 6)]
    fn test_gym_party_size_follows_tier(#[case] difficulty: Difficulty, #[case] tier: u8, #[case] expected: usize) {
        let (settings, mut run) = TestRunBuilder::new(11)
            .with_difficulty(difficulty)
            .with_tier(tier)
            .build();
        let party = generate(&settings, &mut run, trainer_id("Misty"));
        assert_eq!(party.len(), expected);
    }

    #[test]
    fn test_capacity_limits_party() {
        let (settings, mut run) = TestRunBuilder::new(5)
            .with_difficulty(Difficulty::Brutal)
            .with_tier(9)
            .build();
        let generator = PartyGenerator::new(data(), &settings);
        let party = generator
            .create_trainer_party(&mut run, trainer_id("Lorelei"), 2, &EncounterContext::default())
            .unwrap();
        assert_eq!(party.len(), 2);
    }

    #[test]
    fn test_gym_mons_match_subset_type_and_level() {
        let (settings, mut run) = TestRunBuilder::new(3).with_tier(3).build();
        let party = generate(&settings, &mut run, trainer_id("Misty"));

        assert_eq!(party.len(), 4);
        for mon in &party {
            assert!(
                dex().is_of_type(mon.species, TypeMask::WATER),
                "{} is not water type",
                dex().name(mon.species)
            );
            assert_eq!(mon.level, 40);
        }
    }

    #[test]
    fn test_subsets_fill_in_order() {
        let (settings, mut run) = TestRunBuilder::new(8).with_tier(7).build();
        let party = generate(&settings, &mut run, trainer_id("Brock"));

        assert_eq!(party.len(), 6);
        let rock = party
            .iter()
            .filter(|mon| dex().is_of_type(mon.species, TypeMask::ROCK))
            .count();
        assert!(rock >= 4, "only {} rock mons in {:?}", rock, species_names(&party));
        for mon in &party {
            let types = dex().types(mon.species);
            assert!(
                types.contains(&PokemonType::Rock) || types.contains(&PokemonType::Ground),
                "{} escaped the subsets",
                dex().name(mon.species)
            );
            assert!(!types.contains(&PokemonType::Water) || types.contains(&PokemonType::Rock));
        }
    }

    #[test]
    fn test_no_similar_species_in_party() {
        let trainers = ["Youngster", "Brock", "Blue", "Misty", "Ace Trainer", "Karen", "Hiker"];
        for seed in 0..10 {
            let (settings, mut run) = TestRunBuilder::new(seed).with_tier(3).build();
            for name in trainers {
                let party = generate(&settings, &mut run, trainer_id(name));
                assert!(
                    has_no_similar_pairs(&party),
                    "seed {} gave {} duplicates: {:?}",
                    seed,
                    name,
                    species_names(&party)
                );
            }
        }
    }

    #[test]
    fn test_route_trainers_use_generic_levels() {
        let (settings, mut run) = TestRunBuilder::new(21).with_tier(4).build();
        let youngster = trainer_id("Youngster");
        let generator = PartyGenerator::new(data(), &settings);

        for route in [RouteModifier::Calm, RouteModifier::Average, RouteModifier::Tough] {
            let encounter = EncounterContext {
                route,
                ..Default::default()
            };
            let expected = Policy::new(&settings, 4).generic_level(0, route);
            let party = generator
                .create_trainer_party(&mut run, youngster, 6, &encounter)
                .unwrap();
            assert!(!party.is_empty());
            assert!(party.iter().all(|mon| mon.level == expected));
        }
    }

    #[test]
    fn test_level_override_makes_single_mon_party() {
        let (settings, mut run) = TestRunBuilder::new(2).with_tier(9).build();
        let party = generate(&settings, &mut run, trainer_id("Rich Boy"));
        assert_eq!(party.len(), 1);
        assert_eq!(party[0].level, 1);
    }

    #[test]
    fn test_party_pokeballs() {
        let (settings, mut run) = TestRunBuilder::new(4).with_tier(2).build();
        let brock = generate(&settings, &mut run, trainer_id("Brock"));
        assert!(brock.iter().all(|mon| mon.pokeball == Item::TimerBall));

        let youngster = generate(&settings, &mut run, trainer_id("Youngster"));
        assert!(youngster.iter().all(|mon| mon.pokeball == Item::PokeBall));
    }

    #[rstest]
    #[case(13)]
    #[case(12)]
    fn test_final_tiers_force_a_legendary(#[case] tier: u8) {
        // Below 380 strong-only filtering is off, leaving Suicune as the one water legendary.
        for seed in 0..5 {
            let (settings, mut run) = TestRunBuilder::new(seed)
                .with_tier(tier)
                .with_dex_limit(379)
                .build();
            let party = generate(&settings, &mut run, trainer_id("Misty"));

            assert_eq!(party.len(), 6);
            assert!(
                party.iter().any(|mon| dex().is_legendary(mon.species)),
                "seed {} tier {} gave {:?}",
                seed,
                tier,
                species_names(&party)
            );
        }
    }

    #[test]
    fn test_easy_trainers_hold_no_items() {
        let (settings, mut run) = TestRunBuilder::new(9)
            .with_difficulty(Difficulty::Easy)
            .with_tier(11)
            .build();
        let party = generate(&settings, &mut run, trainer_id("Lance"));
        assert!(party.iter().all(|mon| mon.held_item.is_none()));
    }

    #[test]
    fn test_brutal_bosses_use_competitive_sets() {
        let (settings, mut run) = TestRunBuilder::new(14)
            .with_difficulty(Difficulty::Brutal)
            .with_tier(10)
            .build();
        let party = generate(&settings, &mut run, trainer_id("Misty"));

        for mon in &party {
            let has_presets = !dex().presets(mon.species).is_empty();
            assert_eq!(
                mon.held_item.is_some(),
                has_presets,
                "{} held item mismatch",
                dex().name(mon.species)
            );
        }
    }

    /// The limited category an item belongs to, if any.
    fn limited_category(item: Item, settings: &GameSettings) -> Option<&'static str> {
        match item {
            Item::Leftovers => Some("leftovers"),
            Item::ShellBell => Some("shell bell"),
            _ if is_choice_item(item, settings.expansion) => Some("choice"),
            _ if settings.expansion && item.is_mega_stone() => Some("mega stone"),
            _ if settings.expansion && item.is_z_crystal() => Some("z-crystal"),
            _ => None,
        }
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn test_limited_items_appear_once_per_party(#[case] expansion: bool) {
        for seed in 0..10 {
            let builder = TestRunBuilder::new(seed)
                .with_difficulty(Difficulty::Brutal)
                .with_adventure();
            let builder = if expansion { builder.with_expansion() } else { builder };
            let (settings, mut run) = builder.build();

            for tier in 0..MAX_BOSS_COUNT {
                let Some(boss) = run.boss_for_tier(tier) else {
                    continue;
                };
                run.tier = tier;
                let party = generate(&settings, &mut run, boss);

                let mut seen = Vec::new();
                for item in party.iter().filter_map(|mon| mon.held_item) {
                    if let Some(category) = limited_category(item, &settings) {
                        assert!(
                            !seen.contains(&category),
                            "seed {} tier {} repeats {}: {:?}",
                            seed,
                            tier,
                            category,
                            party.iter().map(|mon| mon.held_item).collect::<Vec<_>>()
                        );
                        seen.push(category);
                    }
                }
            }
        }
    }
}
