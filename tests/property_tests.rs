//! Property-based tests over the assembled application

use std::sync::Arc;

use cauldron::app::{BrewApp, BrewConfig};
use cauldron::prelude::*;
use proptest::prelude::*;

const ADDRESS: [u8; 32] = [7u8; 32];

fn setup() -> (Arc<Coprocessor>, BrewApp<Coprocessor>) {
    let backend = Arc::new(Coprocessor::with_secret([1u8; 32]));
    let app = BrewApp::new(BrewConfig::new(ADDRESS), backend.clone());
    (backend, app)
}

fn submit(
    backend: &Coprocessor,
    app: &mut BrewApp<Coprocessor>,
    player: &PlayerKeypair,
    picks: &[u8; BREW_SIZE],
    now: u64,
) -> ComputeResult {
    let bundle = backend
        .create_input(app.address(), player.identity().as_bytes(), picks)
        .unwrap();
    app.compute(player.identity(), &bundle, now).unwrap()
}

fn stored_score(app: &BrewApp<Coprocessor>, player: &PlayerKeypair) -> u64 {
    let (players, scores) = app.all_highest_scores();
    let index = players
        .iter()
        .position(|p| *p == player.identity())
        .unwrap();
    let handle = scores[index].handle;
    app.public_decrypt(&[handle]).unwrap()[&handle]
}

fn known_brew() -> impl Strategy<Value = [u8; BREW_SIZE]> {
    prop::array::uniform5(1u8..=8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Homomorphic scoring agrees with the plaintext table for any
    /// picks, known or unknown
    #[test]
    fn prop_score_matches_plaintext_table(picks in prop::array::uniform5(any::<u8>())) {
        let (backend, mut app) = setup();
        let player = PlayerKeypair::from_seed([5u8; 32]);

        submit(&backend, &mut app, &player, &picks, 100);
        let expected = ScoringTable::standard().score_plain(&picks);
        prop_assert_eq!(stored_score(&app, &player), expected);
    }

    /// The stored best is exactly the maximum over every brew the
    /// player has submitted, regardless of submission order
    #[test]
    fn prop_best_is_max_of_submissions(brews in prop::collection::vec(known_brew(), 1..6)) {
        let (backend, mut app) = setup();
        let player = PlayerKeypair::from_seed([5u8; 32]);
        let table = ScoringTable::standard();

        for (round, picks) in brews.iter().enumerate() {
            submit(&backend, &mut app, &player, picks, 100 + round as u64);
        }

        let expected = brews.iter().map(|p| table.score_plain(p)).max().unwrap();
        prop_assert_eq!(stored_score(&app, &player), expected);
    }

    /// One player's submissions never touch another's record
    #[test]
    fn prop_players_are_isolated(
        alice_brews in prop::collection::vec(known_brew(), 1..4),
        bob_brews in prop::collection::vec(known_brew(), 1..4),
    ) {
        let (backend, mut app) = setup();
        let alice = PlayerKeypair::from_seed([5u8; 32]);
        let bob = PlayerKeypair::from_seed([6u8; 32]);
        let table = ScoringTable::standard();

        let rounds = alice_brews.len().max(bob_brews.len());
        for round in 0..rounds {
            if let Some(picks) = alice_brews.get(round) {
                submit(&backend, &mut app, &alice, picks, 100 + round as u64);
            }
            if let Some(picks) = bob_brews.get(round) {
                submit(&backend, &mut app, &bob, picks, 100 + round as u64);
            }
        }

        let alice_best = alice_brews.iter().map(|p| table.score_plain(p)).max().unwrap();
        let bob_best = bob_brews.iter().map(|p| table.score_plain(p)).max().unwrap();
        prop_assert_eq!(stored_score(&app, &alice), alice_best);
        prop_assert_eq!(stored_score(&app, &bob), bob_best);
    }

    /// Every stored entry decrypts to the best of the player's brews
    /// through the public path
    #[test]
    fn prop_public_view_tracks_best(first in known_brew(), second in known_brew()) {
        let (backend, mut app) = setup();
        let player = PlayerKeypair::from_seed([5u8; 32]);
        let table = ScoringTable::standard();

        submit(&backend, &mut app, &player, &first, 100);
        submit(&backend, &mut app, &player, &second, 110);

        let expected = table.score_plain(&first).max(table.score_plain(&second));
        prop_assert_eq!(stored_score(&app, &player), expected);
        prop_assert_eq!(app.player_count(), 1);
        prop_assert_eq!(app.events().len(), 2);
    }

    /// Enumeration order is first-submission order, stable under
    /// resubmissions
    #[test]
    fn prop_enumeration_is_first_submission_order(seeds in prop::collection::vec(1u8..=16, 2..5)) {
        let (backend, mut app) = setup();
        let players: Vec<PlayerKeypair> = seeds
            .iter()
            .map(|&seed| PlayerKeypair::from_seed([seed; 32]))
            .collect();

        for (round, player) in players.iter().enumerate() {
            submit(&backend, &mut app, player, &[1, 2, 3, 4, 5], 100 + round as u64);
        }
        // Everyone resubmits in reverse; order must not move
        for (round, player) in players.iter().rev().enumerate() {
            submit(&backend, &mut app, player, &[8, 8, 8, 8, 8], 200 + round as u64);
        }

        let mut expected: Vec<Identity> = Vec::new();
        for player in &players {
            if !expected.contains(&player.identity()) {
                expected.push(player.identity());
            }
        }
        let (listed, _) = app.all_highest_scores();
        prop_assert_eq!(listed, expected);
    }
}
