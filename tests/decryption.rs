//! Decryption paths through the assembled application

use std::sync::Arc;

use cauldron::app::{BrewApp, BrewConfig, BrewError};
use cauldron::gateway::GatewayError;
use cauldron::prelude::*;

const ADDRESS: [u8; 32] = [7u8; 32];
const DAY: u64 = 24 * 60 * 60;

fn setup() -> (Arc<Coprocessor>, BrewApp<Coprocessor>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    let backend = Arc::new(Coprocessor::with_secret([1u8; 32]));
    let app = BrewApp::new(BrewConfig::new(ADDRESS), backend.clone());
    (backend, app)
}

fn submit(
    backend: &Coprocessor,
    app: &mut BrewApp<Coprocessor>,
    player: &PlayerKeypair,
    picks: &[u8],
    now: u64,
) -> ComputeResult {
    let bundle = backend
        .create_input(app.address(), player.identity().as_bytes(), picks)
        .unwrap();
    app.compute(player.identity(), &bundle, now).unwrap()
}

fn decrypt_request(
    player: &PlayerKeypair,
    handle: Handle,
    valid_from: u64,
    valid_until: u64,
) -> SignedDecryptRequest {
    player
        .sign_statement(DecryptStatement {
            response_key: [9u8; 32],
            handle,
            contracts: vec![ADDRESS],
            valid_from,
            valid_until,
        })
        .unwrap()
}

#[test]
fn test_submitter_decrypts_fresh_result_and_flag() {
    let (backend, mut app) = setup();
    let player = PlayerKeypair::from_seed([5u8; 32]);

    let event = submit(&backend, &mut app, &player, &[1, 2, 3, 4, 5], 100);

    let score_req = decrypt_request(&player, event.result.handle, 100, 100 + DAY);
    let score = app.user_decrypt(&score_req, 150).unwrap();
    assert_eq!(score, ScoringTable::standard().score_plain(&[1, 2, 3, 4, 5]));

    // A first submission always wins
    let flag_req = decrypt_request(&player, event.is_highest.handle, 100, 100 + DAY);
    assert_eq!(app.user_decrypt(&flag_req, 150).unwrap(), 1);
}

#[test]
fn test_is_highest_flag_stays_encrypted_until_decrypted() {
    let (backend, mut app) = setup();
    let player = PlayerKeypair::from_seed([5u8; 32]);

    submit(&backend, &mut app, &player, &[8, 8, 8, 8, 8], 100);
    let losing = submit(&backend, &mut app, &player, &[1, 1, 1, 1, 1], 110);
    assert_eq!(losing.is_highest.ty, FheType::Ebool);

    let flag_req = decrypt_request(&player, losing.is_highest.handle, 110, 110 + DAY);
    assert_eq!(app.user_decrypt(&flag_req, 150).unwrap(), 0);
}

#[test]
fn test_zero_score_first_submission_reports_highest() {
    let (backend, mut app) = setup();
    let player = PlayerKeypair::from_seed([5u8; 32]);

    // Out-of-table picks score zero, yet a first submission always wins
    let event = submit(&backend, &mut app, &player, &[9, 9, 9, 9, 9], 100);

    let flag_req = decrypt_request(&player, event.is_highest.handle, 100, 100 + DAY);
    assert_eq!(app.user_decrypt(&flag_req, 150).unwrap(), 1);

    let score_req = decrypt_request(&player, event.result.handle, 100, 100 + DAY);
    assert_eq!(app.user_decrypt(&score_req, 150).unwrap(), 0);
}

#[test]
fn test_losing_result_decrypts_strictly_lower() {
    let (backend, mut app) = setup();
    let player = PlayerKeypair::from_seed([5u8; 32]);

    let first = submit(&backend, &mut app, &player, &[8, 8, 8, 8, 8], 100);
    let second = submit(&backend, &mut app, &player, &[1, 1, 1, 1, 1], 110);

    let first_req = decrypt_request(&player, first.result.handle, 100, 100 + DAY);
    let second_req = decrypt_request(&player, second.result.handle, 110, 110 + DAY);
    let first_score = app.user_decrypt(&first_req, 150).unwrap();
    let second_score = app.user_decrypt(&second_req, 150).unwrap();
    assert!(second_score < first_score);

    // The stored best is still the first (higher) score
    let (_, scores) = app.all_highest_scores();
    let best = app.public_decrypt(&[scores[0].handle]).unwrap()[&scores[0].handle];
    assert_eq!(best, first_score);
}

#[test]
fn test_other_player_cannot_decrypt_result() {
    let (backend, mut app) = setup();
    let player = PlayerKeypair::from_seed([5u8; 32]);
    let snoop = PlayerKeypair::from_seed([6u8; 32]);

    let event = submit(&backend, &mut app, &player, &[1, 2, 3, 4, 5], 100);

    let req = decrypt_request(&snoop, event.result.handle, 100, 100 + DAY);
    assert!(matches!(
        app.user_decrypt(&req, 150),
        Err(BrewError::Gateway(GatewayError::UnauthorizedDecryption))
    ));
}

#[test]
fn test_grant_window_is_time_boxed() {
    let (backend, mut app) = setup();
    let player = PlayerKeypair::from_seed([5u8; 32]);

    let event = submit(&backend, &mut app, &player, &[1, 2, 3, 4, 5], 100);

    // Statement window is generous; only the grant window has lapsed
    let req = decrypt_request(&player, event.result.handle, 100, 100 + 100 * DAY);
    assert!(app.user_decrypt(&req, 100 + 9 * DAY).is_ok());
    assert!(matches!(
        app.user_decrypt(&req, 100 + 11 * DAY),
        Err(BrewError::Gateway(GatewayError::WindowExpired))
    ));
}

#[test]
fn test_tampered_statement_rejected() {
    let (backend, mut app) = setup();
    let player = PlayerKeypair::from_seed([5u8; 32]);

    let event = submit(&backend, &mut app, &player, &[1, 2, 3, 4, 5], 100);

    let mut req = decrypt_request(&player, event.result.handle, 100, 100 + DAY);
    req.statement.valid_until = 100 + 100 * DAY;
    assert!(matches!(
        app.user_decrypt(&req, 150),
        Err(BrewError::Gateway(GatewayError::SignatureMismatch(_)))
    ));
}

#[test]
fn test_statement_must_name_this_contract() {
    let (backend, mut app) = setup();
    let player = PlayerKeypair::from_seed([5u8; 32]);

    let event = submit(&backend, &mut app, &player, &[1, 2, 3, 4, 5], 100);

    let req = player
        .sign_statement(DecryptStatement {
            response_key: [9u8; 32],
            handle: event.result.handle,
            contracts: vec![[8u8; 32]],
            valid_from: 100,
            valid_until: 100 + DAY,
        })
        .unwrap();
    assert!(matches!(
        app.user_decrypt(&req, 150),
        Err(BrewError::Gateway(GatewayError::SignatureMismatch(_)))
    ));
}

#[test]
fn test_public_batch_decrypts_whole_board() {
    let (backend, mut app) = setup();
    let alice = PlayerKeypair::from_seed([5u8; 32]);
    let bob = PlayerKeypair::from_seed([6u8; 32]);

    submit(&backend, &mut app, &alice, &[1, 1, 1, 1, 1], 100);
    submit(&backend, &mut app, &bob, &[8, 8, 8, 8, 8], 110);

    let (_, scores) = app.all_highest_scores();
    let handles: Vec<Handle> = scores.iter().map(|s| s.handle).collect();
    let decrypted = app.public_decrypt(&handles).unwrap();

    let table = ScoringTable::standard();
    assert_eq!(decrypted[&handles[0]], table.min_brew_score());
    assert_eq!(decrypted[&handles[1]], table.max_brew_score());
}

#[test]
fn test_public_decrypt_rejects_stale_handle() {
    let (backend, mut app) = setup();
    let player = PlayerKeypair::from_seed([5u8; 32]);

    submit(&backend, &mut app, &player, &[8, 8, 8, 8, 8], 100);
    let (_, scores) = app.all_highest_scores();
    let stale = scores[0].handle;

    // The slot is rewritten even for a losing brew
    submit(&backend, &mut app, &player, &[1, 1, 1, 1, 1], 110);
    assert!(matches!(
        app.public_decrypt(&[stale]),
        Err(BrewError::Gateway(GatewayError::UnknownHandle(_)))
    ));

    // One stale handle fails the whole batch
    let (_, scores) = app.all_highest_scores();
    assert!(app.public_decrypt(&[scores[0].handle, stale]).is_err());
}

#[test]
fn test_fresh_results_are_not_publicly_decryptable() {
    let (backend, mut app) = setup();
    let player = PlayerKeypair::from_seed([5u8; 32]);

    submit(&backend, &mut app, &player, &[8, 8, 8, 8, 8], 100);
    // A losing result handle never becomes a stored entry
    let losing = submit(&backend, &mut app, &player, &[1, 1, 1, 1, 1], 110);
    assert!(matches!(
        app.public_decrypt(&[losing.result.handle]),
        Err(BrewError::Gateway(GatewayError::UnknownHandle(_)))
    ));
}
