//! Integration tests for the decision engine over full AI turns
//!
//! These tests verify the AI against live kingdom state:
//! - taxation, recruitment, and conflict codes are logged in order
//! - repeated turns compound their effects
//! - adaptive parameters stay within bounds
//! - a saved game resumes with the same engine state

use stronghold::ai::DecisionEngine;
use stronghold::core::config::GameConfig;
use stronghold::core::error::StrongholdError;
use stronghold::core::types::{DecisionCode, UnitType};
use stronghold::game::Game;
use stronghold::kingdom::{EconomyState, Kingdom, PopulationState};
use stronghold::save::SaveGame;

#[test]
fn test_first_ai_turn_codes() {
    let mut game = Game::new(&GameConfig::default());
    let report = game.run_ai_turn();

    assert_eq!(report.taxation.code, DecisionCode::TaxExcellent);
    assert_eq!(report.recruitment.code, DecisionCode::RecruitmentShort);
    assert_eq!(report.conflict.code, DecisionCode::Monitor);

    // 1000 + 588 in taxes
    assert_eq!(game.kingdom.economy.treasury(), 1588);
}

#[test]
fn test_decisions_compound_across_calls() {
    let mut kingdom = Kingdom::default();
    let mut engine = DecisionEngine::new();

    engine.decide_taxation(&mut kingdom.economy, &mut kingdom.population);
    let after_one = kingdom.economy.treasury();
    engine.decide_taxation(&mut kingdom.economy, &mut kingdom.population);

    assert!(kingdom.economy.treasury() > after_one);
    assert_eq!(engine.decisions().len(), 2);
}

#[test]
fn test_well_supplied_army_meets_targets() {
    let mut config = GameConfig::default();
    config.army.food_supply = 10_000;
    let mut game = Game::new(&config);

    let report = game.run_ai_turn();
    assert_eq!(report.recruitment.code, DecisionCode::RecruitmentMet);
    assert_eq!(game.kingdom.army.soldiers, 20 + 112);
    assert_eq!(game.kingdom.population.total(), 1000 - 112);
    assert!((game.engine.unit_strength(UnitType::Infantry) - 1.1).abs() < 1e-6);
}

#[test]
fn test_unrest_drives_escalating_responses() {
    let mut game = Game::new(&GameConfig::default());
    game.engine.add_unrest(10);
    game.kingdom.economy.treasury = 0;

    let report = game.run_ai_turn();
    // Taxes bring the treasury to 588, so only the conflict level counts
    assert_eq!(report.conflict.code, DecisionCode::MilitaryAction);
    assert_eq!(game.engine.conflict_level(), 7);
}

#[test]
fn test_parameters_stay_bounded_over_long_run() {
    let mut game = Game::new(&GameConfig::default());
    for _ in 0..40 {
        game.trigger_event();
        game.run_ai_turn();

        let engine = &game.engine;
        assert!((0.0..=1.0).contains(&engine.risk_tolerance()));
        assert!(engine.conflict_level() <= 10);
        for strength in engine.unit_strengths() {
            assert!((0.5..=2.0).contains(strength));
        }
    }
}

#[test]
fn test_save_and_resume() {
    let dir = std::env::temp_dir().join(format!("stronghold-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("save.json");

    let mut game = Game::new(&GameConfig::default());
    game.run_ai_turn();
    game.run_ai_turn();
    SaveGame::capture(&game).save_to(&path).unwrap();

    let mut resumed = SaveGame::load_from(&path).unwrap().into_game(42);
    assert_eq!(resumed.engine, game.engine);
    assert_eq!(resumed.current_turn(), 3);

    resumed.run_ai_turn();
    assert_eq!(resumed.history.len(), 3);
    assert_eq!(resumed.engine.decisions().len(), 9);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_failed_save_leaves_game_playable() {
    let mut game = Game::new(&GameConfig::default());
    game.run_ai_turn();

    let blocker = std::env::temp_dir().join(format!("stronghold-blocker-{}", std::process::id()));
    std::fs::write(&blocker, "not a directory").unwrap();
    let path = blocker.join("save.json");

    let result = SaveGame::capture(&game).save_to(&path);
    assert!(matches!(result, Err(StrongholdError::IoError(_))));

    game.run_ai_turn();
    assert_eq!(game.current_turn(), 3);

    std::fs::remove_file(&blocker).unwrap();
}
