//! Stronghold - Entry Point
//!
//! Interactive menu for running a kingdom by hand or handing turns to the AI.

use std::io::{self, Write};
use std::path::PathBuf;

use stronghold::core::config::GameConfig;
use stronghold::core::error::Result;
use stronghold::core::types::ResourceKind;
use stronghold::game::Game;
use stronghold::kingdom::{AuditOutcome, PopulationState, RecruitOutcome, ResourceBundle};
use stronghold::save::SaveGame;
use stronghold::score_log::ScoreLog;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stronghold=info")),
        )
        .init();

    tracing::info!("Stronghold starting...");

    // Optional config file; defaults otherwise
    let config = match std::env::var("STRONGHOLD_CONFIG") {
        Ok(path) => GameConfig::load(&PathBuf::from(path))?,
        Err(_) => {
            tracing::warn!("STRONGHOLD_CONFIG not set - using default kingdom");
            GameConfig::default()
        }
    };

    let mut game = Game::new(&config).with_score_log(ScoreLog::new(&config.score_log_path));

    println!("\n=== STRONGHOLD ===");
    print_help();

    loop {
        println!();
        println!(
            "--- Turn {} | Population: {} | Treasury: {} ---",
            game.current_turn(),
            game.kingdom.population.total(),
            game.kingdom.economy.treasury
        );

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let mut words = input.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        match command {
            "quit" | "q" => break,
            "help" | "h" => print_help(),
            "status" | "s" => println!("{}", game.kingdom.overview()),
            "simulate" => {
                let delta = game.simulate_population();
                println!("Population changed by {:+}", delta);
            }
            "recruit" => match args.first().and_then(|n| n.parse::<u32>().ok()) {
                Some(count) => match game.recruit(count) {
                    RecruitOutcome::Recruited { count, food_used } => {
                        println!("{} soldiers recruited, {} rations used", count, food_used)
                    }
                    RecruitOutcome::InvalidRequest => println!("Invalid number of recruits."),
                    RecruitOutcome::InsufficientFood { required, available } => println!(
                        "Not enough food: {} needed, {} available. Morale drops.",
                        required, available
                    ),
                },
                None => println!("Usage: recruit <count>"),
            },
            "tax" => {
                let collection = game.collect_taxes();
                println!("Collected {} gold", collection.revenue);
                if let AuditOutcome::Fraud { lost } = collection.audit {
                    println!("Bank audit: fraud uncovered, {} gold missing!", lost);
                }
            }
            "use" => match (
                args.first().and_then(|k| k.parse::<ResourceKind>().ok()),
                args.get(1).and_then(|n| n.parse::<u32>().ok()),
            ) {
                (Some(kind), Some(amount)) => match game.use_resource(kind, amount) {
                    Some(left) => println!("{} {} used, {} left.", amount, kind.name(), left),
                    None => println!("Not enough {} available.", kind.name()),
                },
                _ => println!("Usage: use <food|wood|stone|iron> <amount>"),
            },
            "rations" => match args.first().and_then(|n| n.parse::<u32>().ok()) {
                Some(food) if game.resupply_army(food) => {
                    println!("{} food sent to the army.", food)
                }
                Some(_) => println!("Not enough food in the stockpile."),
                None => println!("Usage: rations <food>"),
            },
            "loan" => match args.first().and_then(|n| n.parse::<u32>().ok()) {
                Some(amount) if game.take_loan(amount) => {
                    println!("The bank lends {} gold.", amount)
                }
                Some(_) => println!("The bank refuses the loan."),
                None => println!("Usage: loan <gold>"),
            },
            "repay" => match args.first().and_then(|n| n.parse::<u32>().ok()) {
                Some(amount) => match game.repay_loan(amount) {
                    0 => println!("Nothing repaid."),
                    repaid => println!("Repaid {} gold.", repaid),
                },
                None => println!("Usage: repay <gold>"),
            },
            "gather" | "consume" => match parse_bundle(&args) {
                Some(bundle) if command == "gather" => {
                    game.gather(bundle);
                    println!("Resources gathered.");
                }
                Some(bundle) => {
                    if game.consume(bundle) {
                        println!("Resources consumed.");
                    } else {
                        println!("Insufficient resources. Consumption failed.");
                    }
                }
                None => println!("Usage: {} <food> <wood> <stone> <iron>", command),
            },
            "event" => {
                let (_, label) = game.trigger_event();
                println!("{}", label);
            }
            "policy" => println!("{}", game.apply_leadership()),
            "ai" => println!("{}", game.run_ai_turn()),
            "next" => {
                game.snapshot("End of turn");
                game.advance_turn();
            }
            "history" => println!("{}", game.history_report()),
            "save" => match SaveGame::capture(&game).save_to(&config.save_path) {
                Ok(()) => {
                    let path = config.save_path.display();
                    game.log_event("GAME_SAVE", &format!("Game state saved to {}", path));
                    println!("Game saved.");
                }
                Err(e) => println!("Could not save game: {}", e),
            },
            "load" => match SaveGame::load_from(&config.save_path) {
                Ok(save) => {
                    let mut loaded = save.into_game(config.seed);
                    if let Some(log) = game.take_score_log() {
                        loaded = loaded.with_score_log(log);
                    }
                    game = loaded;
                    let path = config.save_path.display();
                    game.log_event("GAME_LOAD", &format!("Game state loaded from {}", path));
                    println!("Game loaded.");
                }
                Err(e) => println!("Could not load game: {}", e),
            },
            _ => println!("Unknown command. Type 'help' for the list."),
        }
    }

    println!(
        "\nGame exited after {} turns. Long live the kingdom!",
        game.current_turn().saturating_sub(1)
    );
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  status / s                  - Kingdom overview");
    println!("  simulate                    - Simulate population changes");
    println!("  recruit <n>                 - Recruit and train soldiers");
    println!("  tax                         - Collect taxes");
    println!("  gather <f> <w> <s> <i>      - Gather resources");
    println!("  consume <f> <w> <s> <i>     - Consume resources");
    println!("  use <resource> <n>          - Use one kind of resource");
    println!("  rations <n>                 - Send stockpiled food to the army");
    println!("  loan <n> / repay <n>        - Borrow from or repay the bank");
    println!("  event                       - Trigger a random event");
    println!("  policy                      - Apply the ruler's policy");
    println!("  ai                          - Let the AI run this turn");
    println!("  next                        - Advance to the next turn");
    println!("  history                     - Kingdom history report");
    println!("  save / load                 - Save or load the game");
    println!("  quit / q                    - Exit");
}

fn parse_bundle(args: &[&str]) -> Option<ResourceBundle> {
    let amounts: Vec<u32> = args.iter().map(|a| a.parse().ok()).collect::<Option<_>>()?;
    match amounts.as_slice() {
        [food, wood, stone, iron] => Some(ResourceBundle {
            food: *food,
            wood: *wood,
            stone: *stone,
            iron: *iron,
        }),
        _ => None,
    }
}
