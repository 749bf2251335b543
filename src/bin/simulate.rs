//! Headless bot-vs-bot simulation.
//!
//! Plays many independent games where both sides are driven by the opponent
//! search, then reports who won, why, and which hands were played.
//!
//! Usage: `simulate [games] [config.json]`

use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;

use air_poker::engine::{new_game, pick_random_target, play_round_dealt, DealError, GameConfig, Winner};
use air_poker::patterns::{choose_opponent_pick, PatternIndex};

const DEFAULT_GAMES: usize = 1000;
const OUTPUT_FILE: &str = "simulation.json";

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let games = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_GAMES);
    let config = load_config();
    let base_seed = config.seed.unwrap_or_else(rand::random);

    println!("=== Air Poker Simulation ===");
    println!("Games: {}, rounds per game: {}, base seed: {}\n", games, config.max_rounds, base_seed);

    let start = Instant::now();
    let index = PatternIndex::shared();
    log::info!("pattern index ready: {} patterns", index.len());

    let progress = ProgressBar::new(games as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} games [{elapsed_precise}]") {
        progress.set_style(style);
    }

    let summaries: Vec<GameSummary> = (0..games)
        .into_par_iter()
        .map(|i| {
            let summary = play_game(index, config.max_rounds, base_seed.wrapping_add(i as u64));
            progress.inc(1);
            summary
        })
        .collect::<Result<_, DealError>>()?;
    progress.finish();

    let report = Report::from_games(&summaries, base_seed, start.elapsed().as_secs_f64());
    report.print();

    let json = serde_json::to_string_pretty(&report)?;
    let mut file = File::create(OUTPUT_FILE)?;
    file.write_all(json.as_bytes())?;
    println!("\nReport exported to: {}", OUTPUT_FILE);

    Ok(())
}

fn init_logging() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    // A second logger is the only failure mode; keep going without ours
    let _ = simplelog::TermLogger::init(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
}

fn load_config() -> GameConfig {
    let Some(path) = std::env::args().nth(2) else {
        return GameConfig::default();
    };
    match GameConfig::from_json_file(&path) {
        Ok(config) => {
            log::info!("loaded config from {}", path);
            config
        }
        Err(e) => {
            log::warn!("could not load {}: {}, using defaults", path, e);
            GameConfig::default()
        }
    }
}

/// What one game produced.
struct GameSummary {
    winner: Winner,
    rounds: Vec<(Winner, String)>,
    categories: Vec<String>,
    fallbacks: usize,
    cards_left: usize,
}

fn play_game(index: &PatternIndex, max_rounds: u32, seed: u64) -> Result<GameSummary, DealError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = new_game(max_rounds, &mut rng)?;
    let mut fallbacks = 0;
    let mut categories = Vec::new();

    while !state.is_game_over() {
        let Some(target) = pick_random_target(&state.player_targets, &mut rng).cloned() else {
            break;
        };
        let player = choose_opponent_pick(index, target.sum, &state.deck, &mut rng);
        let played = play_round_dealt(&state, index, &target.id, player.hand, &mut rng);

        fallbacks += usize::from(player.fallback) + usize::from(played.npc_pick.fallback);
        for outcome in [&played.result.player, &played.result.npc] {
            if let Some(category) = outcome.hand_category {
                categories.push(category.code().to_string());
            }
        }
        state = played.next_state;
    }

    Ok(GameSummary {
        winner: state.leader(),
        rounds: state
            .history
            .iter()
            .map(|r| (r.winner, r.win_reason.code().to_string()))
            .collect(),
        categories,
        fallbacks,
        cards_left: state.deck.len(),
    })
}

/// Aggregated simulation results, exported as JSON.
#[derive(Debug, Serialize)]
struct Report {
    games: usize,
    base_seed: u64,
    elapsed_secs: f64,
    game_winners: FxHashMap<String, usize>,
    round_winners: FxHashMap<String, usize>,
    win_reasons: FxHashMap<String, usize>,
    hand_categories: FxHashMap<String, usize>,
    fallback_hands: usize,
    avg_cards_left: f64,
}

impl Report {
    fn from_games(games: &[GameSummary], base_seed: u64, elapsed_secs: f64) -> Self {
        let mut report = Report {
            games: games.len(),
            base_seed,
            elapsed_secs,
            game_winners: FxHashMap::default(),
            round_winners: FxHashMap::default(),
            win_reasons: FxHashMap::default(),
            hand_categories: FxHashMap::default(),
            fallback_hands: 0,
            avg_cards_left: 0.0,
        };

        let mut cards_left = 0;
        for game in games {
            *report.game_winners.entry(game.winner.to_string()).or_insert(0) += 1;
            for (winner, reason) in &game.rounds {
                *report.round_winners.entry(winner.to_string()).or_insert(0) += 1;
                *report.win_reasons.entry(reason.clone()).or_insert(0) += 1;
            }
            for category in &game.categories {
                *report.hand_categories.entry(category.clone()).or_insert(0) += 1;
            }
            report.fallback_hands += game.fallbacks;
            cards_left += game.cards_left;
        }
        if !games.is_empty() {
            report.avg_cards_left = cards_left as f64 / games.len() as f64;
        }
        report
    }

    fn print(&self) {
        println!("\n=== Summary ===");
        println!("Total time: {:.2}s", self.elapsed_secs);
        println!("Games played: {}", self.games);
        print_counts("Game winners", &self.game_winners);
        print_counts("Round winners", &self.round_winners);
        print_counts("Win reasons", &self.win_reasons);
        print_counts("Hand categories", &self.hand_categories);
        println!("Fallback hands: {}", self.fallback_hands);
        println!("Average cards left: {:.1}", self.avg_cards_left);
    }
}

fn print_counts(title: &str, counts: &FxHashMap<String, usize>) {
    let mut rows: Vec<_> = counts.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    println!("{}:", title);
    for (name, count) in rows {
        println!("  {:<16} {}", name, count);
    }
}
