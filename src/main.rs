use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pitchside::balance::balance_teams;
use pitchside::calculate::{
    compute_standings, find_ideal_partner, find_nemesis, sort_table, top_rival_pairs,
    top_teammate_pairs,
};
use pitchside::config::AppConfig;
use pitchside::models::{MatchRecord, Outcome, Participation, Player, PlayerId, Role, Side};
use pitchside::storage::{JsonlStore, MatchRepository, RosterRepository, StorageConfig};

#[derive(Parser)]
#[command(name = "pitchside")]
#[command(about = "Local five-a-side roster, match and standings tracker")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the roster with roles and ratings
    Roster,

    /// Print the standings table
    Standings,

    /// Split selected players into two balanced teams
    Balance {
        /// Comma-separated player ids to balance
        #[arg(long)]
        players: Option<String>,

        /// Balance the whole roster
        #[arg(long)]
        all: bool,

        /// Manual adjustment applied after the automatic pass,
        /// as "<player-id>:<side>" (repeatable)
        #[arg(long = "move")]
        moves: Vec<String>,
    },

    /// Show a player's most successful teammate
    Partner {
        /// Player id
        player_id: String,
    },

    /// Show the opponent a player most often loses to
    Nemesis {
        /// Player id
        player_id: String,
    },

    /// Rank teammate pairs by joint win rate
    Pairs {
        /// How many pairs to show (default from config)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Rank rivalries by how one-sided they are
    Rivals {
        /// How many rivalries to show (default from config)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Record a completed match
    RecordMatch {
        /// Match date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Winning side: "a", "b" or "draw"
        #[arg(long)]
        winner: String,

        /// Goal difference (ignored for draws)
        #[arg(long, default_value = "0")]
        margin: u32,

        /// Comma-separated player ids on side A
        #[arg(long)]
        team_a: String,

        /// Comma-separated player ids on side B
        #[arg(long)]
        team_b: String,
    },

    /// Write a sample roster and match history into the data directory
    Seed,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let config_path = PathBuf::from(&cli.config);
    let mut config = if config_path.exists() {
        AppConfig::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?
    } else {
        AppConfig::default()
    };
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = PathBuf::from(data_dir);
    }

    tracing::debug!("Using data directory {:?}", config.data_dir);
    let store = JsonlStore::new(StorageConfig::new(config.data_dir.clone()));

    match cli.command {
        Commands::Roster => {
            let players = store.load_players()?;
            if players.is_empty() {
                println!("Roster is empty. Run `pitchside seed` for sample data.");
                return Ok(());
            }

            println!("{:<18} {:<12} {:>4}  {:>7}", "ID", "NICKNAME", "ROLE", "OVERALL");
            for player in &players {
                println!(
                    "{:<18} {:<12} {:>4}  {:>7.1}",
                    player.id, player.nickname, player.role.label(), player.overall
                );
            }
        }

        Commands::Standings => {
            let players = store.load_players()?;
            let matches = store.load_matches()?;
            let participations = store.load_participations()?;

            let mut standings = compute_standings(&players, &matches, &participations);
            sort_table(&mut standings);

            println!(
                "{:>3} {:<12} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>5}  {}",
                "#", "PLAYER", "P", "W", "D", "L", "GD", "PTS", "WIN%", "FORM"
            );
            for (rank, standing) in standings.iter().enumerate() {
                println!(
                    "{:>3} {:<12} {:>3} {:>3} {:>3} {:>3} {:>+4} {:>4} {:>4.0}%  {}",
                    rank + 1,
                    standing.player.nickname,
                    standing.played,
                    standing.won,
                    standing.drawn,
                    standing.lost,
                    standing.goal_diff,
                    standing.points,
                    standing.win_rate * 100.0,
                    standing.form_string(),
                );
            }
        }

        Commands::Balance { players, all, moves } => {
            let roster = store.load_players()?;
            let selected: Vec<Player> = if all {
                roster
            } else {
                let Some(spec) = players else {
                    bail!("Pass --players <id,...> or --all");
                };
                let ids = parse_ids(&spec);
                let selected: Vec<Player> = roster
                    .iter()
                    .filter(|p| ids.contains(&p.id))
                    .cloned()
                    .collect();
                for id in &ids {
                    if !selected.iter().any(|p| &p.id == id) {
                        tracing::warn!("Unknown player id {} ignored", id);
                    }
                }
                selected
            };

            let mut result = balance_teams(&selected);
            for spec in &moves {
                let (id, side) = parse_move(spec)?;
                result = result.move_player(&id, side);
            }

            print_side("Team A", &result.team_a, result.avg_a);
            print_side("Team B", &result.team_b, result.avg_b);
            println!("Imbalance: {:.2}", result.difference);
            for warning in &result.warnings {
                println!("warning: {}", warning);
            }
        }

        Commands::Partner { player_id } => {
            let players = store.load_players()?;
            let matches = store.load_matches()?;
            let participations = store.load_participations()?;

            let id = PlayerId::from(player_id.as_str());
            match find_ideal_partner(&id, &players, &matches, &participations) {
                Some(insight) => println!(
                    "{}: {} wins in {} matches together ({:.0}%)",
                    insight.partner.nickname,
                    insight.wins_together,
                    insight.matches_together,
                    insight.win_rate * 100.0
                ),
                None => println!("Not enough shared matches yet."),
            }
        }

        Commands::Nemesis { player_id } => {
            let players = store.load_players()?;
            let matches = store.load_matches()?;
            let participations = store.load_participations()?;

            let id = PlayerId::from(player_id.as_str());
            match find_nemesis(&id, &players, &matches, &participations) {
                Some(insight) => println!(
                    "{}: {} losses in {} matches against ({:.0}%)",
                    insight.rival.nickname,
                    insight.losses_against,
                    insight.matches_against,
                    insight.loss_rate * 100.0
                ),
                None => println!("Not enough faced matches yet."),
            }
        }

        Commands::Pairs { top } => {
            let players = store.load_players()?;
            let matches = store.load_matches()?;
            let participations = store.load_participations()?;

            let top_n = top.unwrap_or(config.table.top_pairs);
            let pairs = top_teammate_pairs(&players, &matches, &participations, top_n);
            if pairs.is_empty() {
                println!("No pair has two shared matches yet.");
            }
            for (rank, pair) in pairs.iter().enumerate() {
                println!(
                    "{}. {} + {}: {}/{} wins ({:.0}%)",
                    rank + 1,
                    pair.player1.nickname,
                    pair.player2.nickname,
                    pair.wins_together,
                    pair.matches_together,
                    pair.win_rate * 100.0
                );
            }
        }

        Commands::Rivals { top } => {
            let players = store.load_players()?;
            let matches = store.load_matches()?;
            let participations = store.load_participations()?;

            let top_n = top.unwrap_or(config.table.top_pairs);
            let rivals = top_rival_pairs(&players, &matches, &participations, top_n);
            if rivals.is_empty() {
                println!("No rivalry has two faced matches yet.");
            }
            for (rank, rivalry) in rivals.iter().enumerate() {
                println!(
                    "{}. {} beats {} in {}/{} meetings ({:.0}%)",
                    rank + 1,
                    rivalry.dominant.nickname,
                    rivalry.underdog.nickname,
                    rivalry.dominant_wins,
                    rivalry.matches_against,
                    rivalry.dominance * 100.0
                );
            }
        }

        Commands::RecordMatch {
            date,
            winner,
            margin,
            team_a,
            team_b,
        } => {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .with_context(|| format!("Invalid --date (expected YYYY-MM-DD): {}", date))?;
            let outcome = parse_outcome(&winner)?;
            let side_a = parse_ids(&team_a);
            let side_b = parse_ids(&team_b);
            if side_a.iter().any(|id| side_b.contains(id)) {
                bail!("A player cannot appear on both sides");
            }

            let record = MatchRecord::new(date, outcome, margin, &side_a, &side_b);
            let participations: Vec<Participation> = side_a
                .iter()
                .map(|id| Participation::new(record.id.clone(), id.clone(), Side::A))
                .chain(
                    side_b
                        .iter()
                        .map(|id| Participation::new(record.id.clone(), id.clone(), Side::B)),
                )
                .collect();

            store.record_match(&record, &participations)?;
            println!("Recorded match {} on {}", record.id, record.date);
        }

        Commands::Seed => {
            let count = seed(&store)?;
            println!("Seeded {} players and 3 matches", count);
        }
    }

    Ok(())
}

fn parse_ids(spec: &str) -> Vec<PlayerId> {
    spec.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PlayerId::from)
        .collect()
}

fn parse_move(spec: &str) -> Result<(PlayerId, Side)> {
    let Some((id, side)) = spec.rsplit_once(':') else {
        bail!("Invalid --move (expected <player-id>:<side>): {}", spec);
    };
    let side = match side.to_ascii_lowercase().as_str() {
        "a" => Side::A,
        "b" => Side::B,
        other => bail!("Invalid side: {}. Use 'a' or 'b'.", other),
    };
    Ok((PlayerId::from(id), side))
}

fn parse_outcome(winner: &str) -> Result<Outcome> {
    match winner.to_ascii_lowercase().as_str() {
        "a" => Ok(Outcome::TeamA),
        "b" => Ok(Outcome::TeamB),
        "draw" => Ok(Outcome::Draw),
        other => bail!("Invalid --winner: {}. Use 'a', 'b' or 'draw'.", other),
    }
}

fn print_side(label: &str, team: &[Player], avg: f64) {
    println!("{} (avg {:.2}):", label, avg);
    for player in team {
        println!(
            "  {:<12} {:>4}  {:>4.1}",
            player.nickname,
            player.role.label(),
            player.overall
        );
    }
}

/// Write a small sample roster and match history, mirroring what a group
/// would have after a few weeks of play.
fn seed(store: &JsonlStore) -> Result<usize> {
    let roster = vec![
        ("p1", "Marco", 38, Role::Goalkeeper, (5.0, 5.2, 5.5, 6.0)),
        ("p2", "Dario", 45, Role::Goalkeeper, (4.8, 4.5, 5.8, 6.5)),
        ("p3", "Iron", 35, Role::Defender, (7.3, 5.5, 7.7, 7.2)),
        ("p4", "Curly", 28, Role::Defender, (6.8, 7.2, 7.3, 8.2)),
        ("p5", "Tank", 30, Role::Defender, (5.3, 6.8, 5.3, 5.2)),
        ("p6", "Professor", 32, Role::Midfielder, (8.7, 7.2, 9.0, 8.8)),
        ("p7", "Motor", 26, Role::Midfielder, (5.7, 6.8, 5.3, 5.2)),
        ("p8", "Lefty", 31, Role::Midfielder, (8.2, 8.5, 8.7, 9.5)),
        ("p9", "Flash", 24, Role::Forward, (7.7, 9.0, 7.3, 7.5)),
        ("p10", "Nine", 29, Role::Forward, (8.3, 8.5, 8.7, 8.5)),
    ];

    for (id, nickname, age, role, (tec, phy, tac, men)) in &roster {
        let player = Player::new(
            PlayerId::from(*id),
            nickname.to_string(),
            nickname.to_string(),
            *age,
            *role,
        )
        .with_ratings(*tec, *phy, *tac, *men);
        store.save_player(&player)?;
    }

    let fixtures = [
        ("2026-01-15", Outcome::TeamA, 2),
        ("2026-01-22", Outcome::TeamB, 1),
        ("2026-01-29", Outcome::Draw, 0),
    ];
    let side_a = parse_ids("p1,p3,p5,p6,p9");
    let side_b = parse_ids("p2,p4,p7,p8,p10");

    for (day, outcome, margin) in fixtures {
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").expect("valid seed date");
        let record = MatchRecord::new(date, outcome, margin, &side_a, &side_b);
        let participations: Vec<Participation> = side_a
            .iter()
            .map(|id| Participation::new(record.id.clone(), id.clone(), Side::A))
            .chain(
                side_b
                    .iter()
                    .map(|id| Participation::new(record.id.clone(), id.clone(), Side::B)),
            )
            .collect();
        store.record_match(&record, &participations)?;
    }

    Ok(roster.len())
}
