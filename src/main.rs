// Courtside entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr; stdout carries the report)
// 2. Load config
// 3. Load seed data (roster, team profiles, game log)
// 4. Select the analyzed team and scout the opponent field
// 5. Optimize the lineup and score its chemistry
// 6. Run the scenario tournament against the top contender
// 7. Print the report (text or --json)

use anyhow::Context;
use std::collections::HashSet;
use tracing::{info, warn};

use courtside::analytics::{anomaly, chemistry, lineup, radar, scouting, tournament};
use courtside::config;
use courtside::data;

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("courtside starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: cap {}, {} slots ({}G/{}F/{}C), {} simulation iterations",
        config.lineup.salary_cap,
        config.lineup.slots,
        config.lineup.guards,
        config.lineup.forwards,
        config.lineup.centers,
        config.simulation.iterations
    );

    // 3. Load seed data
    let base_dir = std::env::current_dir().context("failed to resolve working directory")?;
    let seed = data::load_seed_data(&base_dir, &config.data).context("failed to load seed data")?;
    info!(
        "Loaded {} players, {} teams, {} games",
        seed.players.len(),
        seed.teams.len(),
        seed.games.len()
    );

    // 4. Select team and scout opponents
    let args: Vec<String> = std::env::args().skip(1).collect();
    let json_mode = args.iter().any(|a| a == "--json");
    let requested_team = args.iter().find(|a| !a.starts_with("--"));

    let team = match requested_team {
        Some(name) => seed
            .teams
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .with_context(|| format!("team '{}' not found in seed data", name))?,
        None => seed.teams.first().context("seed data contains no teams")?,
    };
    info!("Analyzing {} ({})", team.name, team.conference);

    let opponents_path = base_dir.join(&config.data.opponents);
    let opponents_text = std::fs::read_to_string(&opponents_path)
        .with_context(|| format!("failed to read {}", opponents_path.display()))?;
    let opponent_rows = scouting::parse_team_rows(&opponents_text);
    let contenders = scouting::rank_contenders(&opponent_rows);
    if contenders.is_empty() {
        warn!("no valid opponent rows; simulating against a neutral opponent");
    }
    let opponent = contenders.first();
    let opponent_net = opponent.map(|o| o.net_rating).unwrap_or(0.0);

    // 5. Lineup and chemistry
    let constraints = lineup::LineupConstraints {
        guards: config.lineup.guards,
        forwards: config.lineup.forwards,
        centers: config.lineup.centers,
        min_minutes: config.lineup.min_minutes,
        excluded_ids: HashSet::new(),
    };
    let best_lineup = lineup::optimize_lineup(
        &seed.players,
        config.lineup.salary_cap,
        Some(&constraints),
        config.lineup.slots,
    );
    let lineup_chemistry = chemistry::score_chemistry(&best_lineup.lineup);
    let anomalies = anomaly::detect_anomalies(&seed.games);

    // 6. Scenario tournament
    let entries = tournament::run_tournament(team, opponent_net, config.simulation.iterations);

    // 7. Report
    if json_mode {
        print_json_report(team, opponent, &best_lineup, &lineup_chemistry, &anomalies, &entries)?;
    } else {
        print_text_report(team, opponent, &best_lineup, &lineup_chemistry, &anomalies, &entries);
    }

    Ok(())
}

fn print_text_report(
    team: &data::TeamProfile,
    opponent: Option<&scouting::ContenderRanking>,
    best_lineup: &lineup::LineupResult,
    lineup_chemistry: &chemistry::LineupChemistry,
    anomalies: &[anomaly::GameAnomaly],
    entries: &[tournament::TournamentEntry],
) {
    println!("== Courtside report: {} ==", team.name);
    match opponent {
        Some(o) => println!(
            "Opponent: {} (net {:+.1}, contender score {:.2})",
            o.name, o.net_rating, o.contender_score
        ),
        None => println!("Opponent: neutral (no valid scouting rows)"),
    }

    println!("\n-- Optimal lineup --");
    match best_lineup.feasibility {
        lineup::Feasibility::Infeasible => {
            println!("No feasible lineup under the current cap and constraints.")
        }
        lineup::Feasibility::Optimal => {
            for p in &best_lineup.lineup {
                println!(
                    "  {:<2} {:<22} salary {:>10}  fantasy {:>5.1}",
                    p.position.display_str(),
                    p.name,
                    p.salary,
                    lineup::fantasy_projection(p)
                );
            }
            println!(
                "  total salary {}  fantasy {:.1}  defense {:.1}",
                best_lineup.total_salary,
                best_lineup.projected_fantasy,
                best_lineup.projected_defense
            );
            println!(
                "  chemistry: ball movement {:.1}, spacing {:.1}, switchability {:.1}, overall {:.1}",
                lineup_chemistry.ball_movement,
                lineup_chemistry.spacing,
                lineup_chemistry.switchability,
                lineup_chemistry.overall
            );
            if let Some(leader) = best_lineup.lineup.first() {
                let r = radar::radar_stats(leader);
                println!(
                    "  {} radar: scoring {} shooting {} playmaking {} rebounding {} defense {} motor {}",
                    leader.name, r.scoring, r.shooting, r.playmaking, r.rebounding, r.defense, r.motor
                );
            }
        }
    }

    println!("\n-- Game log outliers --");
    if anomalies.is_empty() {
        println!("  (no games on record)");
    }
    for a in anomalies {
        println!(
            "  {} vs {:<22} diff {:+.0}  score {:>6.1}  {}",
            a.date, a.opponent, a.point_differential, a.anomaly_score, a.label
        );
    }

    println!("\n-- Scenario tournament --");
    for entry in entries {
        println!(
            "  {:<14} composite {:>6.2}  win prob {:>3.0}%  sim win rate {:>5.1}%  margin {:>6.2} ({:.2} to {:.2})  key lever: {}",
            entry.name,
            entry.composite,
            entry.win_probability,
            entry.simulation.win_rate,
            entry.simulation.average_margin,
            entry.simulation.floor_margin,
            entry.simulation.ceiling_margin,
            entry.top_factor
        );
    }
    if let Some(best) = entries.first() {
        println!("\n-- Plan: {} --", best.name);
        for rec in &best.recommendations {
            println!("  [{:>4.1}] {} - {}", rec.impact, rec.title, rec.rationale);
        }
        println!("  margin distribution:");
        for bucket in &best.simulation.distribution {
            println!("    {:>10}: {}", bucket.label, bucket.count);
        }
    }
}

fn print_json_report(
    team: &data::TeamProfile,
    opponent: Option<&scouting::ContenderRanking>,
    best_lineup: &lineup::LineupResult,
    lineup_chemistry: &chemistry::LineupChemistry,
    anomalies: &[anomaly::GameAnomaly],
    entries: &[tournament::TournamentEntry],
) -> anyhow::Result<()> {
    let report = serde_json::json!({
        "team": team.name,
        "opponent": opponent.map(|o| serde_json::json!({
            "name": o.name,
            "net_rating": o.net_rating,
            "contender_score": o.contender_score,
        })),
        "lineup": {
            "feasible": best_lineup.feasibility == lineup::Feasibility::Optimal,
            "players": best_lineup.lineup.iter().map(|p| serde_json::json!({
                "id": p.id,
                "name": p.name,
                "position": p.position.display_str(),
                "salary": p.salary,
            })).collect::<Vec<_>>(),
            "total_salary": best_lineup.total_salary,
            "projected_fantasy": best_lineup.projected_fantasy,
            "projected_defense": best_lineup.projected_defense,
            "chemistry": {
                "ball_movement": lineup_chemistry.ball_movement,
                "spacing": lineup_chemistry.spacing,
                "switchability": lineup_chemistry.switchability,
                "overall": lineup_chemistry.overall,
            },
        },
        "anomalies": anomalies.iter().map(|a| serde_json::json!({
            "opponent": a.opponent,
            "date": a.date.to_string(),
            "point_differential": a.point_differential,
            "anomaly_score": a.anomaly_score,
            "label": a.label.display_str(),
        })).collect::<Vec<_>>(),
        "tournament": entries.iter().map(|e| serde_json::json!({
            "name": e.name,
            "composite": e.composite,
            "win_probability": e.win_probability,
            "win_rate": e.simulation.win_rate,
            "average_margin": e.simulation.average_margin,
            "floor_margin": e.simulation.floor_margin,
            "ceiling_margin": e.simulation.ceiling_margin,
            "top_factor": e.top_factor.label(),
            "recommendations": e.recommendations.iter().map(|r| serde_json::json!({
                "title": r.title,
                "impact": r.impact,
            })).collect::<Vec<_>>(),
        })).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Initialize tracing to stderr so stdout stays clean for the report.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("courtside=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
