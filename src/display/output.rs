use colored::*;
use tabled::{settings::Style, Table, Tabled};

use crate::analysis::aggregator::{
    ChampionDetail, ChampionStats, PlayerPool, Snapshot, TeamProfile,
};
use crate::analysis::composition::CompositionAnalysis;
use crate::analysis::patterns::{TeamMatchup, TeamPatterns};
use crate::analysis::recommendation::{DraftRecommendations, DraftSimulation};
use crate::catalog::ChampionCatalog;
use crate::draft_rules::Side;

#[derive(Tabled)]
struct ChampionRow {
    champion: String,
    games: String,
    #[tabled(rename = "win rate")]
    win_rate: String,
    presence: String,
    #[tabled(rename = "pick rate")]
    pick_rate: String,
    #[tabled(rename = "ban rate")]
    ban_rate: String,
}

#[derive(Tabled)]
struct CandidateRow {
    rank: String,
    champion: String,
    score: String,
    confidence: String,
    meta: String,
    team: String,
    counter: String,
    #[tabled(rename = "comp/freq")]
    composition: String,
}

#[derive(Tabled)]
struct TeamRow {
    #[tabled(rename = "team id")]
    team_id: String,
    team: String,
    games: String,
    #[tabled(rename = "win rate")]
    win_rate: String,
    series: String,
}

#[derive(Tabled)]
struct PairRow {
    champion: String,
    games: String,
    #[tabled(rename = "win rate")]
    win_rate: String,
}

#[derive(Tabled)]
struct BanTargetRow {
    champion: String,
    priority: String,
    impact: String,
    reason: String,
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_snapshot_summary(snapshot: &Snapshot) {
    println!("\n{}", "📊 SNAPSHOT SUMMARY".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());
    println!(
        "  {} series / {} games ({} retained, {} rejected)",
        snapshot.total_series,
        snapshot.total_games,
        snapshot.retained_games.to_string().green(),
        snapshot.rejected_games.to_string().red()
    );
    println!(
        "  {} champions, {} teams, {} players\n",
        snapshot.champion_stats.len(),
        snapshot.team_profiles.len(),
        snapshot.player_pools.len()
    );
}

pub fn display_champion_list(champions: &[&ChampionStats]) {
    if champions.is_empty() {
        println!("{}", "No champions in the snapshot".yellow());
        return;
    }

    let rows: Vec<ChampionRow> = champions
        .iter()
        .map(|c| ChampionRow {
            champion: c.name.clone(),
            games: c.games_played.to_string(),
            win_rate: format!("{:.1}%", c.win_rate),
            presence: format!("{:.1}%", c.presence),
            pick_rate: format!("{:.1}%", c.pick_rate),
            ban_rate: format!("{:.1}%", c.ban_rate),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_champion_detail(detail: &ChampionDetail, catalog: &ChampionCatalog) {
    let stats = &detail.stats;
    println!("\n{}", format!("🏆 {}", stats.name).bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if let Some(entry) = catalog.get(&stats.name) {
        let role = match entry.secondary_role {
            Some(flex) => format!("{} (flex: {})", entry.primary_role.as_str(), flex.as_str()),
            None => entry.primary_role.as_str().to_string(),
        };
        println!("  Role: {}", role);
    }
    println!(
        "  {} games ({} wins) | {:.1}% WR | {:.1}% presence ({} picks, {} bans)",
        stats.games_played, stats.wins, stats.win_rate, stats.presence, stats.picks, stats.bans
    );
    println!(
        "  Blue: {}W/{} picks ({:.1}%) | Red: {}W/{} picks ({:.1}%)",
        stats.blue_wins,
        stats.blue_picks,
        stats.blue_win_rate,
        stats.red_wins,
        stats.red_picks,
        stats.red_win_rate
    );
    println!(
        "  Avg {:.1}/{:.1}/{:.1} KDA, {:.0} damage, {:.0} gold, {:.1} vision\n",
        stats.avg_kills,
        stats.avg_deaths,
        stats.avg_assists,
        stats.avg_damage,
        stats.avg_gold,
        stats.avg_vision
    );

    let pair_rows = |pairs: &[crate::analysis::aggregator::PairView]| -> Vec<PairRow> {
        pairs
            .iter()
            .map(|p| PairRow {
                champion: p.champion.clone(),
                games: format!("{} ({}W)", p.games, p.wins),
                win_rate: format!("{:.1}%", p.win_rate),
            })
            .collect()
    };

    if !detail.synergies.is_empty() {
        println!("{}", "Best teammates".bold().yellow());
        let mut table = Table::new(pair_rows(&detail.synergies));
        table.with(Style::rounded());
        println!("{}", table);
    }

    if !detail.counters.is_empty() {
        println!("{}", "Matchups (from this champion's side)".bold().yellow());
        let mut table = Table::new(pair_rows(&detail.counters));
        table.with(Style::rounded());
        println!("{}", table);
    }

    if !detail.picked_by_teams.is_empty() {
        println!("{}", "Picked by".bold().yellow());
        for team in &detail.picked_by_teams {
            println!(
                "  {} [{}] ({}W/{} games, {:.1}% WR)",
                team.team_name, team.team_id, team.wins, team.games, team.win_rate
            );
        }
    }
    println!();
}

pub fn display_team_list(teams: &[&TeamProfile]) {
    if teams.is_empty() {
        println!("{}", "No teams matched".yellow());
        return;
    }

    let rows: Vec<TeamRow> = teams
        .iter()
        .map(|t| TeamRow {
            team_id: t.team_id.clone(),
            team: t.team_name.clone(),
            games: t.total_games.to_string(),
            win_rate: format!("{:.1}%", t.win_rate),
            series: t.series_count.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_team_detail(profile: &TeamProfile, snapshot: &Snapshot) {
    println!("\n{}", format!("🛡️ {}", profile.team_name).bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());
    println!(
        "  {}-{} ({:.1}% WR) across {} series",
        profile.total_wins,
        profile.total_games - profile.total_wins,
        profile.win_rate,
        profile.series_count
    );
    println!(
        "  Blue: {}-{} ({:.1}%) | Red: {}-{} ({:.1}%)",
        profile.blue_wins,
        profile.blue_games - profile.blue_wins,
        profile.blue_win_rate,
        profile.red_wins,
        profile.red_games - profile.red_wins,
        profile.red_win_rate
    );

    let form: String = profile
        .recent_results
        .iter()
        .map(|r| r.as_char())
        .collect();
    if !form.is_empty() {
        println!("  Recent form: {}", form);
    }

    println!("\n{}", "Most picked".bold().yellow());
    for (champion, record) in profile.top_picks(5) {
        println!(
            "  {} ({} games, {:.1}% WR)",
            champion,
            record.games,
            record.win_rate()
        );
    }

    println!("\n{}", "Most banned".bold().yellow());
    for (champion, count) in TeamProfile::top_counts(&profile.champion_bans_by, 5) {
        println!("  {} ({}x)", champion, count);
    }

    let mut roster: Vec<&PlayerPool> = snapshot
        .player_pools
        .values()
        .filter(|pool| pool.team_id == profile.team_id)
        .collect();
    roster.sort_by(|a, b| {
        b.total_games
            .cmp(&a.total_games)
            .then_with(|| a.player_name.cmp(&b.player_name))
    });

    if !roster.is_empty() {
        println!("\n{}", "Player pools".bold().yellow());
        for pool in roster {
            let mut champs: Vec<_> = pool.champions.iter().collect();
            champs.sort_by(|a, b| b.1.games.cmp(&a.1.games).then_with(|| a.0.cmp(b.0)));
            if let Some((champion, record)) = champs.first() {
                println!(
                    "  {} ({} games, {} champions), signature: {} ({}W/{} games, {:.1}% WR, {:.1}/{:.1}/{:.1})",
                    pool.player_name,
                    pool.total_games,
                    pool.unique_champions,
                    champion,
                    record.wins,
                    record.games,
                    record.win_rate,
                    record.avg_kills,
                    record.avg_deaths,
                    record.avg_assists
                );
            }
        }
    }
    println!();
}

pub fn display_recommendations(result: &DraftRecommendations) {
    let action = result.next_action;
    let team_label = result
        .acting_team_name
        .clone()
        .or_else(|| result.acting_team_id.clone())
        .unwrap_or_else(|| format!("{} side", action.team_side.as_str()));

    println!(
        "\n{}",
        format!(
            "🎯 Recommendations: {} {} (position {}, {})",
            team_label,
            action.action_type.as_str().to_uppercase(),
            action.sequence_number,
            result.draft_phase.as_str()
        )
        .bold()
        .cyan()
    );
    println!("{}\n", "=".repeat(70).cyan());

    if result.recommendations.is_empty() {
        println!("{}", "No candidates available (not enough data)".yellow());
        return;
    }

    let rows: Vec<CandidateRow> = result
        .recommendations
        .iter()
        .enumerate()
        .map(|(idx, c)| CandidateRow {
            rank: format!("#{}", idx + 1),
            champion: c.champion_name.clone(),
            score: format!("{:.3}", c.score),
            confidence: c.confidence.as_str().to_string(),
            meta: format!("{:.2}", c.meta_score),
            team: format!("{:.2}", c.team_score),
            counter: format!("{:.2}", c.counter_score),
            composition: format!("{:.2}", c.composition_score),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    if let Some(top) = result.recommendations.first() {
        println!("\n{}", "Top candidate".bold().yellow());
        println!("  {}", top.champion_name.bold());
        for reason in &top.reasons {
            println!("  • {}", reason);
        }
    }
    println!();
}

fn display_composition(analysis: &CompositionAnalysis) {
    let label = match analysis.team_side {
        Some(Side::Blue) => "Blue side",
        Some(Side::Red) => "Red side",
        None => "Composition",
    };
    match &analysis.team_name {
        Some(name) => println!("{} ({})", label.bold(), name),
        None => println!("{}", label.bold()),
    }
    println!("  Champions: {}", analysis.champions.join(", "));
    println!(
        "  Archetype: {} ({})",
        analysis.archetype.as_str().bold(),
        analysis.archetype.description()
    );
    println!(
        "  Damage {}/{}/{} (phys/magic/mixed) | CC {:.2} | engage {} | avg WR {:.1}% | synergy {:.2}",
        analysis.damage_profile.physical,
        analysis.damage_profile.magic,
        analysis.damage_profile.mixed,
        analysis.cc_score,
        analysis.engage_count,
        analysis.avg_win_rate,
        analysis.synergy_score
    );
    for strength in &analysis.strengths {
        println!("  {} {}", "+".green(), strength);
    }
    for weakness in &analysis.weaknesses {
        println!("  {} {}", "-".red(), weakness);
    }
}

pub fn display_simulation(simulation: &DraftSimulation) {
    println!("\n{}", "⚔️ DRAFT SIMULATION".bold().cyan());
    println!("{}\n", "=".repeat(70).cyan());

    display_composition(&simulation.blue_analysis);
    println!();
    display_composition(&simulation.red_analysis);

    println!("\n{}", "Matchup notes".bold().yellow());
    for note in &simulation.matchup_notes {
        println!("  • {}", note);
    }

    let blue_pct = simulation.blue_win_probability * 100.0;
    println!(
        "\n{} {} {:.1}% / {} {:.1}%\n",
        "Win probability:".bold(),
        "Blue".blue().bold(),
        blue_pct,
        "Red".red().bold(),
        100.0 - blue_pct
    );
}

pub fn display_patterns(patterns: &TeamPatterns) {
    println!(
        "\n{}",
        format!("🔍 DRAFT PATTERNS: {} [{}]", patterns.team_name, patterns.team_id)
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(70).cyan());
    println!(
        "  {} games analyzed ({} on blue side)\n",
        patterns.total_games, patterns.blue_games
    );

    println!("{}", "Ban priorities".bold().yellow());
    for ban in patterns.ban_priorities.bans_by_team.iter().take(5) {
        println!("  bans {} ({}x, {:.1}%)", ban.champion, ban.count, ban.rate);
    }
    for ban in patterns.ban_priorities.bans_against_team.iter().take(5) {
        println!(
            "  banned against: {} ({}x, {:.1}%)",
            ban.champion, ban.count, ban.rate
        );
    }
    for pick in &patterns.ban_priorities.first_ban_blue {
        println!("  first ban on blue: {} ({}x)", pick.champion, pick.count);
    }
    for pick in &patterns.ban_priorities.first_ban_red {
        println!("  first ban on red: {} ({}x)", pick.champion, pick.count);
    }

    if !patterns.first_pick_preferences.is_empty() {
        println!("\n{}", "Blue-side first picks".bold().yellow());
        for pref in &patterns.first_pick_preferences {
            println!(
                "  {} ({}x, {:.1}% WR)",
                pref.champion, pref.count, pref.win_rate
            );
        }
    }

    if !patterns.comfort_picks.is_empty() {
        println!("\n{}", "Comfort picks".bold().yellow());
        for pick in &patterns.comfort_picks {
            let marker = if pick.above_average {
                "↑".green().to_string()
            } else {
                "↓".red().to_string()
            };
            println!(
                "  {} {} ({}W-{}L, {:.1}% pick rate, {:.1}% WR)",
                marker,
                pick.champion,
                pick.wins,
                pick.games - pick.wins,
                pick.pick_rate,
                pick.win_rate
            );
        }
    }

    if !patterns.one_trick_alerts.is_empty() {
        println!("\n{}", "One-trick alerts".bold().yellow());
        for alert in &patterns.one_trick_alerts {
            println!(
                "  {} {} on {} ({}/{} games, {:.0}%, {:.1}% WR, {} champions played)",
                if alert.severity == crate::analysis::patterns::Severity::High {
                    "⚠️".red().to_string()
                } else {
                    "⚠️".yellow().to_string()
                },
                alert.player_name,
                alert.champion,
                alert.games,
                alert.total_games,
                alert.concentration,
                alert.win_rate,
                alert.unique_champions
            );
        }
    }

    println!("\n{}", "Composition tendencies".bold().yellow());
    for (tag, share) in patterns.composition_tendencies.tag_distribution.iter().take(5) {
        println!("  {}: {:.1}%", tag, share);
    }
    for (role, share) in patterns.composition_tendencies.role_distribution.iter().take(5) {
        println!("  {} lane: {:.1}%", role, share);
    }

    println!("\n{}", "Adaptation between games".bold().yellow());
    for note in &patterns.adaptation_notes {
        println!("  • {}", note);
    }

    if !patterns.ban_recommendations.is_empty() {
        println!("\n{}", "Recommended bans against this team".bold().red());
        let rows: Vec<BanTargetRow> = patterns
            .ban_recommendations
            .iter()
            .map(|r| BanTargetRow {
                champion: r.champion.clone(),
                priority: r.priority.as_str().to_string(),
                impact: format!("{:.3}", r.impact_score),
                reason: r.reason.clone(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}", table);
    }
    println!();
}

pub fn display_matchup(matchup: &TeamMatchup) {
    println!(
        "\n{}",
        format!(
            "⚡ MATCHUP: {} vs {}",
            matchup.team1.team_name, matchup.team2.team_name
        )
        .bold()
        .cyan()
    );
    println!("{}\n", "=".repeat(70).cyan());

    for team in [&matchup.team1, &matchup.team2] {
        println!(
            "  {} [{}] ({} games, {:.1}% WR)",
            team.team_name.bold(),
            team.team_id,
            team.total_games,
            team.win_rate
        );
    }

    println!("\n{}", "Shared priority picks".bold().yellow());
    if matchup.shared_priority_picks.is_empty() {
        println!("  none");
    } else {
        println!("  {}", matchup.shared_priority_picks.join(", "));
    }

    println!("\n{}", "Shared priority bans".bold().yellow());
    if matchup.shared_priority_bans.is_empty() {
        println!("  none");
    } else {
        println!("  {}", matchup.shared_priority_bans.join(", "));
    }

    let ban_section = |label: &str, recs: &[crate::analysis::patterns::BanRecommendation]| {
        println!("\n{}", label.bold().red());
        if recs.is_empty() {
            println!("  no high-impact targets");
        }
        for rec in recs {
            println!("  {} ({})", rec.champion, rec.reason);
        }
    };
    ban_section(
        &format!("Ban targets vs {}", matchup.team1.team_name),
        &matchup.ban_recommendations_vs_team1,
    );
    ban_section(
        &format!("Ban targets vs {}", matchup.team2.team_name),
        &matchup.ban_recommendations_vs_team2,
    );
    println!();
}
