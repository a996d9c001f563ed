//! Text rendering of session snapshots and draw results.

use crate::economy::logic::ApplyReport;
use crate::loot::types::{DrawResult, Tier};
use crate::session::SessionSnapshot;

fn tier_marker(tier: Tier) -> &'static str {
    match tier {
        Tier::Dud => "·",
        Tier::Common | Tier::Uncommon => "◆",
        Tier::Rare | Tier::Epic => "★",
        Tier::Legendary | Tier::Mythic => "✦",
        Tier::Divine => "✺",
        Tier::Bomb => "✖",
    }
}

/// One line describing a resolved draw.
pub fn describe_result(result: &DrawResult) -> String {
    let marker = tier_marker(result.tier);
    if result.is_hazard {
        return format!("{} {}", marker, result.reward);
    }
    if result.is_dud() {
        return format!("{} Dud. Nothing found.", marker);
    }
    match &result.collectible_name {
        Some(name) if result.currency_awarded > 0 => format!(
            "{} {}: \"{}\" + {} coins",
            marker,
            result.tier.name(),
            name,
            result.currency_awarded
        ),
        Some(name) => format!("{} {}: \"{}\"", marker, result.tier.name(), name),
        None => format!(
            "{} {}: {} coins",
            marker,
            result.tier.name(),
            result.currency_awarded
        ),
    }
}

/// Result line plus what the economy did with it.
pub fn describe_draw(result: &DrawResult, report: &ApplyReport) -> String {
    let mut line = describe_result(result);
    if report.credited_to_run > 0 {
        line.push_str(&format!(
            " (x{:.1}, +{} to run)",
            report.multiplier_used, report.credited_to_run
        ));
    } else if report.credited_to_bank > 0 && !result.is_collectible {
        line.push_str(&format!(
            " (x{:.1}, +{} banked)",
            report.multiplier_used, report.credited_to_bank
        ));
    }
    if report.run_forfeited > 0 {
        line.push_str(&format!(" Lost {} run coins.", report.run_forfeited));
    }
    if report.life_lost {
        line.push_str(" -1 life.");
    }
    line
}

pub fn render_status(snapshot: &SessionSnapshot) -> String {
    let lives = if snapshot.unlimited_lives {
        "∞".to_string()
    } else {
        format!(
            "{}{} {}/{}",
            "♥".repeat(snapshot.lives as usize),
            "♡".repeat(snapshot.max_lives.saturating_sub(snapshot.lives) as usize),
            snapshot.lives,
            snapshot.max_lives
        )
    };

    let mut out = format!(
        "Coins: {}  Lives: {}  Draws: {}  Streak: {} (x{:.1})",
        snapshot.banked_currency,
        lives,
        snapshot.total_draws,
        snapshot.streak,
        snapshot.multiplier
    );
    if snapshot.variant.has_run_mechanic() {
        if snapshot.in_active_run {
            out.push_str(&format!("\nRun: {} coins at risk", snapshot.active_run_currency));
        } else {
            out.push_str("\nRun: none");
        }
    }
    if let Some(secs) = snapshot.next_life_in {
        out.push_str(&format!("\nNext life in {:.0}s", secs.ceil()));
    }
    if let Some(secs) = snapshot.draw_remaining {
        out.push_str(&format!("\nProspecting... {:.1}s", secs));
    }
    if !snapshot.connected {
        out.push_str("\nWallet not connected. Type 'connect'.");
    }
    out
}

pub fn render_collection(snapshot: &SessionSnapshot) -> String {
    if snapshot.collected_items.is_empty() {
        return "No NFTs collected yet.".to_string();
    }
    let mut out = format!("NFT collection ({}):", snapshot.collected_items.len());
    for item in &snapshot.collected_items {
        out.push_str(&format!(
            "\n  {} {:<10} {}",
            tier_marker(item.tier),
            item.tier.name(),
            item.collectible_name.as_deref().unwrap_or("?")
        ));
    }
    out
}

pub fn render_history(snapshot: &SessionSnapshot) -> String {
    if snapshot.recent_results.is_empty() {
        return "No draws yet.".to_string();
    }
    let mut out = String::from("Recent draws:");
    for result in &snapshot.recent_results {
        out.push_str("\n  ");
        out.push_str(&describe_result(result));
    }
    out
}
