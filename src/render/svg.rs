//! SVG cards rendered as frame images (1200x630, the 1.91:1 frame ratio).

use super::format::{escape, thousands};
use crate::domain::{Fid, LeaderboardEntry, MetricsResult};

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 630;
const ROW_HEIGHT: u32 = 46;

fn open(background_from: &str, background_to: &str) -> String {
    format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" ",
            "width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"Inter, sans-serif\">\n",
            "<defs><linearGradient id=\"bg\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"1\">",
            "<stop offset=\"0%\" stop-color=\"{from}\"/><stop offset=\"100%\" stop-color=\"{to}\"/>",
            "</linearGradient>",
            "<clipPath id=\"avatar\"><circle cx=\"600\" cy=\"190\" r=\"110\"/></clipPath></defs>\n",
            "<rect width=\"100%\" height=\"100%\" fill=\"url(#bg)\"/>\n"
        ),
        w = WIDTH,
        h = HEIGHT,
        from = background_from,
        to = background_to,
    )
}

/// Stats card: fid, avatar and the four figures of a [`MetricsResult`].
///
/// A red banner under the figures carries [`MetricsResult::error`].
#[must_use]
pub fn stats_card(metrics: &MetricsResult) -> String {
    let mut svg = open("#1e3c72", "#6b7280");
    svg.push_str(&format!(
        "<text x=\"30\" y=\"50\" font-size=\"28\" font-weight=\"700\" fill=\"#e0e7ff\">FID: {}</text>\n",
        metrics.fid
    ));
    svg.push_str(&format!(
        "<text x=\"1170\" y=\"50\" font-size=\"28\" font-weight=\"700\" fill=\"#e0e7ff\" text-anchor=\"end\">{}</text>\n",
        escape(&metrics.display_name)
    ));

    match &metrics.avatar_url {
        Some(url) => svg.push_str(&format!(
            "<image x=\"490\" y=\"80\" width=\"220\" height=\"220\" clip-path=\"url(#avatar)\" preserveAspectRatio=\"xMidYMid slice\" href=\"{}\"/>\n",
            escape(url)
        )),
        None => svg.push_str(
            "<circle cx=\"600\" cy=\"190\" r=\"110\" fill=\"#ffffff\" fill-opacity=\"0.1\"/>\n",
        ),
    }
    svg.push_str(
        "<circle cx=\"600\" cy=\"190\" r=\"110\" fill=\"none\" stroke=\"#ffffff\" stroke-width=\"6\"/>\n",
    );
    svg.push_str(
        "<rect x=\"25\" y=\"340\" width=\"1150\" height=\"250\" rx=\"20\" fill=\"#ffffff\" fill-opacity=\"0.05\" stroke=\"#ffffff\" stroke-opacity=\"0.15\"/>\n",
    );

    let stats = [
        ("🥜", "Today Earning", thousands(metrics.earning_count)),
        ("💰", "remaining Allowance", thousands(metrics.allowance)),
        ("🏅", "Rank", thousands(metrics.rank)),
        ("🌰", "all time earning", thousands(metrics.all_time_count)),
    ];
    for ((icon, label, value), x) in stats.iter().zip((150u32..).step_by(300)) {
        svg.push_str(&format!(
            "<text x=\"{x}\" y=\"410\" font-size=\"44\" text-anchor=\"middle\">{icon}</text>\n"
        ));
        svg.push_str(&format!(
            "<text x=\"{x}\" y=\"470\" font-size=\"27\" fill=\"#ffffff\" fill-opacity=\"0.8\" text-anchor=\"middle\">{label}</text>\n"
        ));
        svg.push_str(&format!(
            "<text x=\"{x}\" y=\"530\" font-size=\"40\" font-weight=\"700\" fill=\"#ffffff\" text-anchor=\"middle\">{value}</text>\n"
        ));
    }

    if let Some(error) = &metrics.error {
        svg.push_str(&format!(
            "<text x=\"600\" y=\"618\" font-size=\"18\" fill=\"#ff6b6b\" text-anchor=\"middle\">{}</text>\n",
            escape(error)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Leaderboard card. Rows belonging to `viewer` are highlighted; entries
/// without a display name show their raw fid.
#[must_use]
pub fn leaderboard_card(entries: &[LeaderboardEntry], viewer: Fid) -> String {
    let mut svg = open("#2a0845", "#6441a5");
    svg.push_str(
        "<text x=\"600\" y=\"70\" font-size=\"36\" font-weight=\"700\" fill=\"#ffffff\" text-anchor=\"middle\">Leaderboard 🏆</text>\n",
    );

    for (entry, y) in entries.iter().zip((100u32..).step_by(ROW_HEIGHT as usize)) {
        let fill = if entry.fid == viewer {
            "fill=\"#ffd700\" fill-opacity=\"0.2\""
        } else {
            "fill=\"#ffffff\" fill-opacity=\"0.1\""
        };
        let name = if entry.display_name.is_empty() {
            format!("FID: {}", entry.fid)
        } else {
            escape(&entry.display_name)
        };
        let ty = y + 27;
        svg.push_str(&format!(
            "<rect x=\"100\" y=\"{y}\" width=\"1000\" height=\"{h}\" rx=\"8\" {fill}/>\n",
            h = ROW_HEIGHT - 6
        ));
        svg.push_str(&format!(
            "<text x=\"120\" y=\"{ty}\" font-size=\"21\" fill=\"#ffffff\">{rank}. {name}</text>\n",
            rank = entry.rank
        ));
        svg.push_str(&format!(
            "<text x=\"1080\" y=\"{ty}\" font-size=\"21\" fill=\"#ffffff\" text-anchor=\"end\">{score} 🥜</text>\n",
            score = thousands(entry.score)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}
