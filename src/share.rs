//! Warpcast compose link for sharing a stats card.

use chrono::{DateTime, Utc};

use crate::domain::MetricsResult;

const COMPOSE_URL: &str = "https://warpcast.com/~/compose";

/// Builds the compose link for `metrics`.
///
/// The cast text quotes the earning and allowance figures; the embed points
/// back at this server's stats frame with the user's fid, name and avatar
/// as query parameters. `now` makes each embed URL unique so clients do not
/// reuse a cached preview.
#[must_use]
pub fn share_url(metrics: &MetricsResult, public_base_url: &str, now: DateTime<Utc>) -> String {
    let text = format!(
        "I earned {} 🥜 today and have {} Allowance left!",
        metrics.earning_count, metrics.allowance
    );
    let embed = format!(
        "{base}/?hashid=hash-{fid}-{millis}&fid={fid}&username={name}&pfpUrl={avatar}",
        base = public_base_url.trim_end_matches('/'),
        fid = metrics.fid,
        millis = now.timestamp_millis(),
        name = urlencoding::encode(&metrics.display_name),
        avatar = urlencoding::encode(metrics.avatar_url.as_deref().unwrap_or_default()),
    );
    format!(
        "{COMPOSE_URL}?text={}&embeds[]={}",
        urlencoding::encode(&text),
        urlencoding::encode(&embed)
    )
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Fid;

    fn metrics() -> MetricsResult {
        MetricsResult {
            fid: Fid::new(42),
            earning_count: 12,
            allowance: 3,
            all_time_count: 100,
            rank: 1,
            display_name: "bob smith".to_string(),
            avatar_url: Some("https://i.img/x.png".to_string()),
            error: None,
        }
    }

    fn query_param(url: &str, key: &str) -> String {
        let prefix = format!("{key}=");
        let Some(raw) = url
            .split(['?', '&'])
            .find_map(|pair| pair.strip_prefix(prefix.as_str()))
        else {
            panic!("missing {key} in {url}");
        };
        let Ok(decoded) = urlencoding::decode(raw) else {
            panic!("undecodable {key}");
        };
        decoded.into_owned()
    }

    #[test]
    fn encodes_text_and_embed() {
        let Some(now) = DateTime::from_timestamp_millis(1_700_000_000_123) else {
            panic!("timestamp out of range");
        };
        let url = share_url(&metrics(), "https://frame.example/", now);
        assert!(url.starts_with("https://warpcast.com/~/compose?text="));

        assert_eq!(
            query_param(&url, "text"),
            "I earned 12 🥜 today and have 3 Allowance left!"
        );

        let embed = query_param(&url, "embeds[]");
        assert!(embed.starts_with("https://frame.example/?hashid=hash-42-1700000000123&fid=42"));
        assert_eq!(query_param(&embed, "username"), "bob smith");
        assert_eq!(query_param(&embed, "pfpUrl"), "https://i.img/x.png");
    }

    #[test]
    fn missing_avatar_is_empty() {
        let mut m = metrics();
        m.avatar_url = None;
        let url = share_url(&m, "http://localhost:3000", Utc::now());
        let embed = query_param(&url, "embeds[]");
        assert!(embed.ends_with("&pfpUrl="));
    }
}
