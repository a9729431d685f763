//! Airstack GraphQL client for Farcaster profiles.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::IdentityDirectory;
use crate::domain::{Fid, IdentityRecord};
use crate::error::FrameError;

/// Social graph the lookups are restricted to.
const DAPP_NAME: &str = "farcaster";

const SOCIALS_QUERY: &str = "query FrameSocials($filter: SocialFilter = {}) {
  Socials(input: {filter: $filter, blockchain: ethereum}) {
    Social {
      profileName
      profileImage
      userId
    }
  }
}";

/// Resolves fids to profile names and avatars through Airstack.
#[derive(Debug, Clone)]
pub struct AirstackClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<SocialsData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct SocialsData {
    #[serde(rename = "Socials", default)]
    socials: Option<Socials>,
}

#[derive(Debug, Deserialize)]
struct Socials {
    #[serde(rename = "Social", default)]
    social: Option<Vec<Social>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Social {
    #[serde(default)]
    profile_name: Option<String>,
    #[serde(default)]
    profile_image: Option<String>,
    #[serde(default)]
    user_id: Option<Fid>,
}

impl AirstackClient {
    /// Creates a client posting to the GraphQL `endpoint`.
    #[must_use]
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

/// GraphQL variables selecting `fids` on the Farcaster graph.
fn socials_variables(fids: &[Fid]) -> serde_json::Value {
    let ids: Vec<String> = fids.iter().map(ToString::to_string).collect();
    json!({
        "filter": {
            "dappName": { "_eq": DAPP_NAME },
            "userId": { "_in": ids },
        }
    })
}

/// Converts a GraphQL response into identity records.
///
/// A response carrying only `errors` is a failure; `Social: null` means
/// nothing matched.
fn records_of(body: GraphQlResponse) -> Result<Vec<IdentityRecord>, FrameError> {
    let Some(data) = body.data else {
        let messages: Vec<String> = body.errors.into_iter().map(|e| e.message).collect();
        return Err(FrameError::IdentityDirectory(if messages.is_empty() {
            "response has no data".to_string()
        } else {
            messages.join("; ")
        }));
    };

    let socials = data.socials.and_then(|s| s.social).unwrap_or_default();
    Ok(socials
        .into_iter()
        .filter_map(|social| {
            social
                .user_id
                .map(|fid| IdentityRecord::new(fid, social.profile_name, social.profile_image))
        })
        .collect())
}

#[async_trait]
impl IdentityDirectory for AirstackClient {
    async fn lookup(&self, fids: &[Fid]) -> Result<Vec<IdentityRecord>, FrameError> {
        if fids.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!(count = fids.len(), "requesting airstack socials");

        let payload = json!({
            "query": SOCIALS_QUERY,
            "variables": socials_variables(fids),
        });

        let response = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .json(&payload)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| FrameError::IdentityDirectory(e.to_string()))?;

        let body: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| FrameError::IdentityDirectory(format!("unreadable socials body: {e}")))?;

        records_of(body)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::PLACEHOLDER_NAME;

    fn parse(value: serde_json::Value) -> GraphQlResponse {
        let Ok(body) = serde_json::from_value(value) else {
            panic!("body should decode");
        };
        body
    }

    #[test]
    fn variables_filter_farcaster_ids_as_strings() {
        let vars = socials_variables(&[Fid::new(1), Fid::new(443_855)]);
        assert_eq!(vars.pointer("/filter/dappName/_eq"), Some(&json!("farcaster")));
        assert_eq!(
            vars.pointer("/filter/userId/_in"),
            Some(&json!(["1", "443855"]))
        );
    }

    #[test]
    fn maps_socials_to_records() {
        let body = parse(json!({
            "data": { "Socials": { "Social": [
                { "profileName": "alice", "profileImage": "https://img/a.png", "userId": "1" },
                { "profileName": "", "profileImage": null, "userId": "2" },
                { "profileName": "ghost", "profileImage": null, "userId": null }
            ] } }
        }));
        let Ok(records) = records_of(body) else {
            panic!("records expected");
        };
        assert_eq!(records.len(), 2);
        assert_eq!(records.first().map(|r| r.display_name.as_str()), Some("alice"));
        assert_eq!(
            records.get(1).map(|r| r.display_name.as_str()),
            Some(PLACEHOLDER_NAME)
        );
    }

    #[test]
    fn null_social_list_is_empty_result() {
        let body = parse(json!({ "data": { "Socials": { "Social": null } } }));
        assert!(matches!(records_of(body), Ok(records) if records.is_empty()));
    }

    #[test]
    fn errors_without_data_fail() {
        let body = parse(json!({ "errors": [{ "message": "unauthorized" }] }));
        let Err(err) = records_of(body) else {
            panic!("expected failure");
        };
        assert!(err.to_string().contains("unauthorized"));
    }
}
