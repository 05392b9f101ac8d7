//! GitHub GraphQL client for the contribution calendar.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::application::contributions::{ContributionsError, ContributionsProvider};
use crate::domain::{
    contributions::{ContributionCalendar, ContributionDay},
    posts::parse_published_date,
};

use super::error::InfraError;

const CONTRIBUTIONS_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
            color
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Clone)]
pub struct GithubContributionsClient {
    client: Client,
    endpoint: Url,
    token: Option<String>,
}

impl GithubContributionsClient {
    pub fn new(
        endpoint: Url,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, InfraError> {
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(timeout)
            .build()
            .map_err(|err| InfraError::http_client(err.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            token,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("folio/", env!("CARGO_PKG_VERSION"))
    }
}

#[async_trait]
impl ContributionsProvider for GithubContributionsClient {
    async fn fetch(&self, username: &str) -> Result<ContributionCalendar, ContributionsError> {
        let body = json!({
            "query": CONTRIBUTIONS_QUERY,
            "variables": { "login": username },
        });

        let mut request = self.client.post(self.endpoint.clone()).json(&body);
        if let Some(token) = self.token.as_deref() {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| ContributionsError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContributionsError::Status(status.as_u16()));
        }

        let payload: GraphqlResponse = response
            .json()
            .await
            .map_err(|err| ContributionsError::Payload(err.to_string()))?;

        let calendar = calendar_from_response(payload)?;
        debug!(
            target = "folio::github",
            username,
            days = calendar.days().len(),
            "fetched contribution calendar"
        );
        Ok(calendar)
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    contributions_collection: CollectionNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CollectionNode {
    contribution_calendar: CalendarNode,
}

#[derive(Debug, Deserialize)]
struct CalendarNode {
    #[serde(default)]
    weeks: Vec<WeekNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeekNode {
    #[serde(default)]
    contribution_days: Vec<DayNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DayNode {
    date: String,
    contribution_count: u32,
}

fn calendar_from_response(
    response: GraphqlResponse,
) -> Result<ContributionCalendar, ContributionsError> {
    if let Some(error) = response.errors.first() {
        return Err(ContributionsError::Payload(error.message.clone()));
    }

    let user = response
        .data
        .and_then(|data| data.user)
        .ok_or_else(|| ContributionsError::Payload("user not found".to_string()))?;

    let mut days = Vec::new();
    for week in user.contributions_collection.contribution_calendar.weeks {
        for day in week.contribution_days {
            let date = parse_published_date(&day.date).map_err(ContributionsError::Payload)?;
            days.push(ContributionDay::new(date, day.contribution_count));
        }
    }

    Ok(ContributionCalendar::new(days))
}
