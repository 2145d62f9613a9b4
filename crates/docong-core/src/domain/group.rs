//! Group (team) record, membership, and tracker credentials.

use serde::{Deserialize, Deserializer, Serialize};

use super::ids::GroupId;

/// Upper bound on a group name, in characters.
pub const GROUP_NAME_MAX_CHARS: usize = 15;

/// A group member (identity + display metadata).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub email: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Credentials for the external issue tracker (Jira).
///
/// Every field is required before the settings can be submitted. The API
/// sends `null` for a group that has never been connected; that reads as empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackerCredentials {
    #[serde(rename = "jiraDomain", default, deserialize_with = "null_as_empty")]
    pub domain: String,

    #[serde(rename = "jiraUserId", default, deserialize_with = "null_as_empty")]
    pub user_id: String,

    #[serde(rename = "jiraApiToken", default, deserialize_with = "null_as_empty")]
    pub api_token: String,

    #[serde(rename = "jiraProjectKey", default, deserialize_with = "null_as_empty")]
    pub project_key: String,
}

impl TrackerCredentials {
    pub fn is_configured(&self) -> bool {
        [&self.domain, &self.user_id, &self.api_token, &self.project_key]
            .iter()
            .all(|v| !v.trim().is_empty())
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A group as the persistence API returns it.
///
/// Tracker credentials sit at the top level of the payload (`jiraDomain`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRecord {
    #[serde(rename = "teamSeq")]
    pub id: GroupId,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_email: Option<String>,

    #[serde(rename = "userList", default)]
    pub members: Vec<Member>,

    #[serde(flatten)]
    pub tracker: TrackerCredentials,
}

impl GroupRecord {
    /// A group with no members and no tracker connection.
    pub fn new(id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            leader_email: None,
            members: Vec::new(),
            tracker: TrackerCredentials::default(),
        }
    }

    pub fn member(&self, email: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.email == email)
    }

    pub fn is_leader(&self, email: &str) -> bool {
        self.leader_email.as_deref() == Some(email)
    }
}

/// Payload of the group rename form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupModifyInput {
    pub user_email: String,
    pub team_id: GroupId,
    pub name: String,
}
