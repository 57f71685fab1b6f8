//! Canonical domain types shared across all Leadflow crates.

use chrono::{DateTime, Utc};
use leadflow_ids::{LeadId, UserId, WorkspaceId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Pipeline
// ============================================================================

/// Pipeline stage of a lead. Fixed, ordered set - kanban columns render in
/// this order and drag actions move leads between these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    #[serde(rename = "Demo Scheduled")]
    DemoScheduled,
    Negotiation,
    Onboarded,
    Lost,
}

impl LeadStatus {
    /// All stages in pipeline order.
    pub const ALL: [LeadStatus; 6] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::DemoScheduled,
        LeadStatus::Negotiation,
        LeadStatus::Onboarded,
        LeadStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::DemoScheduled => "Demo Scheduled",
            LeadStatus::Negotiation => "Negotiation",
            LeadStatus::Onboarded => "Onboarded",
            LeadStatus::Lost => "Lost",
        }
    }

    /// Position in the pipeline (kanban column index).
    pub fn position(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    /// Stages past first contact that earn the scoring engagement bonus.
    pub fn is_engaged(&self) -> bool {
        matches!(
            self,
            LeadStatus::Contacted
                | LeadStatus::DemoScheduled
                | LeadStatus::Negotiation
                | LeadStatus::Onboarded
        )
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "new" => Ok(LeadStatus::New),
            "contacted" => Ok(LeadStatus::Contacted),
            "demo scheduled" | "demo" => Ok(LeadStatus::DemoScheduled),
            "negotiation" => Ok(LeadStatus::Negotiation),
            "onboarded" => Ok(LeadStatus::Onboarded),
            "lost" => Ok(LeadStatus::Lost),
            _ => Err(format!(
                "Invalid lead status: '{}'. Expected one of: New, Contacted, Demo Scheduled, Negotiation, Onboarded, Lost",
                s
            )),
        }
    }
}

/// Market sub-segment a lead belongs to. Stored verbatim; scoring matches
/// on the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubSegment {
    Exporter,
    Wallet,
    Freelancer,
    Merchant,
    Other,
}

impl SubSegment {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubSegment::Exporter => "Exporter",
            SubSegment::Wallet => "Wallet",
            SubSegment::Freelancer => "Freelancer",
            SubSegment::Merchant => "Merchant",
            SubSegment::Other => "Other",
        }
    }
}

impl fmt::Display for SubSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubSegment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exporter" => Ok(SubSegment::Exporter),
            "wallet" => Ok(SubSegment::Wallet),
            "freelancer" => Ok(SubSegment::Freelancer),
            "merchant" => Ok(SubSegment::Merchant),
            "other" => Ok(SubSegment::Other),
            _ => Err(format!(
                "Invalid sub-segment: '{}'. Expected one of: Exporter, Wallet, Freelancer, Merchant, Other",
                s
            )),
        }
    }
}

// ============================================================================
// Leads
// ============================================================================

/// A sales prospect, scoped to exactly one workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub workspace_id: WorkspaceId,
    /// Company or prospect label shown on the kanban card.
    pub company: String,
    pub sub_segment: Option<SubSegment>,
    pub use_case: Option<String>,
    pub currency_flow: Option<String>,
    pub decision_maker_name: Option<String>,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when capturing a new lead. Everything the scoring
/// engine reads is optional on intake.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLead {
    pub company: String,
    pub sub_segment: Option<SubSegment>,
    pub use_case: Option<String>,
    pub currency_flow: Option<String>,
    pub decision_maker_name: Option<String>,
}

// ============================================================================
// Tenancy
// ============================================================================

/// A tenant boundary. All lead data is scoped to exactly one workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    /// URL-safe identifier, unique across all workspaces.
    pub slug: String,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Role a member holds within a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Admin,
    #[default]
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "owner" => Ok(Role::Owner),
            "admin" => Ok(Role::Admin),
            "member" => Ok(Role::Member),
            _ => Err(format!(
                "Invalid role: '{}'. Expected: owner, admin, or member",
                s
            )),
        }
    }
}

/// Grant of workspace access to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// The authenticated user, as reported by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_display_and_parse() {
        for status in LeadStatus::ALL {
            let parsed: LeadStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn status_parse_is_forgiving_about_separators() {
        assert_eq!(
            "demo-scheduled".parse::<LeadStatus>().unwrap(),
            LeadStatus::DemoScheduled
        );
        assert_eq!(
            "DEMO_SCHEDULED".parse::<LeadStatus>().unwrap(),
            LeadStatus::DemoScheduled
        );
    }

    #[test]
    fn status_serde_uses_display_names() {
        let json = serde_json::to_string(&LeadStatus::DemoScheduled).unwrap();
        assert_eq!(json, "\"Demo Scheduled\"");
    }

    #[test]
    fn engagement_bonus_stages() {
        assert!(!LeadStatus::New.is_engaged());
        assert!(LeadStatus::Contacted.is_engaged());
        assert!(LeadStatus::DemoScheduled.is_engaged());
        assert!(LeadStatus::Negotiation.is_engaged());
        assert!(LeadStatus::Onboarded.is_engaged());
        assert!(!LeadStatus::Lost.is_engaged());
    }

    #[test]
    fn pipeline_order_is_stable() {
        assert_eq!(LeadStatus::New.position(), 0);
        assert_eq!(LeadStatus::Onboarded.position(), 4);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), "\"owner\"");
        assert_eq!("OWNER".parse::<Role>().unwrap(), Role::Owner);
    }
}
