//! Leadflow core: canonical domain types and business rules.
//!
//! This crate is the single source of truth for the CRM domain model:
//! leads and their pipeline, workspaces and memberships, the scoring
//! engine, and the `WorkspaceDirectory` contract that the data-access
//! layer implements. It has no I/O of its own.

pub mod directory;
pub mod error;
pub mod score;
pub mod slug;
pub mod types;

// Re-export types for convenience
pub use directory::WorkspaceDirectory;
pub use error::DataAccessError;
pub use score::{score_lead, MAX_SCORE};
pub use slug::{slugify, unique_slug};
pub use types::{
    Lead, LeadStatus, Membership, NewLead, Role, SubSegment, UserIdentity, Workspace,
};

pub use leadflow_ids::{LeadId, UserId, WorkspaceId};
