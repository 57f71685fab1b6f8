//! Lead CLI commands: capture, list, move, score, delete.

use anyhow::{Context, Result};
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use leadflow_core::{score_lead, LeadStatus, NewLead, SubSegment, Workspace};
use leadflow_ids::LeadId;

#[derive(Subcommand, Debug, Clone)]
pub enum LeadAction {
    /// Capture a new lead in the active workspace
    Add {
        /// Company or prospect label
        company: String,
        /// Market sub-segment (Exporter, Wallet, Freelancer, Merchant, Other)
        #[arg(long)]
        segment: Option<SubSegment>,
        /// Free-text use case
        #[arg(long)]
        use_case: Option<String>,
        /// Free-text currency flow description
        #[arg(long)]
        currency_flow: Option<String>,
        /// Decision maker contact name
        #[arg(long)]
        decision_maker: Option<String>,
    },
    /// List leads in the active workspace with their scores
    List,
    /// Move a lead to a pipeline stage
    Move {
        lead_id: String,
        /// Target stage (New, Contacted, Demo Scheduled, Negotiation, Onboarded, Lost)
        status: LeadStatus,
    },
    /// Print the computed score for a lead
    Score { lead_id: String },
    /// Delete a lead
    Delete { lead_id: String },
}

pub async fn run(action: LeadAction) -> Result<()> {
    let (directory, session) = crate::cli::resolve_session().await?;
    let workspace = session
        .active()
        .context("No active workspace. Create one with: leadflow workspace create <name>")?
        .clone();
    let db = directory.db();

    match action {
        LeadAction::Add {
            company,
            segment,
            use_case,
            currency_flow,
            decision_maker,
        } => {
            let lead = db
                .create_lead(
                    &workspace.id,
                    NewLead {
                        company,
                        sub_segment: segment,
                        use_case,
                        currency_flow,
                        decision_maker_name: decision_maker,
                    },
                )
                .await?;
            println!(
                "Captured lead '{}' ({}) - score {}",
                lead.company,
                lead.id,
                score_lead(&lead)
            );
        }
        LeadAction::List => list_leads(db, &workspace).await?,
        LeadAction::Move { lead_id, status } => {
            let id = parse_lead_id(&lead_id)?;
            db.move_lead(&id, status).await?;
            println!("Moved lead {} to {}", id, status);
        }
        LeadAction::Score { lead_id } => {
            let id = parse_lead_id(&lead_id)?;
            let lead = db
                .get_lead(&id)
                .await?
                .with_context(|| format!("No lead with id {}", id))?;
            println!("{}", score_lead(&lead));
        }
        LeadAction::Delete { lead_id } => {
            let id = parse_lead_id(&lead_id)?;
            db.delete_lead(&id).await?;
            println!("Deleted lead {}", id);
        }
    }

    Ok(())
}

async fn list_leads(db: &leadflow_db::CrmDb, workspace: &Workspace) -> Result<()> {
    let leads = db.list_leads(&workspace.id).await?;

    if leads.is_empty() {
        println!("No leads in '{}'.", workspace.name);
        println!("Capture one with: leadflow lead add <company>");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["COMPANY", "STATUS", "SCORE", "SEGMENT", "ID"]);
    for lead in &leads {
        table.add_row([
            lead.company.clone(),
            lead.status.to_string(),
            score_lead(lead).to_string(),
            lead.sub_segment.map(|s| s.to_string()).unwrap_or_default(),
            lead.id.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn parse_lead_id(raw: &str) -> Result<LeadId> {
    LeadId::parse(raw).map_err(|e| anyhow::anyhow!("Invalid lead id: {}", e))
}
