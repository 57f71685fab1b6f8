//! Pipeline dashboard for the active workspace.

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use leadflow_core::{score_lead, LeadStatus};

pub async fn run() -> Result<()> {
    let (directory, session) = crate::cli::resolve_session().await?;
    let workspace = session
        .active()
        .context("No active workspace. Create one with: leadflow workspace create <name>")?;
    let db = directory.db();

    let counts = db.count_leads_by_status(&workspace.id).await?;
    let leads = db.list_leads(&workspace.id).await?;

    println!("Workspace: {} [{}]", workspace.name, workspace.slug);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["STAGE", "LEADS"]);
    for status in LeadStatus::ALL {
        let count = counts.get(&status).copied().unwrap_or(0);
        table.add_row([status.to_string(), count.to_string()]);
    }
    println!("{table}");

    if !leads.is_empty() {
        let total: u32 = leads.iter().map(|l| score_lead(l) as u32).sum();
        println!(
            "{} leads, average score {}",
            leads.len(),
            total / leads.len() as u32
        );
    }

    Ok(())
}
