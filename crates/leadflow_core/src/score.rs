//! Lead scoring engine.
//!
//! Pure, deterministic, additive point system. Each rule is evaluated
//! independently against the lead's current fields; contributions are
//! summed and clamped to [`MAX_SCORE`]. Absent fields contribute zero -
//! the function cannot fail.

use crate::types::{Lead, SubSegment};

/// Upper bound of the score range.
pub const MAX_SCORE: u8 = 100;

/// Compute the score for a lead's current field values.
///
/// Rules stack: a lead matching every rule lands exactly on the bound
/// (20 + 20 + 15 + 15 + 10 + 20 = 100). No rule subtracts points.
pub fn score_lead(lead: &Lead) -> u8 {
    let mut total: u32 = 0;

    if matches!(
        lead.sub_segment,
        Some(SubSegment::Exporter) | Some(SubSegment::Wallet)
    ) {
        total += 20;
    }

    if contains_ignore_case(lead.use_case.as_deref(), "high volume") {
        total += 20;
    }

    // Currency flow matches are case-sensitive: "INR" is a currency code.
    if lead
        .currency_flow
        .as_deref()
        .is_some_and(|flow| flow.contains("INR"))
    {
        total += 15;
    }

    if contains_ignore_case(lead.use_case.as_deref(), "on-ramp") {
        total += 15;
    }

    if lead
        .decision_maker_name
        .as_deref()
        .is_some_and(|name| !name.is_empty())
    {
        total += 10;
    }

    if lead.status.is_engaged() {
        total += 20;
    }

    total.min(MAX_SCORE as u32) as u8
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LeadStatus;
    use chrono::Utc;
    use leadflow_ids::{LeadId, WorkspaceId};

    fn lead() -> Lead {
        Lead {
            id: LeadId::new(),
            workspace_id: WorkspaceId::new(),
            company: "Acme".to_string(),
            sub_segment: None,
            use_case: None,
            currency_flow: None,
            decision_maker_name: None,
            status: LeadStatus::New,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_lead_scores_zero() {
        assert_eq!(score_lead(&lead()), 0);
    }

    #[test]
    fn every_rule_stacking_hits_the_bound_exactly() {
        let mut l = lead();
        l.sub_segment = Some(SubSegment::Exporter);
        l.use_case = Some("High Volume on-ramp flows".to_string());
        l.currency_flow = Some("INR in, USD out".to_string());
        l.decision_maker_name = Some("Priya".to_string());
        l.status = LeadStatus::Onboarded;
        assert_eq!(score_lead(&l), 100);
    }

    #[test]
    fn exporter_inr_decision_maker_onboarded_scores_65() {
        let mut l = lead();
        l.sub_segment = Some(SubSegment::Exporter);
        l.currency_flow = Some("Paid in INR".to_string());
        l.decision_maker_name = Some("Jane".to_string());
        l.status = LeadStatus::Onboarded;
        assert_eq!(score_lead(&l), 65);
    }

    #[test]
    fn freelancer_with_high_volume_onramp_use_case_scores_35() {
        let mut l = lead();
        l.sub_segment = Some(SubSegment::Freelancer);
        l.use_case = Some("High Volume remittances with On-Ramp needs".to_string());
        l.status = LeadStatus::New;
        assert_eq!(score_lead(&l), 35);
    }

    #[test]
    fn wallet_segment_earns_the_segment_bonus() {
        let mut l = lead();
        l.sub_segment = Some(SubSegment::Wallet);
        assert_eq!(score_lead(&l), 20);
    }

    #[test]
    fn inr_match_is_case_sensitive() {
        let mut l = lead();
        l.currency_flow = Some("settled in inr".to_string());
        assert_eq!(score_lead(&l), 0);
        l.currency_flow = Some("settled in INR".to_string());
        assert_eq!(score_lead(&l), 15);
    }

    #[test]
    fn use_case_matches_are_case_insensitive() {
        let mut l = lead();
        l.use_case = Some("HIGH VOLUME ON-RAMP".to_string());
        assert_eq!(score_lead(&l), 35);
    }

    #[test]
    fn empty_decision_maker_name_does_not_count() {
        let mut l = lead();
        l.decision_maker_name = Some(String::new());
        assert_eq!(score_lead(&l), 0);
        l.decision_maker_name = Some("Jane".to_string());
        assert_eq!(score_lead(&l), 10);
    }

    #[test]
    fn scoring_is_idempotent() {
        let mut l = lead();
        l.sub_segment = Some(SubSegment::Exporter);
        l.status = LeadStatus::Negotiation;
        assert_eq!(score_lead(&l), score_lead(&l));
    }

    #[test]
    fn score_never_exceeds_bound() {
        for status in LeadStatus::ALL {
            let mut l = lead();
            l.sub_segment = Some(SubSegment::Wallet);
            l.use_case = Some("high volume on-ramp".to_string());
            l.currency_flow = Some("INR".to_string());
            l.decision_maker_name = Some("X".to_string());
            l.status = status;
            assert!(score_lead(&l) <= MAX_SCORE);
        }
    }
}
