//! Pricing tiers shown on the dashboard.
//!
//! The tier list is display data only. Create-subscription does not check a
//! plan against it: whatever the caller sends becomes `price_<plan>` and the
//! provider decides whether that price exists.

use serde::Serialize;

const PRICE_ID_PREFIX: &str = "price_";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Basic,
    Pro,
    Enterprise,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Basic, Plan::Pro, Plan::Enterprise];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Pro => "pro",
            Plan::Enterprise => "enterprise",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Plan::Basic => "Basic",
            Plan::Pro => "Pro",
            Plan::Enterprise => "Enterprise",
        }
    }

    /// Monthly list price in US cents.
    pub fn monthly_price_cents(&self) -> u32 {
        match self {
            Plan::Basic => 2_900,
            Plan::Pro => 9_900,
            Plan::Enterprise => 29_900,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTier {
    pub plan: Plan,
    pub name: &'static str,
    pub monthly_price_cents: u32,
    pub price_id: String,
}

/// Provider price id for a plan label. No validation happens here.
pub fn price_id_for(plan: &str) -> String {
    format!("{PRICE_ID_PREFIX}{plan}")
}

pub fn plan_tiers() -> Vec<PlanTier> {
    Plan::ALL
        .iter()
        .map(|plan| PlanTier {
            plan: *plan,
            name: plan.display_name(),
            monthly_price_cents: plan.monthly_price_cents(),
            price_id: price_id_for(plan.as_str()),
        })
        .collect()
}
