//! Dashboard metrics stub. Values are random on every call and are not
//! derived from stored data.

use rand::Rng;
use serde::Serialize;

pub const DEMO_USER_ID: u32 = 1;
pub const DEMO_USER_EMAIL: &str = "demo@example.com";

pub const MAX_ACTIVE_USERS: u32 = 1_000;
pub const MAX_REVENUE: f64 = 10_000.0;
pub const MAX_GROWTH_PCT: f64 = 100.0;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMetrics {
    pub id: u32,
    pub email: String,
    pub active_users: u32,
    /// [0, 10000), two decimals.
    pub revenue: f64,
    /// Percentage in [0, 100), one decimal.
    pub growth: f64,
}

pub fn generate_metrics<R: Rng + ?Sized>(rng: &mut R) -> UserMetrics {
    // Drawn as whole cents / tenths so rounding can never reach the upper bound.
    let revenue_cents = rng.gen_range(0..(MAX_REVENUE as u32) * 100);
    let growth_tenths = rng.gen_range(0..(MAX_GROWTH_PCT as u32) * 10);

    UserMetrics {
        id: DEMO_USER_ID,
        email: DEMO_USER_EMAIL.to_string(),
        active_users: rng.gen_range(0..MAX_ACTIVE_USERS),
        revenue: f64::from(revenue_cents) / 100.0,
        growth: f64::from(growth_tenths) / 10.0,
    }
}
