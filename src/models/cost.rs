//! Cost breakdown models

use super::SpotKind;
use serde::{Deserialize, Serialize};

/// Hotel price tier
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HotelTier {
    Budget,
    #[default]
    Mid,
    Premium,
}

impl HotelTier {
    /// Parse a tier name, falling back to `Mid` for anything unrecognized
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "budget" => HotelTier::Budget,
            "premium" => HotelTier::Premium,
            _ => HotelTier::Mid,
        }
    }

    /// Nightly rate in USD
    #[must_use]
    pub fn nightly_rate_usd(&self) -> f64 {
        match self {
            HotelTier::Budget => 40.0,
            HotelTier::Mid => 80.0,
            HotelTier::Premium => 180.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Taxi,
    Bus,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TransportEstimate {
    pub distance_km: f64,
    pub taxi_usd: f64,
    pub bus_usd: f64,
    pub suggested_mode: TransportMode,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HotelEstimate {
    pub nights: u32,
    pub price_per_night_usd: f64,
    pub total_usd: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TicketItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SpotKind,
    pub ticket_usd: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TicketEstimate {
    pub items: Vec<TicketItem>,
    pub total_usd: f64,
}

/// Full cost estimate for a trip
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CostBreakdown {
    pub transport: TransportEstimate,
    pub hotel: HotelEstimate,
    pub tickets: TicketEstimate,
    /// Taxi fare + hotel + tickets. Always priced with the taxi fare.
    pub grand_total_usd: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotel_tier_from_name() {
        assert_eq!(HotelTier::from_name("budget"), HotelTier::Budget);
        assert_eq!(HotelTier::from_name("PREMIUM"), HotelTier::Premium);
        assert_eq!(HotelTier::from_name("mid"), HotelTier::Mid);
        assert_eq!(HotelTier::from_name("luxury"), HotelTier::Mid);
    }

    #[test]
    fn test_nightly_rates() {
        assert_eq!(HotelTier::Budget.nightly_rate_usd(), 40.0);
        assert_eq!(HotelTier::Mid.nightly_rate_usd(), 80.0);
        assert_eq!(HotelTier::Premium.nightly_rate_usd(), 180.0);
    }
}
