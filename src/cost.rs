//! Rough trip cost estimates: transport, hotel and admission tickets

use crate::models::{
    Coordinates, CostBreakdown, HotelEstimate, HotelTier, RecommendedSpot, SpotKind,
    TicketEstimate, TicketItem, TransportEstimate, TransportMode,
};
use crate::{PlannerError, Result};
use haversine::{Location as HaversineLocation, Units, distance};

/// Trips shorter than this are priced as local transport
const LOCAL_TRIP_KM: f64 = 5.0;

/// Admission price for tags not in the table
const DEFAULT_TICKET_USD: f64 = 10.0;

/// Round a money or distance value to 2 decimal places
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Great-circle distance in km (Earth radius 6371 km)
#[must_use]
pub fn calculate_distance(from: &Coordinates, to: &Coordinates) -> f64 {
    // Canonical endpoint order keeps the result bit-for-bit symmetric.
    let (a, b) = if (from.latitude, from.longitude) <= (to.latitude, to.longitude) {
        (from, to)
    } else {
        (to, from)
    };

    let start = HaversineLocation {
        latitude: a.latitude,
        longitude: a.longitude,
    };
    let end = HaversineLocation {
        latitude: b.latitude,
        longitude: b.longitude,
    };
    distance(start, end, Units::Kilometers)
}

/// Admission price by spot tag
#[must_use]
pub fn ticket_price_usd(kind: &SpotKind) -> f64 {
    match kind {
        SpotKind::Museum => 10.0,
        SpotKind::Tour => 15.0,
        SpotKind::Garden => 5.0,
        SpotKind::Brewery => 8.0,
        SpotKind::Beach | SpotKind::Park | SpotKind::Market | SpotKind::Cafe | SpotKind::Mall => {
            0.0
        }
        SpotKind::Walking | SpotKind::Other(_) => DEFAULT_TICKET_USD,
    }
}

pub struct CostEstimator;

impl CostEstimator {
    /// Taxi and bus fares for the origin to destination leg
    #[must_use]
    pub fn estimate_transport(origin: &Coordinates, destination: &Coordinates) -> TransportEstimate {
        let km = calculate_distance(origin, destination);

        let (taxi, bus) = if km < LOCAL_TRIP_KM {
            ((1.5 * km).max(2.0), (0.5 * km).max(1.0))
        } else {
            (0.6 * km, 0.25 * km)
        };

        let taxi_usd = round2(taxi);
        let bus_usd = round2(bus);
        let suggested_mode = if bus_usd < taxi_usd {
            TransportMode::Bus
        } else {
            TransportMode::Taxi
        };

        TransportEstimate {
            distance_km: round2(km),
            taxi_usd,
            bus_usd,
            suggested_mode,
        }
    }

    pub fn estimate_hotel(nights: u32, tier: HotelTier) -> Result<HotelEstimate> {
        if nights == 0 {
            return Err(PlannerError::validation("nights must be at least 1"));
        }

        let price_per_night_usd = tier.nightly_rate_usd();
        Ok(HotelEstimate {
            nights,
            price_per_night_usd,
            total_usd: round2(price_per_night_usd * f64::from(nights)),
        })
    }

    #[must_use]
    pub fn estimate_tickets(spots: &[RecommendedSpot]) -> TicketEstimate {
        let items: Vec<TicketItem> = spots
            .iter()
            .map(|spot| TicketItem {
                name: spot.name.clone(),
                kind: spot.kind.clone(),
                ticket_usd: ticket_price_usd(&spot.kind),
            })
            .collect();
        let total_usd = round2(items.iter().map(|item| item.ticket_usd).sum());

        TicketEstimate { items, total_usd }
    }

    /// Full breakdown. The grand total always uses the taxi fare.
    pub fn run(
        spots: &[RecommendedSpot],
        origin: &Coordinates,
        destination: &Coordinates,
        nights: u32,
        tier: HotelTier,
    ) -> Result<CostBreakdown> {
        let hotel = Self::estimate_hotel(nights, tier)?;
        let transport = Self::estimate_transport(origin, destination);
        let tickets = Self::estimate_tickets(spots);
        let grand_total_usd = round2(transport.taxi_usd + hotel.total_usd + tickets.total_usd);

        Ok(CostBreakdown {
            transport,
            hotel,
            tickets,
            grand_total_usd,
        })
    }
}
