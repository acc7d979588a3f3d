//! Weather suitability scores for recommended spots

use crate::models::{ForecastSummary, RecommendedSpot, SpotKind, SpotScore, UmbrellaRecommendation};

const BASE_SCORE: u32 = 50;
const RAIN_SHELTER_BONUS: u32 = 30;
const DRY_OUTDOOR_BONUS: u32 = 20;
const HOT_BEACH_BONUS: u32 = 10;
const HOT_DAY_CELSIUS: f64 = 28.0;

fn is_rain_shelter(kind: &SpotKind) -> bool {
    matches!(
        kind,
        SpotKind::Museum | SpotKind::Mall | SpotKind::Market | SpotKind::Brewery
    )
}

fn is_dry_outdoor(kind: &SpotKind) -> bool {
    matches!(kind, SpotKind::Beach | SpotKind::Park | SpotKind::Garden)
}

/// Score a single spot against the forecast
#[must_use]
pub fn score_spot(spot: &RecommendedSpot, forecast: &ForecastSummary) -> u32 {
    let mut score = BASE_SCORE;

    match forecast.umbrella_recommendation {
        UmbrellaRecommendation::High if is_rain_shelter(&spot.kind) => score += RAIN_SHELTER_BONUS,
        UmbrellaRecommendation::Low if is_dry_outdoor(&spot.kind) => score += DRY_OUTDOOR_BONUS,
        _ => {}
    }

    if spot.kind == SpotKind::Beach && forecast.temp_max_or_default() >= HOT_DAY_CELSIUS {
        score += HOT_BEACH_BONUS;
    }

    score
}

/// One score per spot, in recommendation order
#[must_use]
pub fn evaluate(spots: &[RecommendedSpot], forecast: &ForecastSummary) -> Vec<SpotScore> {
    spots
        .iter()
        .map(|spot| SpotScore {
            name: spot.name.clone(),
            score: score_spot(spot, forecast),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::heuristic::tests::forecast;
    use crate::recommend::HeuristicStrategy;

    #[test]
    fn test_hot_dry_day_beach_gets_both_bonuses() {
        let forecast = forecast(Some(0.0), Some(30.0));
        let spots = HeuristicStrategy::spots_for(&forecast);
        let scores = evaluate(&spots, &forecast);

        assert_eq!(scores[0].name, "Seaside Promenade");
        assert_eq!(scores[0].score, 80);
        assert_eq!(scores[1].score, 70);
        assert_eq!(scores[2].score, 50);
    }

    #[test]
    fn test_rainy_day_favours_shelter() {
        let forecast = forecast(Some(8.0), Some(22.0));
        let spots = HeuristicStrategy::spots_for(&forecast);
        let scores: Vec<u32> = evaluate(&spots, &forecast).iter().map(|s| s.score).collect();
        assert_eq!(scores, [80, 80, 80]);
    }

    #[test]
    fn test_hot_beach_bonus_is_independent_of_rain() {
        let forecast = forecast(Some(3.0), Some(31.0));
        let beach = RecommendedSpot::new("Kuta Beach", SpotKind::Beach, "", "");
        assert_eq!(score_spot(&beach, &forecast), 60);
    }

    #[test]
    fn test_missing_temperature_defaults_to_mild() {
        let forecast = forecast(Some(0.0), None);
        let beach = RecommendedSpot::new("Kuta Beach", SpotKind::Beach, "", "");
        assert_eq!(score_spot(&beach, &forecast), 70);
    }

    #[test]
    fn test_scores_stay_within_bounds() {
        let kinds = [
            SpotKind::Museum,
            SpotKind::Beach,
            SpotKind::Park,
            SpotKind::Market,
            SpotKind::Tour,
            SpotKind::Garden,
            SpotKind::Cafe,
            SpotKind::Brewery,
            SpotKind::Mall,
            SpotKind::Walking,
            SpotKind::Other("temple".to_string()),
        ];
        for precipitation in [None, Some(0.0), Some(2.0), Some(9.0)] {
            for temp in [None, Some(-5.0), Some(27.9), Some(28.0), Some(40.0)] {
                let forecast = forecast(precipitation, temp);
                for kind in &kinds {
                    let spot = RecommendedSpot::new("x", kind.clone(), "", "");
                    let score = score_spot(&spot, &forecast);
                    assert!((50..=110).contains(&score), "{kind} scored {score}");
                }
            }
        }
    }

    #[test]
    fn test_scores_follow_input_order() {
        let forecast = forecast(None, None);
        let spots = [
            RecommendedSpot::new("b", SpotKind::Cafe, "", ""),
            RecommendedSpot::new("a", SpotKind::Tour, "", ""),
        ];
        let names: Vec<String> = evaluate(&spots, &forecast).into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["b", "a"]);
    }
}
