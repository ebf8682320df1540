//! Upcoming corporate events and industry facets over scan results.

use analysis_core::CorporateEvent;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ticker_classifier::TickerResult;

/// Events dated within `[today, today + horizon_days]`, earliest first
pub fn upcoming_within(
    events: Vec<CorporateEvent>,
    today: NaiveDate,
    horizon_days: i64,
) -> Vec<CorporateEvent> {
    let horizon = today + Duration::days(horizon_days);

    let mut upcoming: Vec<CorporateEvent> = events
        .into_iter()
        .filter(|e| e.date >= today && e.date <= horizon)
        .collect();
    upcoming.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.ticker.cmp(&b.ticker)));
    upcoming
}

/// How many scanned securities fall in one industry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryFacet {
    pub industry: String,
    pub count: usize,
}

/// Industry counts, most common first
pub fn industry_facets<'a>(results: impl IntoIterator<Item = &'a TickerResult>) -> Vec<IndustryFacet> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for result in results {
        let industry = result.industry.trim();
        if !industry.is_empty() {
            *counts.entry(industry).or_insert(0) += 1;
        }
    }

    let mut facets: Vec<IndustryFacet> = counts
        .into_iter()
        .map(|(industry, count)| IndustryFacet {
            industry: industry.to_string(),
            count,
        })
        .collect();
    facets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.industry.cmp(&b.industry)));
    facets
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{EventKind, Field, RawFieldSnapshot, TickerInput};
    use ticker_classifier::TickerClassifier;

    fn event(ticker: &str, date: NaiveDate) -> CorporateEvent {
        CorporateEvent {
            ticker: ticker.to_string(),
            kind: EventKind::Earnings,
            date,
            info: "Est. EPS: 1.23".to_string(),
        }
    }

    fn result_in(ticker: &str, industry: &str) -> TickerResult {
        let snapshot = RawFieldSnapshot::new(ticker)
            .with(Field::Price, "10")
            .with(Field::Industry, industry);
        TickerClassifier::new()
            .classify(&TickerInput::from_snapshot(snapshot))
            .unwrap()
    }

    #[test]
    fn test_upcoming_window_and_order() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let events = vec![
            event("MSFT", today + Duration::days(20)),
            event("AAPL", today - Duration::days(1)),
            event("NVDA", today),
            event("AMD", today + Duration::days(20)),
            event("TSLA", today + Duration::days(31)),
            event("META", today + Duration::days(30)),
        ];

        let upcoming = upcoming_within(events, today, 30);
        let tickers: Vec<&str> = upcoming.iter().map(|e| e.ticker.as_str()).collect();

        assert_eq!(tickers, vec!["NVDA", "AMD", "MSFT", "META"]);
    }

    #[test]
    fn test_industry_facets() {
        let results = vec![
            result_in("A", "Semiconductors"),
            result_in("B", "Banks"),
            result_in("C", "Semiconductors"),
            result_in("D", "Airlines"),
        ];

        let facets = industry_facets(&results);

        assert_eq!(facets[0], IndustryFacet { industry: "Semiconductors".to_string(), count: 2 });
        assert_eq!(facets[1].industry, "Airlines");
        assert_eq!(facets[2].industry, "Banks");
    }
}
