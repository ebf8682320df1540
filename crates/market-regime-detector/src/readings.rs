use analysis_core::{IndexFamily, IndexQuote};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::breadth::BreadthReading;
use crate::indices::{normalize_breadth, normalize_crypto, normalize_index, IndexReading, ReadingKind};

/// The complete batch of market readings for one scan cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketReadings {
    pub indices: BTreeMap<IndexFamily, IndexReading>,
    pub crypto: IndexReading,
    pub breadth: BreadthReading,
    pub breadth_pct: IndexReading,
    pub highs_lows: IndexReading,
}

impl MarketReadings {
    /// Normalize every tracked family. Families missing from `quotes` count as unavailable.
    pub fn assemble(
        quotes: &BTreeMap<IndexFamily, Option<IndexQuote>>,
        crypto_sentiment: Option<u8>,
        crypto_fallback: u8,
        breadth: BreadthReading,
    ) -> Self {
        let indices = IndexFamily::ALL
            .iter()
            .map(|family| {
                let quote = quotes.get(family).and_then(|q| q.as_ref());
                (*family, normalize_index(*family, quote))
            })
            .collect();
        let (breadth_pct, highs_lows) = normalize_breadth(&breadth);

        Self {
            indices,
            crypto: normalize_crypto(crypto_sentiment, crypto_fallback),
            breadth,
            breadth_pct,
            highs_lows,
        }
    }

    pub fn index(&self, family: IndexFamily) -> IndexReading {
        self.indices
            .get(&family)
            .cloned()
            .unwrap_or_else(|| IndexReading::unavailable(ReadingKind::Index(family)))
    }

    pub fn unavailable_families(&self) -> Vec<IndexFamily> {
        IndexFamily::ALL
            .iter()
            .copied()
            .filter(|f| self.indices.get(f).map_or(true, |r| !r.available))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_marks_missing_families() {
        let mut quotes = BTreeMap::new();
        quotes.insert(IndexFamily::Vix, IndexQuote::from_closes(IndexFamily::Vix, &[19.0, 18.0]));
        quotes.insert(IndexFamily::Move, None);

        let readings = MarketReadings::assemble(&quotes, Some(40), 50, BreadthReading::unavailable());

        assert_eq!(readings.indices.len(), IndexFamily::ALL.len());
        assert!(readings.index(IndexFamily::Vix).available);
        let missing = readings.unavailable_families();
        assert!(missing.contains(&IndexFamily::Move));
        assert!(missing.contains(&IndexFamily::Spx));
        assert!(!missing.contains(&IndexFamily::Vix));
    }
}
