//! First-seen deduplicated indicator and country indices.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::MatrixRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorRef {
    pub indicator_id: i32,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRef {
    pub country_id: i32,
    pub name: String,
}

/// Ordered unique indicators and countries from a flat row set.
///
/// Unique by id, first-seen order preserved, one pass with presence tracking.
/// A row missing one coordinate still contributes the other: a null indicator
/// id skips the indicator index only.
pub fn build_indices(rows: &[MatrixRow]) -> (Vec<IndicatorRef>, Vec<CountryRef>) {
    let mut seen_indicators = HashSet::new();
    let mut seen_countries = HashSet::new();
    let mut indicators = Vec::new();
    let mut countries = Vec::new();

    for row in rows {
        if let Some(indicator_id) = row.indicator_id {
            if seen_indicators.insert(indicator_id) {
                indicators.push(IndicatorRef {
                    indicator_id,
                    code: row.indicator_code.clone().unwrap_or_default(),
                    name: row.indicator_name.clone().unwrap_or_default(),
                });
            }
        }
        if let Some(country_id) = row.country_id {
            if seen_countries.insert(country_id) {
                countries.push(CountryRef {
                    country_id,
                    name: row.country_name.clone().unwrap_or_default(),
                });
            }
        }
    }

    (indicators, countries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        product_id: i32,
        country: Option<(i32, &str)>,
        indicator: Option<(i32, &str, &str)>,
    ) -> MatrixRow {
        MatrixRow {
            product_id,
            product_name: format!("Product {product_id}"),
            country_id: country.map(|(id, _)| id),
            country_name: country.map(|(_, name)| name.to_string()),
            indicator_id: indicator.map(|(id, _, _)| id),
            indicator_code: indicator.map(|(_, code, _)| code.to_string()),
            indicator_name: indicator.map(|(_, _, name)| name.to_string()),
            output_number: Some(1),
            delivery_date: None,
            owner_name: None,
        }
    }

    #[test]
    fn first_seen_order_is_preserved() {
        let rows = vec![
            row(1, Some((20, "Kenya")), Some((5, "1.2", "Species plans"))),
            row(2, Some((10, "Uganda")), Some((3, "1.1", "Protected areas"))),
            row(3, Some((20, "Kenya")), Some((5, "1.2", "Species plans"))),
        ];
        let (indicators, countries) = build_indices(&rows);

        assert_eq!(
            indicators.iter().map(|i| i.indicator_id).collect::<Vec<_>>(),
            vec![5, 3]
        );
        assert_eq!(
            countries.iter().map(|c| c.country_id).collect::<Vec<_>>(),
            vec![20, 10]
        );
    }

    #[test]
    fn null_indicator_still_contributes_country() {
        let rows = vec![row(1, Some((10, "Uganda")), None)];
        let (indicators, countries) = build_indices(&rows);

        assert!(indicators.is_empty());
        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].name, "Uganda");
    }

    #[test]
    fn null_country_still_contributes_indicator() {
        let rows = vec![row(1, None, Some((3, "1.1", "Protected areas")))];
        let (indicators, countries) = build_indices(&rows);

        assert_eq!(indicators.len(), 1);
        assert!(countries.is_empty());
    }
}
