//! Matrix assembly: (country, indicator) → deduplicated product lists.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::MatrixRow;

use super::index::{build_indices, CountryRef, IndicatorRef};

/// A product as it appears inside a matrix cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub product_id: i32,
    pub name: String,
    pub owner_name: Option<String>,
    pub delivery_date: Option<NaiveDate>,
}

/// The assembled cross-tabulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMatrix {
    pub indicators: Vec<IndicatorRef>,
    pub countries: Vec<CountryRef>,
    /// Indexed `matrix[country][indicator]`, same order as the index lists.
    pub matrix: Vec<Vec<Vec<ProductRef>>>,
    /// Distinct product ids across the whole row set, not the sum of
    /// per-cell counts — one product can appear in several cells.
    pub total_products: usize,
}

/// Assemble the matrix from flat rows.
///
/// Each row updates exactly one cell: its own country and its own indicator.
/// Rows missing either coordinate update no cell but still count toward
/// `total_products`. Cells never hold the same product id twice.
pub fn assemble(rows: &[MatrixRow]) -> ProductMatrix {
    let (indicators, countries) = build_indices(rows);

    let indicator_pos: HashMap<i32, usize> = indicators
        .iter()
        .enumerate()
        .map(|(pos, ind)| (ind.indicator_id, pos))
        .collect();
    let country_pos: HashMap<i32, usize> = countries
        .iter()
        .enumerate()
        .map(|(pos, c)| (c.country_id, pos))
        .collect();

    let mut matrix = vec![vec![Vec::new(); indicators.len()]; countries.len()];
    let mut cell_seen: HashSet<(usize, usize, i32)> = HashSet::new();
    let mut distinct_products: HashSet<i32> = HashSet::new();

    for row in rows {
        distinct_products.insert(row.product_id);

        let (Some(country_id), Some(indicator_id)) = (row.country_id, row.indicator_id) else {
            continue;
        };
        let (Some(&ci), Some(&ii)) = (country_pos.get(&country_id), indicator_pos.get(&indicator_id))
        else {
            continue;
        };

        if cell_seen.insert((ci, ii, row.product_id)) {
            matrix[ci][ii].push(ProductRef {
                product_id: row.product_id,
                name: row.product_name.clone(),
                owner_name: row.owner_name.clone(),
                delivery_date: row.delivery_date,
            });
        }
    }

    ProductMatrix {
        indicators,
        countries,
        matrix,
        total_products: distinct_products.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(product_id: i32, country_id: Option<i32>, indicator_id: Option<i32>) -> MatrixRow {
        MatrixRow {
            product_id,
            product_name: format!("Product {product_id}"),
            country_id,
            country_name: country_id.map(|id| format!("Country {id}")),
            indicator_id,
            indicator_code: indicator_id.map(|id| format!("1.{id}")),
            indicator_name: indicator_id.map(|id| format!("Indicator {id}")),
            output_number: Some(1),
            delivery_date: None,
            owner_name: Some("IUCN".to_string()),
        }
    }

    #[test]
    fn no_duplicate_products_within_a_cell() {
        // Two tasks of the same product produce two identical join rows.
        let rows = vec![row(1, Some(10), Some(5)), row(1, Some(10), Some(5))];
        let result = assemble(&rows);

        assert_eq!(result.matrix[0][0].len(), 1);
        assert_eq!(result.total_products, 1);
    }

    #[test]
    fn each_row_updates_exactly_one_cell() {
        let rows = vec![row(1, Some(10), Some(5)), row(2, Some(20), Some(6))];
        let result = assemble(&rows);

        // Off-diagonal cells stay empty; never the cartesian product.
        assert_eq!(result.matrix[0][0].len(), 1);
        assert_eq!(result.matrix[1][1].len(), 1);
        assert!(result.matrix[0][1].is_empty());
        assert!(result.matrix[1][0].is_empty());
    }

    #[test]
    fn total_products_counts_distinct_ids_not_cell_sum() {
        // Product 1 appears under two indicators: two cells, one product.
        let rows = vec![
            row(1, Some(10), Some(5)),
            row(1, Some(10), Some(6)),
            row(2, Some(10), Some(5)),
        ];
        let result = assemble(&rows);

        let cell_sum: usize = result
            .matrix
            .iter()
            .flat_map(|r| r.iter().map(Vec::len))
            .sum();
        assert_eq!(cell_sum, 3);
        assert_eq!(result.total_products, 2);
    }

    #[test]
    fn rows_without_indicator_count_toward_total_but_fill_no_cell() {
        let rows = vec![row(1, Some(10), None), row(2, Some(10), Some(5))];
        let result = assemble(&rows);

        assert_eq!(result.total_products, 2);
        assert_eq!(result.indicators.len(), 1);
        assert_eq!(result.matrix[0][0].len(), 1);
        assert_eq!(result.matrix[0][0][0].product_id, 2);
    }

    #[test]
    fn dimensions_match_distinct_countries_and_indicators() {
        let rows = vec![
            row(1, Some(10), Some(5)),
            row(2, Some(20), Some(5)),
            row(3, Some(30), Some(6)),
        ];
        let result = assemble(&rows);

        assert_eq!(result.matrix.len(), 3);
        assert!(result.matrix.iter().all(|r| r.len() == 2));
    }

    #[test]
    fn empty_row_set_yields_empty_matrix() {
        let result = assemble(&[]);
        assert!(result.matrix.is_empty());
        assert!(result.indicators.is_empty());
        assert!(result.countries.is_empty());
        assert_eq!(result.total_products, 0);
    }
}
