//! Human-readable summary of the active filters, for header badges and chips.

use serde::Serialize;

use crate::models::FilterCriteria;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSummary {
    pub active_filter_count: usize,
    pub price_filter_text: String,
    pub is_price_filter_active: bool,
    pub exterior_colors_text: String,
    pub interior_colors_text: String,
    pub has_color_filters: bool,
    pub exterior_colors_count: usize,
    pub interior_colors_count: usize,
}

pub fn describe(criteria: &FilterCriteria) -> FilterSummary {
    let exterior = criteria.exterior_colors.as_deref().unwrap_or_default();
    let interior = criteria.interior_colors.as_deref().unwrap_or_default();

    FilterSummary {
        active_filter_count: active_filter_count(criteria),
        price_filter_text: price_filter_text(criteria.min_price, criteria.max_price),
        is_price_filter_active: criteria.min_price.is_some() || criteria.max_price.is_some(),
        exterior_colors_text: exterior.join(", "),
        interior_colors_text: interior.join(", "),
        has_color_filters: !exterior.is_empty() || !interior.is_empty(),
        exterior_colors_count: exterior.len(),
        interior_colors_count: interior.len(),
    }
}

/// Counts the facets that are meaningfully set.
///
/// Price bounds count whenever present, so a minimum price of 0 is an active
/// filter. Year bounds follow the general numeric rule and a value of 0 does
/// not count. Existing badge text depends on this difference.
pub fn active_filter_count(criteria: &FilterCriteria) -> usize {
    let text = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
    let year = |v: Option<i32>| v.is_some_and(|y| y != 0);
    let list = |len: Option<usize>| len.is_some_and(|n| n > 0);

    [
        text(&criteria.manufacturer),
        text(&criteria.model),
        text(&criteria.category),
        year(criteria.min_year),
        year(criteria.max_year),
        criteria.min_price.is_some(),
        criteria.max_price.is_some(),
        criteria.featured == Some(true),
        list(criteria.exterior_colors.as_ref().map(Vec::len)),
        list(criteria.interior_colors.as_ref().map(Vec::len)),
        list(criteria.colors.as_ref().map(Vec::len)),
    ]
    .into_iter()
    .filter(|active| *active)
    .count()
}

pub fn price_filter_text(min: Option<f64>, max: Option<f64>) -> String {
    let bound = |v: Option<f64>| v.map_or_else(|| "Any".to_string(), format_price);
    format!("{} - {}", bound(min), bound(max))
}

/// 1_500_000 -> "1.5M", 45_000 -> "45K", 999 -> "999".
///
/// The unit follows the rounded value, so 999_950 reads "1M" rather than "1000K".
pub fn format_price(price: f64) -> String {
    let mut value = round_tenth(price);
    let mut suffix = "";
    for (divisor, unit) in [(1_000.0, "K"), (1_000_000.0, "M")] {
        if value.abs() < 1_000.0 {
            break;
        }
        value = round_tenth(price / divisor);
        suffix = unit;
    }
    format!("{}{suffix}", one_decimal(value))
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn one_decimal(rounded: f64) -> String {
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_criteria_has_no_active_filters() {
        let summary = describe(&FilterCriteria::default());
        assert_eq!(summary.active_filter_count, 0);
        assert_eq!(summary.price_filter_text, "Any - Any");
        assert!(!summary.is_price_filter_active);
        assert!(!summary.has_color_filters);
        assert_eq!(summary.exterior_colors_text, "");
    }

    #[test]
    fn zero_price_counts_but_zero_year_does_not() {
        let price = FilterCriteria { min_price: Some(0.0), ..Default::default() };
        let year = FilterCriteria { min_year: Some(0), ..Default::default() };

        assert_eq!(active_filter_count(&price), 1);
        assert_eq!(active_filter_count(&year), 0);
        assert!(describe(&price).is_price_filter_active);
        assert_eq!(describe(&price).price_filter_text, "0 - Any");
    }

    #[test]
    fn blank_strings_and_empty_lists_do_not_count() {
        let criteria = FilterCriteria {
            manufacturer: Some("   ".into()),
            exterior_colors: Some(Vec::new()),
            featured: Some(false),
            ..Default::default()
        };
        assert_eq!(active_filter_count(&criteria), 0);
    }

    #[test]
    fn every_facet_counts_once() {
        let criteria = FilterCriteria {
            manufacturer: Some("Tesla".into()),
            model: Some("Model Y".into()),
            min_year: Some(2020),
            max_year: Some(2024),
            min_price: Some(100_000.0),
            max_price: Some(900_000.0),
            category: Some("SUV".into()),
            featured: Some(true),
            exterior_colors: Some(vec!["Red".into(), "Black".into()]),
            interior_colors: Some(vec!["Cream".into()]),
            colors: Some(vec![4]),
        };
        assert_eq!(active_filter_count(&criteria), 11);
    }

    #[test]
    fn color_texts_and_counts() {
        let criteria = FilterCriteria {
            exterior_colors: Some(vec!["Red".into(), "Black".into()]),
            ..Default::default()
        };
        let summary = describe(&criteria);
        assert_eq!(summary.exterior_colors_text, "Red, Black");
        assert_eq!(summary.exterior_colors_count, 2);
        assert_eq!(summary.interior_colors_count, 0);
        assert!(summary.has_color_filters);
    }

    #[test]
    fn price_formatting() {
        assert_eq!(format_price(999.0), "999");
        assert_eq!(format_price(1_000.0), "1K");
        assert_eq!(format_price(45_500.0), "45.5K");
        assert_eq!(format_price(500_000.0), "500K");
        assert_eq!(format_price(1_500_000.0), "1.5M");
        assert_eq!(format_price(2_000_000.0), "2M");
        assert_eq!(price_filter_text(Some(500_000.0), Some(1_200_000.0)), "500K - 1.2M");
        assert_eq!(price_filter_text(None, Some(80_000.0)), "Any - 80K");
    }

    #[test]
    fn rounding_up_moves_to_the_next_unit() {
        assert_eq!(format_price(999_950.0), "1M");
        assert_eq!(format_price(999_949.0), "999.9K");
        assert_eq!(format_price(999.96), "1K");
        assert_eq!(format_price(999.94), "999.9");
    }

    #[test]
    fn summary_serializes_in_camel_case() {
        let json = serde_json::to_value(describe(&FilterCriteria::default())).unwrap();
        assert_eq!(json["activeFilterCount"], 0);
        assert_eq!(json["priceFilterText"], "Any - Any");
    }
}
