//! Facet predicate evaluation over car records.
//!
//! Every present facet in a [`FilterCriteria`] is an AND constraint. Within the
//! color facets the listed values are OR-ed: one hit is enough.

use crate::models::{Car, ColorTag, FilterCriteria};

/// Returns `true` when `car` satisfies every constraint present in `criteria`.
pub fn matches(car: &Car, criteria: &FilterCriteria) -> bool {
    text_matches(criteria.manufacturer.as_deref(), &car.manufacturer_name)
        && text_matches(criteria.model.as_deref(), &car.model_name)
        && text_matches(criteria.category.as_deref(), &car.category)
        && within_bounds(
            car.year(),
            criteria.min_year.map(f64::from),
            criteria.max_year.map(f64::from),
        )
        && within_bounds(car.price(), criteria.min_price, criteria.max_price)
        && featured_matches(criteria.featured, car)
        && any_name_matches(criteria.exterior_colors.as_deref(), &car.available_exterior_colors)
        && any_name_matches(criteria.interior_colors.as_deref(), &car.available_interior_colors)
        && any_id_matches(criteria.colors.as_deref(), car)
}

/// Stable filter: keeps input order, never re-sorts.
pub fn filter_cars(cars: &[Car], criteria: &FilterCriteria) -> Vec<Car> {
    cars.iter()
        .filter(|car| matches(car, criteria))
        .cloned()
        .collect()
}

fn text_matches(wanted: Option<&str>, actual: &str) -> bool {
    wanted.is_none_or(|wanted| wanted == actual)
}

// A car whose value can't be read as a number is not disqualified by bounds.
fn within_bounds(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    let Some(value) = value else {
        return true;
    };
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}

fn featured_matches(wanted: Option<bool>, car: &Car) -> bool {
    wanted != Some(true) || car.is_featured()
}

fn any_name_matches(wanted: Option<&[String]>, available: &[ColorTag]) -> bool {
    match wanted {
        None | Some([]) => true,
        Some(names) => available
            .iter()
            .any(|tag| names.iter().any(|name| *name == tag.name)),
    }
}

fn any_id_matches(wanted: Option<&[i64]>, car: &Car) -> bool {
    match wanted {
        None | Some([]) => true,
        Some(ids) => car
            .available_exterior_colors
            .iter()
            .chain(&car.available_interior_colors)
            .any(|tag| ids.contains(&tag.id)),
    }
}
