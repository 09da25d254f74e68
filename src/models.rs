// Data structures shared between the backend client, the engine and the routes

use serde::{Deserialize, Serialize};

// A numeric value as the backend sends it: sometimes a JSON number,
// sometimes a string such as "45990" or "N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
}

impl NumericField {
    /// Numeric coercion. `None` means the value cannot take part in a numeric comparison.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NumericField::Number(n) => *n,
            NumericField::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

// A color option attached to a car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorTag {
    pub id: i64,
    pub name: String,
}

// A car record as supplied by the backend. Never mutated after fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: i64,
    #[serde(default)]
    pub manufacturer_name: String,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub model_year: Option<NumericField>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub base_price_value: Option<NumericField>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub available_exterior_colors: Vec<ColorTag>,
    #[serde(default)]
    pub available_interior_colors: Vec<ColorTag>,
    // Detail view only
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Car {
    pub fn year(&self) -> Option<f64> {
        self.model_year.as_ref().and_then(NumericField::as_f64)
    }

    pub fn price(&self) -> Option<f64> {
        self.base_price_value.as_ref().and_then(NumericField::as_f64)
    }

    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    pub fn display_name(&self) -> String {
        match self.year() {
            Some(year) => format!("{} {} {}", year, self.manufacturer_name, self.model_name),
            None => format!("{} {}", self.manufacturer_name, self.model_name),
        }
    }
}

// The set of facet constraints chosen by the visitor.
// Every field is optional; an empty value imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(rename = "exterior_colors", skip_serializing_if = "Option::is_none")]
    pub exterior_colors: Option<Vec<String>>,
    #[serde(rename = "interior_colors", skip_serializing_if = "Option::is_none")]
    pub interior_colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<i64>>,
}

impl FilterCriteria {
    pub fn featured_only() -> Self {
        Self {
            featured: Some(true),
            ..Self::default()
        }
    }
}

// A finance offer published by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceOffer {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(alias = "interest_rate")]
    pub interest_rate: f64,
    #[serde(alias = "term_months")]
    pub term_months: u32,
    #[serde(default, alias = "min_down_payment_percent")]
    pub min_down_payment_percent: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_field_coerces_numbers_and_numeric_strings() {
        assert_eq!(NumericField::Number(45990.0).as_f64(), Some(45990.0));
        assert_eq!(NumericField::Text(" 45990 ".into()).as_f64(), Some(45990.0));
        assert_eq!(NumericField::Text("N/A".into()).as_f64(), None);
        assert_eq!(NumericField::Text(String::new()).as_f64(), None);
        assert_eq!(NumericField::Text("inf".into()).as_f64(), None);
    }

    #[test]
    fn car_deserializes_with_string_price_and_missing_fields() {
        let car: Car = serde_json::from_str(
            r#"{
                "id": 7,
                "manufacturer_name": "Tesla",
                "model_name": "Model 3",
                "model_year": 2024,
                "base_price_value": "520000",
                "available_exterior_colors": [{"id": 1, "name": "Red"}]
            }"#,
        )
        .unwrap();

        assert_eq!(car.price(), Some(520000.0));
        assert_eq!(car.year(), Some(2024.0));
        assert_eq!(car.category, "");
        assert!(car.available_interior_colors.is_empty());
        assert!(!car.is_featured());
        assert_eq!(car.display_name(), "2024 Tesla Model 3");
    }

    #[test]
    fn car_deserializes_null_price() {
        let car: Car = serde_json::from_str(r#"{"id": 1, "base_price_value": null}"#).unwrap();
        assert_eq!(car.price(), None);
    }

    #[test]
    fn criteria_uses_mixed_key_styles() {
        let criteria: FilterCriteria = serde_json::from_str(
            r#"{"manufacturer": "Tesla", "minPrice": 0, "exterior_colors": ["Red"], "colors": [3]}"#,
        )
        .unwrap();

        assert_eq!(criteria.manufacturer.as_deref(), Some("Tesla"));
        assert_eq!(criteria.min_price, Some(0.0));
        assert_eq!(criteria.exterior_colors, Some(vec!["Red".to_string()]));
        assert_eq!(criteria.colors, Some(vec![3]));

        let json = serde_json::to_value(&criteria).unwrap();
        assert!(json.get("minPrice").is_some());
        assert!(json.get("maxPrice").is_none());
    }

    #[test]
    fn empty_json_object_is_empty_criteria() {
        let criteria: FilterCriteria = serde_json::from_str("{}").unwrap();
        assert_eq!(criteria, FilterCriteria::default());
    }
}
