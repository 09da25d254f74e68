// CSV export of a filtered car list

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use crate::models::{Car, ColorTag};

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: i64,
    manufacturer: &'a str,
    model: &'a str,
    year: Option<i64>,
    category: &'a str,
    price: Option<f64>,
    featured: bool,
    exterior_colors: String,
    interior_colors: String,
}

fn color_names(tags: &[ColorTag]) -> String {
    tags.iter()
        .map(|tag| tag.name.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn cars_to_csv(cars: &[Car]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for car in cars {
        writer
            .serialize(ExportRow {
                id: car.id,
                manufacturer: &car.manufacturer_name,
                model: &car.model_name,
                year: car.year().map(|year| year as i64),
                category: &car.category,
                price: car.price(),
                featured: car.is_featured(),
                exterior_colors: color_names(&car.available_exterior_colors),
                interior_colors: color_names(&car.available_interior_colors),
            })
            .with_context(|| format!("Failed to write CSV row for car {}", car.id))?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV writer: {}", e.error()))
}

pub fn export_file_name() -> String {
    format!("cars_{}.csv", chrono::Local::now().format("%Y%m%d_%H%M%S"))
}
