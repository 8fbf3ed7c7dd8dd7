//! Show command - one place's full record

use crate::context::{Context, SourceOverrides};
use crate::output::{print_json, Status};
use anyhow::Result;
use owo_colors::OwoColorize;
use placefinder_core::Error;
use placefinder_geo::{Catalog, Place};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct PlaceDetails<'a> {
    #[serde(flatten)]
    place: &'a Place,
    category_name: Option<&'a str>,
    category_color: Option<&'static str>,
}

/// Print every field of the place with the given id
pub async fn run(ctx: &Context, sources: &SourceOverrides, id: i64) -> Result<()> {
    let catalog = ctx.load_catalog(sources).await?;
    let details = details(&catalog, id)?;

    if ctx.is_json() {
        return print_json(&details);
    }

    let place = details.place;
    let category = match details.category_name {
        Some(name) => format!("{} ({})", place.category_id, name),
        None => place.category_id.to_string(),
    };

    Status::header(&place.name);
    for (label, value) in [
        ("ID", place.id.to_string()),
        ("Location", or_dash(place.location.as_deref())),
        ("Name", place.name.clone()),
        ("Gaelic Name", or_dash(place.gaelic_name.as_deref())),
        ("Place Type ID", category),
        ("Latitude", place.latitude.to_string()),
        ("Longitude", place.longitude.to_string()),
    ] {
        println!("  {:<14} {}", format!("{label}:").bold(), value);
    }
    println!();

    Ok(())
}

fn details(catalog: &Catalog, id: i64) -> Result<PlaceDetails<'_>, Error> {
    let place = catalog.place(id).ok_or_else(|| Error::place_not_found(id))?;
    let category = catalog.category(place.category_id);

    Ok(PlaceDetails {
        place,
        category_name: category.map(|c| c.name.as_str()),
        category_color: category.and_then(|c| c.color()),
    })
}

fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_string()
}
