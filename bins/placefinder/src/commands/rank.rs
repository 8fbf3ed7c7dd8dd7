//! Rank command - places ordered by distance

use crate::context::{Context, QueryPoint, SourceOverrides};
use crate::output::{format_count, place_label, print_json, Status};
use crate::PointArgs;
use anyhow::Result;
use owo_colors::OwoColorize;
use placefinder_geo::{
    filter_by_category, rank_by_distance, within_radius, CategoryFilter, DisplayValue, NumberFormat,
    RankedPlace,
};
use serde::Serialize;

#[derive(Serialize)]
struct JsonRankEntry<'a> {
    rank: usize,
    #[serde(flatten)]
    ranked: RankedPlace<'a>,
    distance_display: DisplayValue,
}

#[derive(Serialize)]
struct JsonRankOutput<'a> {
    #[serde(flatten)]
    point: QueryPoint,
    category: CategoryFilter,
    radius_km: Option<f64>,
    places: Vec<JsonRankEntry<'a>>,
}

/// Rank places by distance, optionally restricted to a radius
pub async fn run(
    ctx: &Context,
    sources: &SourceOverrides,
    args: PointArgs,
    limit: usize,
    radius: Option<f64>,
) -> Result<()> {
    let point = ctx.query_point(&args)?;
    let radius_km = radius.map(|r| ctx.radius(Some(r))).transpose()?;
    let catalog = ctx.load_catalog(sources).await?;
    let filter = CategoryFilter::from(args.category);

    let filtered = filter_by_category(catalog.places(), filter);
    let mut ranked = match radius_km {
        Some(r) => within_radius(&filtered, &point.coordinate, r),
        None => rank_by_distance(&filtered, &point.coordinate, None),
    };
    let matched = ranked.len();
    ranked.truncate(limit);

    if ctx.is_json() {
        return print_json(&JsonRankOutput {
            point,
            category: filter,
            radius_km,
            places: json_entries(&ranked, &ctx.number_format),
        });
    }

    Status::header(&format!("Nearest places ({})", ctx.filter_label(&catalog, filter)));

    if ranked.is_empty() {
        Status::warning("No places to rank");
        return Ok(());
    }

    for (i, entry) in ranked.iter().enumerate() {
        println!(
            "  {:>3}. {:<48} {:>14}",
            i + 1,
            place_label(&entry.place.name, entry.place.gaelic_name.as_deref()),
            ctx.display_km(entry.distance_km).cyan()
        );
    }

    println!();
    if matched > ranked.len() {
        println!(
            "  {}",
            format!("Showing {} of {}", ranked.len(), format_count(matched, "place", "places")).dimmed()
        );
    }

    Ok(())
}

fn json_entries<'a>(ranked: &[RankedPlace<'a>], number_format: &NumberFormat) -> Vec<JsonRankEntry<'a>> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, &entry)| JsonRankEntry {
            rank: i + 1,
            ranked: entry,
            distance_display: number_format.format(entry.distance_km),
        })
        .collect()
}
