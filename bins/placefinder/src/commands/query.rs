//! Query commands - nearest place and radius counts

use crate::context::{Context, QueryPoint, SourceOverrides};
use crate::output::{format_count, place_label, print_json, Status};
use crate::PointArgs;
use anyhow::Result;
use owo_colors::OwoColorize;
use placefinder_core::Error;
use placefinder_geo::{
    count_within_radius, filter_by_category, nearest as find_nearest, Catalog, CategoryFilter,
    DisplayValue, Place, ProximityQuery, ProximityResult,
};
use serde::Serialize;

#[derive(Serialize)]
struct QueryEcho {
    #[serde(flatten)]
    point: QueryPoint,
    category: CategoryFilter,
    #[serde(skip_serializing_if = "Option::is_none")]
    radius_km: Option<f64>,
}

#[derive(Serialize)]
struct JsonQueryOutput<'a> {
    query: QueryEcho,
    #[serde(flatten)]
    result: ProximityResult<'a>,
    distance_display: Option<DisplayValue>,
}

#[derive(Serialize)]
struct JsonNearestOutput<'a> {
    query: QueryEcho,
    nearest_place: Option<&'a Place>,
    distance_km: Option<f64>,
    distance_display: Option<DisplayValue>,
}

#[derive(Serialize)]
struct JsonCountOutput {
    query: QueryEcho,
    count_within_radius: usize,
}

/// Nearest place, its distance, and the count within the radius
pub async fn run(ctx: &Context, sources: &SourceOverrides, args: PointArgs, radius: Option<f64>) -> Result<()> {
    let point = ctx.query_point(&args)?;
    let radius_km = ctx.radius(radius)?;
    let catalog = ctx.load_catalog(sources).await?;

    let query = ProximityQuery::try_new(CategoryFilter::from(args.category), point.coordinate, radius_km)
        .map_err(|_| Error::invalid_radius(radius_km))?;
    let result = query.evaluate(&catalog);

    tracing::debug!(
        filter = ?query.filter,
        radius_km,
        count = result.count_within_radius,
        "Proximity query evaluated"
    );

    if ctx.is_json() {
        return print_json(&JsonQueryOutput {
            query: QueryEcho {
                point,
                category: query.filter,
                radius_km: Some(radius_km),
            },
            result,
            distance_display: result.distance_km.map(|km| ctx.number_format.format(km)),
        });
    }

    print_query_header(ctx, &catalog, point, query.filter);
    println!("  Radius:    {}", ctx.display_km(radius_km));
    println!();

    print_nearest(ctx, &catalog, result.nearest_place, result.distance_km);
    println!(
        "  {} within {}",
        format_count(result.count_within_radius, "place", "places").bold(),
        ctx.display_km(radius_km)
    );
    println!();

    Ok(())
}

/// Nearest place to the query point
pub async fn nearest(ctx: &Context, sources: &SourceOverrides, args: PointArgs) -> Result<()> {
    let point = ctx.query_point(&args)?;
    let catalog = ctx.load_catalog(sources).await?;
    let filter = CategoryFilter::from(args.category);

    let filtered = filter_by_category(catalog.places(), filter);
    let closest = find_nearest(filtered.iter().copied(), &point.coordinate);

    if ctx.is_json() {
        return print_json(&JsonNearestOutput {
            query: QueryEcho {
                point,
                category: filter,
                radius_km: None,
            },
            nearest_place: closest.map(|n| n.place),
            distance_km: closest.map(|n| n.distance_km),
            distance_display: closest.map(|n| ctx.number_format.format(n.distance_km)),
        });
    }

    print_query_header(ctx, &catalog, point, filter);
    println!();
    print_nearest(ctx, &catalog, closest.map(|n| n.place), closest.map(|n| n.distance_km));
    println!();

    Ok(())
}

/// Number of places within a radius
pub async fn count(ctx: &Context, sources: &SourceOverrides, args: PointArgs, radius: f64) -> Result<()> {
    let point = ctx.query_point(&args)?;
    let radius_km = ctx.radius(Some(radius))?;
    let catalog = ctx.load_catalog(sources).await?;
    let filter = CategoryFilter::from(args.category);

    let filtered = filter_by_category(catalog.places(), filter);
    let total = count_within_radius(filtered.iter().copied(), &point.coordinate, radius_km);

    if ctx.is_json() {
        return print_json(&JsonCountOutput {
            query: QueryEcho {
                point,
                category: filter,
                radius_km: Some(radius_km),
            },
            count_within_radius: total,
        });
    }

    Status::info(&format!(
        "{} within {} of {:.4}, {:.4} ({})",
        format_count(total, "place", "places"),
        ctx.display_km(radius_km),
        point.coordinate.latitude,
        point.coordinate.longitude,
        ctx.filter_label(&catalog, filter)
    ));

    Ok(())
}

fn print_query_header(ctx: &Context, catalog: &Catalog, point: QueryPoint, filter: CategoryFilter) {
    Status::header("Proximity");
    let note = if point.fallback { " (default)" } else { "" };
    println!(
        "  Point:     {:.4}, {:.4}{}",
        point.coordinate.latitude,
        point.coordinate.longitude,
        note.dimmed()
    );
    println!("  Category:  {}", ctx.filter_label(catalog, filter));
}

fn print_nearest(ctx: &Context, catalog: &Catalog, place: Option<&Place>, distance_km: Option<f64>) {
    match (place, distance_km) {
        (Some(place), Some(km)) => {
            let category = catalog.category_name(place).unwrap_or("Uncategorised");
            println!(
                "  Nearest:   {} {}",
                place_label(&place.name, place.gaelic_name.as_deref()).green().bold(),
                format!("[{}]", category).dimmed()
            );
            if let Some(location) = &place.location {
                println!("             {}", location.dimmed());
            }
            println!("  Distance:  {}", ctx.display_km(km));
        }
        _ => Status::warning("No places match the selected category"),
    }
}
