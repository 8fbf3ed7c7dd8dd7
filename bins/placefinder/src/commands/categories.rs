//! Categories command - list the category selector

use crate::context::{Context, SourceOverrides};
use crate::output::{format_count, print_json, Status};
use anyhow::Result;
use owo_colors::OwoColorize;
use placefinder_geo::{filter_by_category, Catalog, CategoryFilter, PlaceCategory};
use serde::Serialize;

#[derive(Serialize)]
struct CategoryRow<'a> {
    id: i64,
    name: &'a str,
    color: Option<&'static str>,
    places: usize,
}

/// List "All" followed by the loaded categories
pub async fn run(ctx: &Context, sources: &SourceOverrides) -> Result<()> {
    let catalog = ctx.load_catalog(sources).await?;
    let options = catalog.selector_options();
    let rows = category_rows(&catalog, &options);

    if ctx.is_json() {
        return print_json(&rows);
    }

    Status::header("Categories");
    for row in &rows {
        let swatch = row.color.unwrap_or("-");
        println!(
            "  {:>4}  {:<28} {:<10} {}",
            row.id.to_string().cyan(),
            row.name,
            swatch.dimmed(),
            format_count(row.places, "place", "places")
        );
    }
    println!();

    Ok(())
}

fn category_rows<'a>(catalog: &Catalog, options: &'a [PlaceCategory]) -> Vec<CategoryRow<'a>> {
    options
        .iter()
        .map(|category| CategoryRow {
            id: category.id,
            name: &category.name,
            color: category.color(),
            places: filter_by_category(catalog.places(), CategoryFilter::from(category.id)).len(),
        })
        .collect()
}
