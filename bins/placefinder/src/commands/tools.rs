//! Standalone tools that need no catalog

use crate::context::Context;
use crate::output::print_json;
use anyhow::Result;
use placefinder_core::Error;
use placefinder_geo::{haversine_distance, Coordinate, DisplayValue};
use serde::Serialize;

#[derive(Serialize)]
struct JsonDistanceOutput {
    from: Coordinate,
    to: Coordinate,
    distance_km: f64,
    distance_display: DisplayValue,
}

#[derive(Serialize)]
struct JsonFormatOutput {
    distance_km: f64,
    display: DisplayValue,
}

/// Great-circle distance between two coordinates
pub fn distance(ctx: &Context, from: (f64, f64), to: (f64, f64)) -> Result<()> {
    let from = checked(from)?;
    let to = checked(to)?;
    let km = haversine_distance(&from, &to);

    if ctx.is_json() {
        return print_json(&JsonDistanceOutput {
            from,
            to,
            distance_km: km,
            distance_display: ctx.number_format.format(km),
        });
    }

    println!("{km:.3} km ({})", ctx.display_km(km));
    Ok(())
}

/// Display form of a distance
pub fn format(ctx: &Context, km: f64) -> Result<()> {
    if km.is_nan() || km < 0.0 {
        return Err(Error::validation(format!("Distance must be a non-negative number, got {km}")).into());
    }

    let display = ctx.number_format.format(km);

    if ctx.is_json() {
        return print_json(&JsonFormatOutput { distance_km: km, display });
    }

    println!("{display}");
    Ok(())
}

fn checked((latitude, longitude): (f64, f64)) -> Result<Coordinate> {
    Coordinate::try_new(latitude, longitude)
        .map_err(|_| anyhow::Error::from(Error::invalid_coordinate(latitude, longitude)))
}
