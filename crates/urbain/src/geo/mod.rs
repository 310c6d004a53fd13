//! Great-circle distances, distance labels and directions deep links.

use serde::{Deserialize, Serialize};
use url::Url;
use urbain_data::Coordinates;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir/";

/// Haversine distance between two points, in meters.
#[must_use]
pub fn distance_meters(from: Coordinates, to: Coordinates) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let d_phi = (to.lat - from.lat).to_radians();
    let d_lambda = (to.lng - from.lng).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Short display label: whole meters below 1 km, kilometers with one decimal above.
#[must_use]
pub fn format_distance(meters: f64) -> String {
    let rounded = meters.round();
    if rounded < 1000.0 {
        format!("{} m", rounded as i64)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// External maps deep link routing from the device position to `destination`.
#[must_use]
pub fn directions_url(destination: Coordinates) -> Url {
    let mut url = Url::parse(DIRECTIONS_BASE_URL).expect("directions base URL is valid");
    url.query_pairs_mut()
        .append_pair("api", "1")
        .append_pair("destination", &destination.to_string());
    url
}

/// An in-app route request between the user and a place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub start: Coordinates,
    pub end: Coordinates,
}

impl Route {
    #[must_use]
    pub fn distance_meters(&self) -> f64 {
        distance_meters(self.start, self.end)
    }
}
