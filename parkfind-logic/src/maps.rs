use crate::geo::Coordinate;

/// Links for handing the saved spot off to an external maps app. Opening
/// the URL (and letting the user pick an app) is the platform layer's
/// job.
pub fn apple_maps_url(spot: &Coordinate, label: &str) -> String {
    format!(
        "https://maps.apple.com/?q={label}&ll={},{}",
        spot.latitude, spot.longitude
    )
}

pub fn google_maps_url(spot: &Coordinate) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={},{}",
        spot.latitude, spot.longitude
    )
}

/// Android geo: URI.
pub fn geo_uri(spot: &Coordinate, label: &str) -> String {
    format!("geo:{},{}?q={label}", spot.latitude, spot.longitude)
}
