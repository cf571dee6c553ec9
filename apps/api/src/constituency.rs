//! Maps a point to its electoral constituencies via flat bounding boxes.

/// A rectangular constituency zone. Both latitude and longitude bounds are
/// inclusive on both ends.
#[derive(Debug, Clone, Copy)]
pub struct Zone {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
    pub na: &'static str,
    pub ps: &'static str,
}

/// Sentinel codes returned when no zone contains the point.
pub const NA_UNKNOWN: &str = "NA-000";
pub const PS_UNKNOWN: &str = "PS-000";

/// Known zones, evaluated in order. Zones may overlap; `resolve` returns the
/// first match, so the order of this list is load-bearing.
pub const ZONES: &[Zone] = &[
    // Karachi South (Clifton / DHA)
    Zone {
        lat_min: 24.77,
        lat_max: 24.90,
        lng_min: 66.95,
        lng_max: 67.10,
        na: "NA-247",
        ps: "PS-110",
    },
    // Karachi East (Gulshan)
    Zone {
        lat_min: 24.88,
        lat_max: 24.98,
        lng_min: 67.05,
        lng_max: 67.20,
        na: "NA-242",
        ps: "PS-102",
    },
];

/// Resolves a point to its (national, provincial) constituency code pair.
/// Falls back to the sentinel pair when no zone contains the point.
/// Pure and total; never fails.
pub fn resolve(lat: f64, lng: f64) -> (&'static str, &'static str) {
    for zone in ZONES {
        if zone.lat_min <= lat && lat <= zone.lat_max && zone.lng_min <= lng && lng <= zone.lng_max
        {
            return (zone.na, zone.ps);
        }
    }
    (NA_UNKNOWN, PS_UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_inside_single_zone() {
        assert_eq!(resolve(24.83, 67.06), ("NA-247", "PS-110"));
        assert_eq!(resolve(24.95, 67.15), ("NA-242", "PS-102"));
    }

    #[test]
    fn test_no_zone_returns_sentinel() {
        assert_eq!(resolve(0.0, 0.0), ("NA-000", "PS-000"));
        assert_eq!(resolve(33.68, 73.04), ("NA-000", "PS-000"));
    }

    #[test]
    fn test_overlap_first_zone_wins() {
        // (24.89, 67.07) sits inside both Karachi South and Karachi East;
        // the earlier-listed zone decides.
        assert_eq!(resolve(24.89, 67.07), ("NA-247", "PS-110"));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        // exact corner of Karachi South
        assert_eq!(resolve(24.90, 67.10), ("NA-247", "PS-110"));
        assert_eq!(resolve(24.77, 66.95), ("NA-247", "PS-110"));
    }

    #[test]
    fn test_just_outside_misses() {
        assert_eq!(resolve(24.905, 66.94), ("NA-000", "PS-000"));
    }
}
