//! Registry configuration for CWB observation datasets.
//!
//! Every supported dataset is listed explicitly in [`create_cwb_registry`].

use std::sync::LazyLock;

use super::core::DatasetRegistry;
use super::types::{FieldDescriptor, KeyMatch, Schema, ValueKind};

/// Automatic weather stations, observation data.
pub const AUTOMATIC_STATIONS: &str = "O-A0001-001";

/// Bureau weather stations, current weather report.
pub const BUREAU_STATIONS: &str = "O-A0003-001";

static DEFAULT_REGISTRY: LazyLock<DatasetRegistry> = LazyLock::new(create_cwb_registry);

/// The process-wide registry of supported datasets.
#[must_use]
pub fn default_registry() -> &'static DatasetRegistry {
    &DEFAULT_REGISTRY
}

/// Create a registry with every supported CWB dataset.
#[must_use]
pub fn create_cwb_registry() -> DatasetRegistry {
    let mut registry = DatasetRegistry::new();
    registry.register(automatic_stations_schema());
    registry.register(bureau_stations_schema());
    registry
}

/// Columns every location record starts with.
fn station_fields() -> [FieldDescriptor; 5] {
    [
        FieldDescriptor::child("lat", "lat", ValueKind::Numeric),
        FieldDescriptor::child("lon", "lon", ValueKind::Numeric),
        FieldDescriptor::child("locationName", "locationName", ValueKind::Text),
        FieldDescriptor::child("stationId", "stationId", ValueKind::Text),
        FieldDescriptor::child("obsTime", "time/obsTime", ValueKind::Text),
    ]
}

/// Administrative region columns every location record ends with.
///
/// CITY and TOWN are prefixes of CITY_SN and TOWN_SN, so they must match
/// exactly.
fn region_fields() -> [FieldDescriptor; 4] {
    [
        FieldDescriptor::parameter("CITY", KeyMatch::Exact),
        FieldDescriptor::parameter("CITY_SN", KeyMatch::Contains),
        FieldDescriptor::parameter("TOWN", KeyMatch::Exact),
        FieldDescriptor::parameter("TOWN_SN", KeyMatch::Contains),
    ]
}

/// Schema for O-A0001-001.
///
/// Element units: ELEV m, WDIR degrees, TEMP °C, HUMD 0-1, PRES hPa,
/// SUN hours, H_24R mm, WS15M m/s, WD15M degrees, WS15T hhmm.
#[must_use]
pub fn automatic_stations_schema() -> Schema {
    Schema::new(AUTOMATIC_STATIONS, "自動氣象站-氣象觀測資料")
        .with_fields(station_fields())
        .with_fields(
            [
                "ELEV", "WDIR", "TEMP", "HUMD", "PRES", "SUN", "H_24R", "WS15M", "WD15M", "WS15T",
            ]
            .map(|key| FieldDescriptor::element(key, KeyMatch::Contains)),
        )
        .with_fields(region_fields())
}

/// Schema for O-A0003-001.
///
/// Adds gust and ten-minute wind columns. H_FX is a prefix of H_FXT and
/// H_F10 of H_F10T, so these and 24R match exactly.
#[must_use]
pub fn bureau_stations_schema() -> Schema {
    Schema::new(BUREAU_STATIONS, "局屬氣象站-現在天氣觀測報告")
        .with_fields(station_fields())
        .with_fields(
            ["ELEV", "WDIR", "WDSD", "TEMP", "HUMD", "PRES"]
                .map(|key| FieldDescriptor::element(key, KeyMatch::Contains)),
        )
        .with_fields(
            ["24R", "H_FX", "H_XD", "H_FXT", "H_F10", "H_10D", "H_F10T"]
                .map(|key| FieldDescriptor::element(key, KeyMatch::Exact)),
        )
        .with_fields(region_fields())
}
