//! Defines the CO-OPS data products and how far a single request for each may reach.

use chrono::TimeDelta;
use crate::types::options::UnknownOption;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A category of oceanographic measurement served by the CO-OPS data API.
///
/// The product decides the request step used when a long date range is split
/// into service-sized chunks (see [`Product::step`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    /// Preliminary or verified water levels, depending on availability.
    #[default]
    WaterLevel,
    /// Air temperature as measured at the station.
    AirTemperature,
    /// Water temperature as measured at the station.
    WaterTemperature,
    /// Wind speed, direction and gusts as measured at the station.
    Wind,
    /// Barometric pressure as measured at the station.
    AirPressure,
    /// Distance between a bridge and the water's surface.
    AirGap,
    /// The water's conductivity as measured at the station.
    Conductivity,
    /// Visibility from the station's visibility sensor.
    Visibility,
    /// Relative humidity as measured at the station.
    Humidity,
    /// Salinity and specific gravity data for the station.
    Salinity,
    /// Verified hourly height water level data.
    HourlyHeight,
    /// Verified high/low water level data.
    HighLow,
    /// Verified daily mean water level data.
    DailyMean,
    /// Verified monthly mean water level data.
    MonthlyMean,
    /// One minute water level data.
    OneMinuteWaterLevel,
    /// 6 minute predicted water level data.
    Predictions,
    /// Datum values for the station.
    Datums,
    /// Currents data for current meter stations.
    Currents,
}

impl Product {
    pub const ALL: [Product; 18] = [
        Product::WaterLevel,
        Product::AirTemperature,
        Product::WaterTemperature,
        Product::Wind,
        Product::AirPressure,
        Product::AirGap,
        Product::Conductivity,
        Product::Visibility,
        Product::Humidity,
        Product::Salinity,
        Product::HourlyHeight,
        Product::HighLow,
        Product::DailyMean,
        Product::MonthlyMean,
        Product::OneMinuteWaterLevel,
        Product::Predictions,
        Product::Datums,
        Product::Currents,
    ];

    /// The value sent as the `product` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Product::WaterLevel => "water_level",
            Product::AirTemperature => "air_temperature",
            Product::WaterTemperature => "water_temperature",
            Product::Wind => "wind",
            Product::AirPressure => "air_pressure",
            Product::AirGap => "air_gap",
            Product::Conductivity => "conductivity",
            Product::Visibility => "visibility",
            Product::Humidity => "humidity",
            Product::Salinity => "salinity",
            Product::HourlyHeight => "hourly_height",
            Product::HighLow => "high_low",
            Product::DailyMean => "daily_mean",
            Product::MonthlyMean => "monthly_mean",
            Product::OneMinuteWaterLevel => "one_minute_water_level",
            Product::Predictions => "predictions",
            Product::Datums => "datums",
            Product::Currents => "currents",
        }
    }

    /// The longest span one request for this product may cover.
    ///
    /// Dense products get short steps, aggregated products long ones. Anything
    /// not listed falls back to the service's 31 day limit.
    pub fn step(&self) -> TimeDelta {
        match self {
            Product::OneMinuteWaterLevel => TimeDelta::days(5),
            Product::HourlyHeight | Product::HighLow => TimeDelta::days(365),
            Product::Predictions | Product::DailyMean | Product::MonthlyMean => {
                TimeDelta::days(3650)
            }
            _ => TimeDelta::days(31),
        }
    }
}

/// Formats a `Product` as its wire name.
///
/// # Examples
///
/// ```
/// use coops::Product;
///
/// assert_eq!(Product::OneMinuteWaterLevel.to_string(), "one_minute_water_level");
/// ```
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Product {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Product::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownOption::new("product", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_follow_product_density() {
        assert_eq!(Product::OneMinuteWaterLevel.step(), TimeDelta::days(5));
        assert_eq!(Product::HourlyHeight.step(), TimeDelta::days(365));
        assert_eq!(Product::HighLow.step(), TimeDelta::days(365));
        assert_eq!(Product::Predictions.step(), TimeDelta::days(3650));
        assert_eq!(Product::DailyMean.step(), TimeDelta::days(3650));
        assert_eq!(Product::MonthlyMean.step(), TimeDelta::days(3650));
        assert_eq!(Product::WaterLevel.step(), TimeDelta::days(31));
        assert_eq!(Product::Currents.step(), TimeDelta::days(31));
        assert_eq!(Product::Datums.step(), TimeDelta::days(31));
    }

    #[test]
    fn wire_names_parse_back() {
        for product in Product::ALL {
            assert_eq!(product.as_str().parse::<Product>(), Ok(product));
        }
        let err = "tide".parse::<Product>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown product 'tide'");
    }
}
