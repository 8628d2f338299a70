//! Query options that qualify a data request: vertical datum, units, time zone
//! and sampling interval.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a wire string does not name a known option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} '{value}'")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownOption {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Vertical reference level that water level values are expressed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Datum {
    /// Mean higher high water.
    Mhhw,
    /// Mean high water.
    Mhw,
    /// Mean sea level.
    Msl,
    /// Mean tide level.
    Mtl,
    /// Mean low water.
    Mlw,
    /// Mean lower low water.
    Mllw,
    /// North American Vertical Datum.
    Navd,
    /// Station datum.
    #[default]
    Stnd,
    /// International Great Lakes Datum.
    Igld,
    /// Columbia River Datum.
    Crd,
}

impl Datum {
    pub const ALL: [Datum; 10] = [
        Datum::Mhhw,
        Datum::Mhw,
        Datum::Msl,
        Datum::Mtl,
        Datum::Mlw,
        Datum::Mllw,
        Datum::Navd,
        Datum::Stnd,
        Datum::Igld,
        Datum::Crd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Datum::Mhhw => "MHHW",
            Datum::Mhw => "MHW",
            Datum::Msl => "MSL",
            Datum::Mtl => "MTL",
            Datum::Mlw => "MLW",
            Datum::Mllw => "MLLW",
            Datum::Navd => "NAVD",
            Datum::Stnd => "STND",
            Datum::Igld => "IGLD",
            Datum::Crd => "CRD",
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Datum {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Datum::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownOption::new("datum", s))
    }
}

/// Unit system of the returned values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Celsius, meters.
    #[default]
    Metric,
    /// Fahrenheit, feet.
    English,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::English => "english",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Units {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metric" => Ok(Units::Metric),
            "english" => Ok(Units::English),
            _ => Err(UnknownOption::new("units", s)),
        }
    }
}

/// Time zone the service reports timestamps in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeZone {
    /// Greenwich mean time.
    #[default]
    Gmt,
    /// Local standard time of the station.
    Lst,
    /// Local standard or daylight time of the station.
    LstLdt,
}

impl TimeZone {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeZone::Gmt => "gmt",
            TimeZone::Lst => "lst",
            TimeZone::LstLdt => "lst_ldt",
        }
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimeZone {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gmt" => Ok(TimeZone::Gmt),
            "lst" => Ok(TimeZone::Lst),
            "lst_ldt" => Ok(TimeZone::LstLdt),
            _ => Err(UnknownOption::new("time zone", s)),
        }
    }
}

/// Sampling interval override. The service returns 6 minute data unless one is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// Hourly meteorological data and predictions.
    H,
    /// High/low tide predictions for subordinate stations.
    Hilo,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::H => "h",
            Interval::Hilo => "hilo",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interval {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h" => Ok(Interval::H),
            "hilo" => Ok(Interval::Hilo),
            _ => Err(UnknownOption::new("interval", s)),
        }
    }
}
