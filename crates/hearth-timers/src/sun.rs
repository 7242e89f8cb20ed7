//! Solar event computation and resolution.
//!
//! Implements the standard sun-phase algorithm (solar mean anomaly →
//! ecliptic longitude → declination → transit/hour-angle) over
//! `chrono::DateTime<Utc>`, producing the familiar 14-event table from
//! sunrise through nadir. Events that never reach their altitude at the
//! given latitude and date (polar day / polar night) come back as `None`.
//!
//! The table is recomputed on every resolution call — "now" advances, so
//! caching a day's table would hand out stale rollovers.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use hearth_core::types::Coordinate;

use crate::error::{Result, TimerError};
use crate::offset::apply_offset;

/// The named solar events, in chronological order over a typical day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SolarEvent {
    NightEnd,
    NauticalDawn,
    Dawn,
    Sunrise,
    SunriseEnd,
    GoldenHourEnd,
    SolarNoon,
    GoldenHour,
    SunsetStart,
    Sunset,
    Dusk,
    NauticalDusk,
    Night,
    Nadir,
}

impl SolarEvent {
    pub const ALL: [SolarEvent; 14] = [
        SolarEvent::NightEnd,
        SolarEvent::NauticalDawn,
        SolarEvent::Dawn,
        SolarEvent::Sunrise,
        SolarEvent::SunriseEnd,
        SolarEvent::GoldenHourEnd,
        SolarEvent::SolarNoon,
        SolarEvent::GoldenHour,
        SolarEvent::SunsetStart,
        SolarEvent::Sunset,
        SolarEvent::Dusk,
        SolarEvent::NauticalDusk,
        SolarEvent::Night,
        SolarEvent::Nadir,
    ];

    /// The camelCase name as it appears in timer specs.
    pub fn name(&self) -> &'static str {
        match self {
            SolarEvent::NightEnd => "nightEnd",
            SolarEvent::NauticalDawn => "nauticalDawn",
            SolarEvent::Dawn => "dawn",
            SolarEvent::Sunrise => "sunrise",
            SolarEvent::SunriseEnd => "sunriseEnd",
            SolarEvent::GoldenHourEnd => "goldenHourEnd",
            SolarEvent::SolarNoon => "solarNoon",
            SolarEvent::GoldenHour => "goldenHour",
            SolarEvent::SunsetStart => "sunsetStart",
            SolarEvent::Sunset => "sunset",
            SolarEvent::Dusk => "dusk",
            SolarEvent::NauticalDusk => "nauticalDusk",
            SolarEvent::Night => "night",
            SolarEvent::Nadir => "nadir",
        }
    }
}

impl fmt::Display for SolarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SolarEvent {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SolarEvent::ALL
            .iter()
            .copied()
            .find(|e| e.name() == s)
            .ok_or_else(|| format!("unknown solar event: {s}"))
    }
}

/// One day's solar event table at a coordinate.
///
/// `None` means the sun never crosses the event's altitude that day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarTimes {
    pub night_end: Option<DateTime<Utc>>,
    pub nautical_dawn: Option<DateTime<Utc>>,
    pub dawn: Option<DateTime<Utc>>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunrise_end: Option<DateTime<Utc>>,
    pub golden_hour_end: Option<DateTime<Utc>>,
    pub solar_noon: Option<DateTime<Utc>>,
    pub golden_hour: Option<DateTime<Utc>>,
    pub sunset_start: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub dusk: Option<DateTime<Utc>>,
    pub nautical_dusk: Option<DateTime<Utc>>,
    pub night: Option<DateTime<Utc>>,
    pub nadir: Option<DateTime<Utc>>,
}

impl SolarTimes {
    pub fn get(&self, event: SolarEvent) -> Option<DateTime<Utc>> {
        match event {
            SolarEvent::NightEnd => self.night_end,
            SolarEvent::NauticalDawn => self.nautical_dawn,
            SolarEvent::Dawn => self.dawn,
            SolarEvent::Sunrise => self.sunrise,
            SolarEvent::SunriseEnd => self.sunrise_end,
            SolarEvent::GoldenHourEnd => self.golden_hour_end,
            SolarEvent::SolarNoon => self.solar_noon,
            SolarEvent::GoldenHour => self.golden_hour,
            SolarEvent::SunsetStart => self.sunset_start,
            SolarEvent::Sunset => self.sunset,
            SolarEvent::Dusk => self.dusk,
            SolarEvent::NauticalDusk => self.nautical_dusk,
            SolarEvent::Night => self.night,
            SolarEvent::Nadir => self.nadir,
        }
    }
}

// --- sun-position math -----------------------------------------------------

const MS_PER_DAY: f64 = 86_400_000.0;
const J1970: f64 = 2_440_588.0;
const J2000: f64 = 2_451_545.0;
const J0: f64 = 0.0009;

fn to_days(t: DateTime<Utc>) -> f64 {
    t.timestamp_millis() as f64 / MS_PER_DAY - 0.5 + J1970 - J2000
}

fn from_julian(j: f64) -> Option<DateTime<Utc>> {
    if !j.is_finite() {
        return None;
    }
    let ms = (j + 0.5 - J1970) * MS_PER_DAY;
    Utc.timestamp_millis_opt(ms.round() as i64).single()
}

fn solar_mean_anomaly(d: f64) -> f64 {
    (357.5291 + 0.985_600_28 * d).to_radians()
}

fn ecliptic_longitude(m: f64) -> f64 {
    // equation of center + perihelion of the Earth
    let center =
        (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin()).to_radians();
    let perihelion = 102.9372_f64.to_radians();
    m + center + perihelion + PI
}

fn declination(ecliptic_lon: f64) -> f64 {
    let obliquity = 23.4397_f64.to_radians();
    (ecliptic_lon.sin() * obliquity.sin()).asin()
}

fn julian_cycle(d: f64, lw: f64) -> f64 {
    (d - J0 - lw / (2.0 * PI)).round()
}

fn approx_transit(hour_angle: f64, lw: f64, n: f64) -> f64 {
    J0 + (hour_angle + lw) / (2.0 * PI) + n
}

fn solar_transit_j(ds: f64, m: f64, l: f64) -> f64 {
    J2000 + ds + 0.0053 * m.sin() - 0.0069 * (2.0 * l).sin()
}

/// NaN when the sun never reaches altitude `h` at latitude `phi`.
fn hour_angle(h: f64, phi: f64, dec: f64) -> f64 {
    ((h.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos())).acos()
}

/// Compute the full event table for the day containing `at` (in the
/// coordinate's solar cycle) at `coordinate`.
pub fn solar_times(at: DateTime<Utc>, coordinate: Coordinate) -> SolarTimes {
    let lw = -coordinate.longitude.to_radians();
    let phi = coordinate.latitude.to_radians();

    let d = to_days(at);
    let n = julian_cycle(d, lw);
    let ds = approx_transit(0.0, lw, n);
    let m = solar_mean_anomaly(ds);
    let l = ecliptic_longitude(m);
    let dec = declination(l);
    let j_noon = solar_transit_j(ds, m, l);

    // (rise, set) instants where the sun crosses `angle_deg` above the horizon
    let crossing = |angle_deg: f64| {
        let w = hour_angle(angle_deg.to_radians(), phi, dec);
        let j_set = solar_transit_j(approx_transit(w, lw, n), m, l);
        let j_rise = j_noon - (j_set - j_noon);
        (from_julian(j_rise), from_julian(j_set))
    };

    let (sunrise, sunset) = crossing(-0.833);
    let (sunrise_end, sunset_start) = crossing(-0.3);
    let (dawn, dusk) = crossing(-6.0);
    let (nautical_dawn, nautical_dusk) = crossing(-12.0);
    let (night_end, night) = crossing(-18.0);
    let (golden_hour_end, golden_hour) = crossing(6.0);

    SolarTimes {
        night_end,
        nautical_dawn,
        dawn,
        sunrise,
        sunrise_end,
        golden_hour_end,
        solar_noon: from_julian(j_noon),
        golden_hour,
        sunset_start,
        sunset,
        dusk,
        nautical_dusk,
        night,
        nadir: from_julian(j_noon - 0.5),
    }
}

/// Resolve the next occurrence of `event` at `coordinate`, offset applied.
///
/// Computes today's table relative to `now`; if the offset-adjusted instant
/// has already passed, rolls forward exactly one day and recomputes. The
/// result of the rolled computation is accepted as-is — a pathological
/// offset that still lands before `now` is not re-validated, because the
/// next re-arm happens fresh after firing anyway.
pub fn resolve_solar_time(
    now: DateTime<Utc>,
    event: SolarEvent,
    offset: Option<&str>,
    coordinate: Coordinate,
) -> Result<DateTime<Utc>> {
    let unavailable = || TimerError::SolarEventUnavailable {
        event,
        latitude: coordinate.latitude,
        longitude: coordinate.longitude,
    };

    let base = solar_times(now, coordinate).get(event).ok_or_else(unavailable)?;
    let due = apply_offset(base, offset);
    if due >= now {
        return Ok(due);
    }

    let tomorrow = now + Duration::hours(24);
    let base = solar_times(tomorrow, coordinate)
        .get(event)
        .ok_or_else(unavailable)?;
    Ok(apply_offset(base, offset))
}
