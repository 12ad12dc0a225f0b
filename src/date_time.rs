// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! An OPC UA `DateTime`: a signed count of 100-nanosecond ticks since 1601-01-01T00:00:00Z,
//! the same epoch and resolution as Windows `FILETIME`. JSON form is an ISO-8601 /
//! RFC 3339 string; `0` ticks (the epoch itself) is treated as the null/default value.

use std::io::Write;

use chrono::{DateTime as ChronoDateTime, Duration, TimeZone, Utc};
use struson::writer::{JsonStreamWriter, JsonWriter};

use crate::context::Context;
use crate::decoder::JsonDecoder;
use crate::encoding::UaNullable;
use crate::error::{EncodingResult, Error};
use crate::json::{JsonDecodable, JsonEncodable};

/// Ticks between the OPC UA epoch (1601-01-01) and the Unix epoch (1970-01-01).
const TICKS_TO_UNIX_EPOCH: i64 = 11_644_473_600 * 10_000_000;

/// A UTC instant at 100-nanosecond resolution, anchored to the OPC UA epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UaDateTime {
    ticks: i64,
}

impl UaNullable for UaDateTime {
    fn is_ua_null(&self) -> bool {
        self.ticks == 0
    }
}

impl UaDateTime {
    /// The null/default DateTime (the OPC UA epoch itself).
    pub fn null() -> Self {
        Self { ticks: 0 }
    }

    /// Build from a raw 100-ns tick count since the OPC UA epoch.
    pub fn from_ticks(ticks: i64) -> Self {
        Self { ticks }
    }

    /// The raw 100-ns tick count since the OPC UA epoch.
    pub fn ticks(&self) -> i64 {
        self.ticks
    }

    /// Convert from a `chrono` UTC instant.
    pub fn from_chrono(dt: ChronoDateTime<Utc>) -> Self {
        let unix_ticks = dt.timestamp() * 10_000_000 + i64::from(dt.timestamp_subsec_nanos() / 100);
        Self {
            ticks: unix_ticks + TICKS_TO_UNIX_EPOCH,
        }
    }

    /// Convert to a `chrono` UTC instant, truncating to nanosecond resolution.
    pub fn to_chrono(self) -> Option<ChronoDateTime<Utc>> {
        let unix_ticks = self.ticks - TICKS_TO_UNIX_EPOCH;
        let seconds = unix_ticks.div_euclid(10_000_000);
        let sub_ticks = unix_ticks.rem_euclid(10_000_000);
        Utc.timestamp_opt(seconds, (sub_ticks * 100) as u32).single()
    }

    /// `true` if this falls before the Unix epoch, outside `chrono::DateTime`'s comfortable
    /// display range for very old OPC UA timestamps (kept for callers doing range checks).
    pub fn is_before_unix_epoch(&self) -> bool {
        self.ticks < TICKS_TO_UNIX_EPOCH
    }
}

impl std::ops::Add<Duration> for UaDateTime {
    type Output = UaDateTime;

    fn add(self, rhs: Duration) -> Self::Output {
        let nanos = rhs.num_nanoseconds().unwrap_or(0);
        Self {
            ticks: self.ticks + nanos / 100,
        }
    }
}

impl JsonEncodable for UaDateTime {
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, _ctx: &Context<'_>) -> EncodingResult<()> {
        match self.to_chrono() {
            Some(dt) => {
                let text = dt.to_rfc3339_opts(chrono::SecondsFormat::Nanos, true);
                stream.string_value(&text)?;
            }
            None => stream.null_value()?,
        }
        Ok(())
    }
}

impl JsonDecodable for UaDateTime {
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
        if decoder.current_is_null() {
            return Ok(UaDateTime::null());
        }
        let raw = decoder.current_string()?;
        let parsed = ChronoDateTime::parse_from_rfc3339(raw).map_err(Error::decoding)?;
        Ok(UaDateTime::from_chrono(parsed.with_timezone(&Utc)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_null() {
        assert!(UaDateTime::null().is_ua_null());
    }

    #[test]
    fn chrono_round_trip() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 15, 12, 30, 0).unwrap();
        let ua = UaDateTime::from_chrono(dt);
        let back = ua.to_chrono().unwrap();
        assert_eq!(dt.timestamp(), back.timestamp());
    }
}
