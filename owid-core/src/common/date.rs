//! Mapping between wall-clock instants and the compact on-wire timestamp.
//!
//! OWID timestamps are whole minutes elapsed since the fixed epoch base
//! `2020-01-01T00:00:00Z`. The base is interpreted in UTC on every host;
//! interop requires all parties to agree on this instant.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

/// Unix seconds of `2020-01-01T00:00:00Z`.
const EPOCH_BASE_UNIX_SECS: i64 = 1_577_836_800;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("instant {0} is before the epoch base")]
    BeforeEpoch(DateTime<Utc>),

    #[error("instant {0} is beyond the 32-bit minute range")]
    BeyondRange(DateTime<Utc>),
}

/// The fixed instant OWID timestamps are measured from.
pub fn epoch_base() -> DateTime<Utc> {
    DateTime::from_timestamp(EPOCH_BASE_UNIX_SECS, 0).expect("epoch base is a valid instant")
}

/// Whole minutes elapsed between the epoch base and `instant`, floored.
pub fn to_minutes(instant: &DateTime<Utc>) -> Result<u32, DateError> {
    let minutes = instant.signed_duration_since(epoch_base()).num_minutes();
    if minutes < 0 {
        return Err(DateError::BeforeEpoch(*instant));
    }
    u32::try_from(minutes).map_err(|_| DateError::BeyondRange(*instant))
}

/// The instant `minutes` whole minutes after the epoch base.
pub fn from_minutes(minutes: u32) -> DateTime<Utc> {
    epoch_base() + Duration::minutes(i64::from(minutes))
}

/// The current wall-clock time as an on-wire timestamp.
pub fn now_in_minutes() -> Result<u32, DateError> {
    to_minutes(&Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn epoch_base_is_2020_utc() {
        let expected = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(epoch_base(), expected);
    }

    #[test]
    fn one_day_is_1440_minutes() {
        let instant = Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(to_minutes(&instant).unwrap(), 1440);
    }

    #[test]
    fn partial_minutes_are_floored() {
        let instant = Utc.with_ymd_and_hms(2020, 1, 1, 0, 1, 59).unwrap();
        assert_eq!(to_minutes(&instant).unwrap(), 1);
    }

    #[test]
    fn minutes_roundtrip() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap();
        let minutes = to_minutes(&instant).unwrap();
        assert_eq!(from_minutes(minutes), instant);
    }

    #[test]
    fn instants_before_the_base_are_rejected() {
        let instant = Utc.with_ymd_and_hms(2019, 12, 31, 23, 59, 0).unwrap();
        assert_eq!(to_minutes(&instant), Err(DateError::BeforeEpoch(instant)));
    }

    #[test]
    fn now_is_representable() {
        assert!(now_in_minutes().unwrap() > 0);
    }
}
