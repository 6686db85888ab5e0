use crate::error::{Error, Result};

pub const SECOND_MS: i64 = 1_000;
pub const MINUTE_MS: i64 = 60 * SECOND_MS;
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
/// Milliseconds in a full day; schedule times normally stay below this.
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// Formats a millisecond offset from midnight as `HH:MM:SS`.
///
/// Sub-second remainders are truncated. Offsets of a day or more keep
/// counting upward (`"25:00:00"`) so the arithmetic stays reversible.
pub fn encode(ms: i64) -> String {
    let hours = ms / HOUR_MS;
    let minutes = (ms / MINUTE_MS) % 60;
    let seconds = (ms / SECOND_MS) % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Parses an `HH:MM:SS` clock string back into milliseconds.
///
/// Exactly three `:`-separated numeric fields are required. Fractional
/// components are accepted and the total is rounded to the nearest
/// millisecond; anything else is an invalid-time-format error rather than a
/// silently wrong number.
pub fn decode(text: &str) -> Result<i64> {
    let mut fields = text.split(':');
    let (Some(hours), Some(minutes), Some(seconds), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(Error::InvalidTimeFormat(text.to_string()));
    };
    let total = parse_field(hours, text)? * HOUR_MS as f64
        + parse_field(minutes, text)? * MINUTE_MS as f64
        + parse_field(seconds, text)? * SECOND_MS as f64;
    if !total.is_finite() || total < i64::MIN as f64 || total > i64::MAX as f64 {
        return Err(Error::InvalidTimeFormat(text.to_string()));
    }
    Ok(total.round() as i64)
}

fn parse_field(field: &str, whole: &str) -> Result<f64> {
    let value: f64 = field
        .trim()
        .parse()
        .map_err(|_| Error::InvalidTimeFormat(whole.to_string()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidTimeFormat(whole.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_zero_padded_fields() {
        assert_eq!(encode(0), "00:00:00");
        assert_eq!(encode(3_661_000), "01:01:01");
        assert_eq!(encode(36_030_000), "10:00:30");
    }

    #[test]
    fn encode_truncates_subsecond_remainders() {
        assert_eq!(encode(86_399_999), "23:59:59");
        assert_eq!(encode(1_500), "00:00:01");
    }

    #[test]
    fn encode_keeps_counting_past_midnight() {
        assert_eq!(encode(90_000_000), "25:00:00");
    }

    #[test]
    fn decodes_clock_strings() {
        assert_eq!(decode("10:00:30").unwrap(), 36_030_000);
        assert_eq!(decode("00:00:00").unwrap(), 0);
        assert_eq!(decode("23:59:59").unwrap(), 86_399_000);
    }

    #[test]
    fn decode_accepts_fractional_seconds() {
        assert_eq!(decode("10:00:30.5").unwrap(), 36_030_500);
    }

    #[test]
    fn decode_rejects_malformed_input() {
        let bad = [
            "",
            "10",
            "10:00",
            "10:00:30:500",
            "aa:bb:cc",
            "10::30",
            "1 0:00:00",
            "inf:00:00",
        ];
        for text in bad {
            assert!(
                matches!(decode(text), Err(Error::InvalidTimeFormat(_))),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn whole_second_offsets_round_trip() {
        for ms in (0..DAY_MS).step_by(997 * SECOND_MS as usize) {
            assert_eq!(decode(&encode(ms)).unwrap(), ms);
        }
        assert_eq!(decode(&encode(86_399_000)).unwrap(), 86_399_000);
        assert_eq!(decode(&encode(DAY_MS)).unwrap(), DAY_MS);
        assert_eq!(decode(&encode(90_000_000)).unwrap(), 90_000_000);
    }
}
