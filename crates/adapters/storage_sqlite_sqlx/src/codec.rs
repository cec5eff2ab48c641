//! Column encoding shared by the repositories.

use chrono::SecondsFormat;

use smarthome_domain::time::Timestamp;

/// Fixed-width UTC form, e.g. `2024-03-01T10:00:00.000000000Z`.
///
/// Every value has the same length, so comparing the text compares the instants.
pub(crate) fn encode_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn decode_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.to_utc())
        .map_err(decode_error)
}

/// Wrap a conversion failure as a sqlx decode error.
pub(crate) fn decode_error<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}
