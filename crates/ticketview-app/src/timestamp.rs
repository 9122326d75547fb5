// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;
use time::macros::{format_description, offset};
use time::{PrimitiveDateTime, UtcOffset};

/// Singapore time. No daylight saving, so a fixed offset is exact.
pub const DISPLAY_OFFSET: UtcOffset = offset!(+8);

/// Length of every string produced by [`normalize_timestamp`].
pub const DISPLAY_TIMESTAMP_LEN: usize = 19;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("timestamp {input:?} is not a UTC time of the form YYYY-MM-DDTHH:MM:SSZ")]
pub struct FormatError {
    input: String,
}

impl FormatError {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Converts an API timestamp such as `2021-11-25T21:35:43Z` into the table
/// form `26 Nov 2021 05:35AM`, shifted to [`DISPLAY_OFFSET`].
pub fn normalize_timestamp(raw: &str) -> Result<String, FormatError> {
    let parsed = PrimitiveDateTime::parse(
        raw,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z"),
    )
    .map_err(|_| FormatError::new(raw))?;

    let local = parsed
        .assume_utc()
        .checked_to_offset(DISPLAY_OFFSET)
        .ok_or_else(|| FormatError::new(raw))?;

    local
        .format(format_description!(
            "[day] [month repr:short] [year] [hour repr:12]:[minute][period]"
        ))
        .map_err(|_| FormatError::new(raw))
}
