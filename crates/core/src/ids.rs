//! Parsing of comma-separated id filters such as `?tags=1,2,3`.

use crate::error::CoreError;
use crate::types::DbId;

/// Parse `"1, 2,3"` into `[1, 2, 3]`. Empty segments are skipped.
pub fn parse_id_list(raw: &str) -> Result<Vec<DbId>, CoreError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<DbId>()
                .map_err(|_| CoreError::Validation(format!("'{s}' is not a valid id")))
        })
        .collect()
}
