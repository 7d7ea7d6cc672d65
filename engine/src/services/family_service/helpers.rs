// Helper functions shared by the family_service handlers
use crate::error::EngineError;

/// Maps a CSV ledger failure onto the engine error taxonomy, keeping I/O and
/// CSV system errors distinguishable from bad row content.
pub fn from_ledger_error(err: anyhow::Error) -> EngineError {
    let err = match err.downcast::<std::io::Error>() {
        Ok(io) => return EngineError::from(io),
        Err(err) => err,
    };
    match err.downcast::<csv::Error>() {
        Ok(csv_err) => EngineError::from(csv_err),
        Err(err) => EngineError::CsvDataFormatError(format!("{:#}", err)),
    }
}

/// `"あと12日"`, or how far past the deadline the project is.
pub fn days_left_text(days: i64) -> String {
    if days >= 0 {
        format!("あと{}日", days)
    } else {
        format!("{}日超過", -days)
    }
}
