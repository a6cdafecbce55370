use crate::error::{AttendanceError, WORKED_EXCEEDS_WORKING, WORKING_EXCEEDS_TOTAL};

/// Figures declared by an employee for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyFigures {
    pub month: u32,
    pub year: i32,
    pub total_days: u32,
    pub total_working_days: u32,
    pub worked_days: u32,
}

/// Checks `worked_days <= total_working_days <= total_days`, first failure wins.
///
/// Weekly reconciliation does not go through here: it caps an oversized
/// request instead of rejecting it.
pub fn validate_monthly(figures: &MonthlyFigures) -> Result<(), AttendanceError> {
    if !(1..=12).contains(&figures.month) {
        return Err(AttendanceError::validation("Month must be between 1 and 12"));
    }

    if figures.worked_days > figures.total_working_days {
        return Err(AttendanceError::validation(WORKED_EXCEEDS_WORKING));
    }

    if figures.total_working_days > figures.total_days {
        return Err(AttendanceError::validation(WORKING_EXCEEDS_TOTAL));
    }

    Ok(())
}
