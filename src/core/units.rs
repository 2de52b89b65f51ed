pub const MONTHS_PER_YEAR: usize = 12;
pub const DAYS_IN_MONTH: [u32; MONTHS_PER_YEAR] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Zero-based index into per-month arrays for a calendar month numbered 1-12.
pub fn month_index(month: u32) -> Option<usize> {
    match month {
        1..=12 => Some(month as usize - 1),
        _ => None,
    }
}

/// The most days a facility can be occupied in the given month, allowing for a leap February.
pub fn max_days_in_month(month: u32) -> Option<u32> {
    month_index(month).map(|idx| match idx {
        1 => DAYS_IN_MONTH[idx] + 1,
        _ => DAYS_IN_MONTH[idx],
    })
}
