//! Payment date schedule generation.

use banksim_core::calendars::{BusinessDayConvention, CalendarKind};
use banksim_core::types::Frequency;
use banksim_core::{CoreResult, Date};

/// Stub placement rule for coupon date generation.
///
/// Forward steps from the start date and leaves any short stub at the
/// end; backward steps from the maturity date and leaves it at the
/// front, which is the treasury coupon convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateGeneration {
    /// Step from the start date; short final stub.
    Forward,
    /// Step from the end date; short front stub.
    #[default]
    Backward,
}

/// A generated sequence of coupon periods.
///
/// Period boundaries are unadjusted accrual dates; payment dates carry
/// the business day adjustment. The two line up index for index: the
/// payment for period `i` accrues over `unadjusted[i] .. unadjusted[i+1]`
/// and pays on `payment_dates[i]`.
#[derive(Debug, Clone)]
pub struct PeriodSchedule {
    /// Unadjusted period boundaries, first entry is the start date.
    pub unadjusted: Vec<Date>,
    /// Adjusted payment dates, one per period.
    pub payment_dates: Vec<Date>,
}

impl PeriodSchedule {
    /// Number of coupon periods.
    #[must_use]
    pub fn period_count(&self) -> usize {
        self.payment_dates.len()
    }
}

/// Generates coupon periods between `start` and `end` under the given
/// stub placement rule.
///
/// # Errors
///
/// Returns a `CoreError` if date arithmetic overflows or `end` does not
/// follow `start`.
pub fn generate(
    start: Date,
    end: Date,
    frequency: Frequency,
    generation: DateGeneration,
    calendar: CalendarKind,
    convention: BusinessDayConvention,
) -> CoreResult<PeriodSchedule> {
    match generation {
        DateGeneration::Forward => generate_forward(start, end, frequency, calendar, convention),
        DateGeneration::Backward => generate_backward(start, end, frequency, calendar, convention),
    }
}

/// Generates coupon periods forward from `start` to `end`.
///
/// Dates step by the frequency's period length from the start date, with
/// month-end clamping, and the final period ends exactly at `end` (a
/// short final stub when the span is not a whole number of periods).
/// Payment dates are the period ends adjusted per the calendar and
/// convention.
///
/// # Errors
///
/// Returns a `CoreError` if date arithmetic overflows or `end` does not
/// follow `start`.
pub fn generate_forward(
    start: Date,
    end: Date,
    frequency: Frequency,
    calendar: CalendarKind,
    convention: BusinessDayConvention,
) -> CoreResult<PeriodSchedule> {
    if end <= start {
        return Err(banksim_core::CoreError::invalid_cash_flow(format!(
            "schedule end {end} does not follow start {start}"
        )));
    }

    let step = frequency.months_per_period() as i32;
    let mut unadjusted = vec![start];
    let mut k = 1;
    loop {
        let d = start.add_months(step * k)?;
        if d >= end {
            break;
        }
        unadjusted.push(d);
        k += 1;
    }
    unadjusted.push(end);

    let cal = calendar.calendar();
    let payment_dates = unadjusted[1..]
        .iter()
        .map(|&d| cal.adjust(d, convention))
        .collect();

    Ok(PeriodSchedule {
        unadjusted,
        payment_dates,
    })
}

/// Generates coupon periods backward from `end` to `start`.
///
/// Dates step back by the frequency's period length from the end date,
/// with month-end clamping, and the first period starts exactly at
/// `start` (a short front stub when the span is not a whole number of
/// periods). Payment dates are the period ends adjusted per the
/// calendar and convention.
///
/// # Errors
///
/// Returns a `CoreError` if date arithmetic overflows or `end` does not
/// follow `start`.
pub fn generate_backward(
    start: Date,
    end: Date,
    frequency: Frequency,
    calendar: CalendarKind,
    convention: BusinessDayConvention,
) -> CoreResult<PeriodSchedule> {
    if end <= start {
        return Err(banksim_core::CoreError::invalid_cash_flow(format!(
            "schedule end {end} does not follow start {start}"
        )));
    }

    let step = frequency.months_per_period() as i32;
    let mut reversed = vec![end];
    let mut k = 1;
    loop {
        let d = end.add_months(-step * k)?;
        if d <= start {
            break;
        }
        reversed.push(d);
        k += 1;
    }
    reversed.push(start);
    reversed.reverse();
    let unadjusted = reversed;

    let cal = calendar.calendar();
    let payment_dates = unadjusted[1..]
        .iter()
        .map(|&d| cal.adjust(d, convention))
        .collect();

    Ok(PeriodSchedule {
        unadjusted,
        payment_dates,
    })
}
