//! Turns recurring obligations into month-equivalent amounts and dated virtual
//! instances.

use chrono::{Duration, NaiveDate};

use crate::ledger::{
    calendar::{self, MonthStarts},
    CategoryId, LedgerEvent, ObligationDefinition, PeriodUnit,
};

/// Stateless helpers over a single [`ObligationDefinition`].
pub struct ObligationAmortizer;

impl ObligationAmortizer {
    /// Obligation amount rescaled to a one-month equivalent.
    pub fn normalized_monthly_amount(obligation: &ObligationDefinition) -> f64 {
        obligation.normalized_amount()
    }

    /// An obligation is active from its start date up to, but excluding, its end date.
    pub fn is_active_at(obligation: &ObligationDefinition, date: NaiveDate) -> bool {
        obligation.start_date() <= date && obligation.end_date().map_or(true, |end| date < end)
    }

    /// Whether the obligation is active on at least one day of `[from, through]`.
    pub fn is_active_between(
        obligation: &ObligationDefinition,
        from: NaiveDate,
        through: NaiveDate,
    ) -> bool {
        obligation.start_date() <= through && obligation.end_date().map_or(true, |end| from < end)
    }

    /// One synthetic outflow per calendar month from the start month through
    /// the month of `min(end_date, up_to)`, dated on the first of the month.
    pub fn individual_instances(
        obligation: &ObligationDefinition,
        up_to: NaiveDate,
    ) -> ObligationInstances {
        let last = obligation.end_date().map_or(up_to, |end| end.min(up_to));
        let months = if obligation.start_date() > up_to {
            None
        } else {
            Some(MonthStarts::new(obligation.start_date(), last))
        };
        ObligationInstances {
            months,
            amount: obligation.normalized_amount(),
            category_id: obligation.category_id(),
        }
    }

    /// Total paid so far: `amount * (whole periods elapsed + 1)`, counting the
    /// starting period. Nothing is owed before the start date.
    pub fn total_amount_spent(obligation: &ObligationDefinition, as_of: NaiveDate) -> f64 {
        let start = obligation.start_date();
        let until = obligation.end_date().map_or(as_of, |end| end.min(as_of));
        if until < start {
            return 0.0;
        }
        let periods = match obligation.cycle().period_unit() {
            PeriodUnit::Months(every) => {
                calendar::whole_months_elapsed(start, until) as i64 / every as i64
            }
            PeriodUnit::Years(every) => {
                calendar::whole_years_elapsed(start, until) as i64 / every as i64
            }
            PeriodUnit::Days(every) => (until - start).num_days() / every as i64,
        };
        obligation.amount() * (periods as f64 + 1.0)
    }

    /// First billing date on or after `as_of` while the obligation is still active.
    pub fn next_due_date(obligation: &ObligationDefinition, as_of: NaiveDate) -> Option<NaiveDate> {
        let start = obligation.start_date();
        let candidate = if as_of <= start {
            start
        } else {
            match obligation.cycle().period_unit() {
                PeriodUnit::Months(every) => {
                    let step = every as i32;
                    let mut k = calendar::months_between(start, as_of).div_euclid(step);
                    let mut due = calendar::shift_month(start, k * step);
                    while due < as_of {
                        k += 1;
                        due = calendar::shift_month(start, k * step);
                    }
                    due
                }
                PeriodUnit::Years(every) => {
                    let step = every as i32;
                    let mut k = calendar::whole_years_elapsed(start, as_of) / step;
                    let mut due = calendar::shift_year(start, k * step);
                    while due < as_of {
                        k += 1;
                        due = calendar::shift_year(start, k * step);
                    }
                    due
                }
                PeriodUnit::Days(every) => {
                    let step = every as i64;
                    let elapsed = (as_of - start).num_days();
                    let k = (elapsed + step - 1) / step;
                    start + Duration::days(k * step)
                }
            }
        };
        Self::is_active_at(obligation, candidate).then_some(candidate)
    }

    /// Sum of month-equivalent amounts for every obligation active on `date`.
    pub fn monthly_commitment(obligations: &[ObligationDefinition], date: NaiveDate) -> f64 {
        obligations
            .iter()
            .filter(|obligation| Self::is_active_at(obligation, date))
            .map(Self::normalized_monthly_amount)
            .sum()
    }
}

/// Lazy, restartable sequence of an obligation's virtual monthly instances.
#[derive(Debug, Clone)]
pub struct ObligationInstances {
    months: Option<MonthStarts>,
    amount: f64,
    category_id: Option<CategoryId>,
}

impl Iterator for ObligationInstances {
    type Item = LedgerEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let month = self.months.as_mut()?.next()?;
        Some(LedgerEvent::outflow(month, self.amount, self.category_id))
    }
}
