//! Incremental score computation.
//!
//! Deductions are stored as non-positive magnitudes and added to the sheet's
//! maximum. Each deduction remembers the value it last contributed, so a
//! toggle only has to swap that one contribution in the running total.

use crate::error::{SheetError, SheetResult};
use crate::model::{Coordinate, Deduction, Document};

/// Current value of a deduction given its checked boxes.
///
/// With `n` boxes checked the value is the mapping entry for position `n`,
/// saturating at the last entry. No boxes checked is always 0.
pub fn deduction_value(deduction: &Deduction) -> SheetResult<f64> {
    let checked = deduction.checked_count();
    if checked == 0 {
        return Ok(0.0);
    }
    let mapping = deduction.mapping();
    let last = mapping
        .len()
        .checked_sub(1)
        .ok_or_else(|| SheetError::EmptyMapping {
            label: deduction.label().to_string(),
        })?;
    Ok(mapping[(checked - 1).min(last)])
}

/// Replace the deduction's previous contribution to `total` with its current one.
///
/// On error neither the deduction nor `total` is modified.
pub fn update_total(deduction: &mut Deduction, total: &mut f64) -> SheetResult<()> {
    let value = deduction_value(deduction)?;
    *total -= deduction.recorded;
    deduction.recorded = value;
    *total += value;
    Ok(())
}

impl Document {
    /// Rebuild the running total from the maximum and every deduction's state.
    pub fn reset_totals(&mut self) -> SheetResult<f64> {
        // Validate first so a bad deduction leaves every recorded value as it was.
        for deduction in self.categories().iter().flat_map(|c| c.deductions()) {
            deduction_value(deduction)?;
        }

        let mut total = self.maximum_points;
        for category in self.categories_mut() {
            for deduction in category.deductions_mut() {
                deduction.recorded = 0.0;
                update_total(deduction, &mut total)?;
            }
        }
        self.total_points = total;
        Ok(total)
    }

    /// Apply one checkbox event and return the new running total.
    pub fn toggle_criterion(&mut self, at: Coordinate, checked: bool) -> SheetResult<f64> {
        let previous = self.set_criterion_state(at, checked)?;

        let mut total = self.total_points;
        let updated = update_total(self.deduction_mut(at)?, &mut total);
        if let Err(e) = updated {
            self.set_criterion_state(at, previous)?;
            return Err(e);
        }
        self.total_points = total;

        tracing::debug!(%at, checked, total, "criterion toggled");
        Ok(total)
    }

    /// Sum of every deduction's recorded contribution.
    pub fn recorded_sum(&self) -> f64 {
        self.categories()
            .iter()
            .flat_map(|c| c.deductions())
            .map(Deduction::recorded)
            .sum()
    }
}
