//! Core data model types for gradesheet.
//!
//! A [`Document`] is an ordered list of [`Category`] values, each holding
//! [`Deduction`] items, plus the free-text blocks interleaved between them and
//! the grader's notes. The last category is the "no submission" sentinel.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{SheetError, SheetResult};

/// Position of one checkbox in a document.
///
/// For a single-toggle deduction the implicit toggle is criterion 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coordinate {
    pub category: usize,
    pub deduction: usize,
    pub criterion: usize,
}

impl Coordinate {
    pub fn new(category: usize, deduction: usize, criterion: usize) -> Self {
        Self {
            category,
            deduction,
            criterion,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.category, self.deduction, self.criterion)
    }
}

impl FromStr for Coordinate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.len() != 3 {
            return Err(format!(
                "invalid coordinate '{s}': expected CATEGORY:DEDUCTION:CRITERION"
            ));
        }
        let index = |p: &str| {
            p.trim()
                .parse::<usize>()
                .map_err(|_| format!("invalid coordinate '{s}': '{p}' is not an index"))
        };
        Ok(Coordinate::new(
            index(parts[0])?,
            index(parts[1])?,
            index(parts[2])?,
        ))
    }
}

/// Free text shown before the category at index `precedes`.
///
/// May contain `%t` (running total) and `%m` (maximum points) placeholders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub text: String,
    pub precedes: usize,
}

/// One selectable option of a multi-choice deduction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Criterion {
    pub label: String,
    pub checked: bool,
}

/// A penalty item, either a single toggle or backed by several criteria.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deduction {
    label: String,
    /// Penalty by number of checked criteria; position 1 is stored at index 0.
    mapping: Vec<f64>,
    criteria: Vec<Criterion>,
    /// Checked state of a deduction without criteria.
    toggled: bool,
    /// Value last added to the running total.
    pub(crate) recorded: f64,
}

impl Deduction {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            mapping: Vec::new(),
            criteria: Vec::new(),
            toggled: false,
            recorded: 0.0,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn mapping(&self) -> &[f64] {
        &self.mapping
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn recorded(&self) -> f64 {
        self.recorded
    }

    /// A deduction without criteria behaves as one checkbox.
    pub fn is_single_toggle(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Number of checked boxes; the implicit toggle counts as one box.
    pub fn checked_count(&self) -> usize {
        if self.is_single_toggle() {
            usize::from(self.toggled)
        } else {
            self.criteria.iter().filter(|c| c.checked).count()
        }
    }

    /// State written as the `DED` flag of a save file.
    ///
    /// For multi-choice deductions this mirrors the first criterion and is not
    /// read back for scoring.
    pub fn flag(&self) -> bool {
        match self.criteria.first() {
            Some(first) => first.checked,
            None => self.toggled,
        }
    }

    /// Set the magnitude for `position` checked boxes (one-based).
    ///
    /// Positions past the end extend the mapping; the new intermediate slots
    /// repeat the previous last magnitude, or 0 for an empty mapping.
    pub fn set_mapping(&mut self, position: usize, magnitude: f64) -> SheetResult<()> {
        if position == 0 {
            return Err(SheetError::InvalidMappingPosition(position));
        }
        let index = position - 1;
        if index >= self.mapping.len() {
            let fill = self.mapping.last().copied().unwrap_or(0.0);
            self.mapping.resize(index + 1, fill);
        }
        self.mapping[index] = magnitude;
        Ok(())
    }

    /// Append an unchecked criterion and return its index.
    pub fn add_criterion(&mut self, label: impl Into<String>) -> usize {
        self.criteria.push(Criterion {
            label: label.into(),
            checked: false,
        });
        self.criteria.len() - 1
    }

    /// Set one box and return its previous state, or `None` if it does not exist.
    pub(crate) fn set_box(&mut self, criterion: usize, checked: bool) -> Option<bool> {
        if self.is_single_toggle() {
            if criterion != 0 {
                return None;
            }
            Some(std::mem::replace(&mut self.toggled, checked))
        } else {
            let c = self.criteria.get_mut(criterion)?;
            Some(std::mem::replace(&mut c.checked, checked))
        }
    }
}

/// A graded dimension with a point ceiling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub label: String,
    pub value: f64,
    deductions: Vec<Deduction>,
}

impl Category {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            deductions: Vec::new(),
        }
    }

    pub fn deductions(&self) -> &[Deduction] {
        &self.deductions
    }

    /// Append a deduction and return its index.
    pub fn add_deduction(&mut self, deduction: Deduction) -> usize {
        self.deductions.push(deduction);
        self.deductions.len() - 1
    }

    pub(crate) fn deductions_mut(&mut self) -> &mut [Deduction] {
        &mut self.deductions
    }
}

/// A complete score sheet for one graded subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    categories: Vec<Category>,
    blocks: Vec<TextBlock>,
    notes: String,
    pub(crate) total_points: f64,
    pub(crate) maximum_points: f64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub(crate) fn categories_mut(&mut self) -> &mut [Category] {
        &mut self.categories
    }

    pub fn text_blocks(&self) -> &[TextBlock] {
        &self.blocks
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn total_points(&self) -> f64 {
        self.total_points
    }

    pub fn maximum_points(&self) -> f64 {
        self.maximum_points
    }

    /// Append a category and return its index.
    pub fn add_category(&mut self, category: Category) -> usize {
        self.categories.push(category);
        self.categories.len() - 1
    }

    /// Append a deduction to an existing category and return its index.
    pub fn add_deduction_to_category(
        &mut self,
        category: usize,
        deduction: Deduction,
    ) -> SheetResult<usize> {
        self.categories
            .get_mut(category)
            .map(|c| c.add_deduction(deduction))
            .ok_or(SheetError::NoSuchCategory(category))
    }

    /// Append an unchecked criterion to an existing deduction and return its index.
    pub fn add_criterion_to_deduction(
        &mut self,
        category: usize,
        deduction: usize,
        label: impl Into<String>,
    ) -> SheetResult<usize> {
        let ded = self.deduction_mut(Coordinate::new(category, deduction, 0))?;
        Ok(ded.add_criterion(label))
    }

    /// Append a text block positioned before the next category to be added.
    pub fn add_text_block(&mut self, text: impl Into<String>) {
        self.blocks.push(TextBlock {
            text: text.into(),
            precedes: self.categories.len(),
        });
    }

    /// Set one checkbox without touching the running total.
    ///
    /// Returns the previous state. Callers that need the total kept in step
    /// use [`Document::toggle_criterion`].
    pub fn set_criterion_state(&mut self, at: Coordinate, checked: bool) -> SheetResult<bool> {
        self.deduction_mut(at)?
            .set_box(at.criterion, checked)
            .ok_or(SheetError::NoSuchCoordinate { coordinate: at })
    }

    /// Deduction at `at.category`/`at.deduction`; the criterion index is ignored.
    pub fn deduction(&self, at: Coordinate) -> Option<&Deduction> {
        self.categories
            .get(at.category)?
            .deductions
            .get(at.deduction)
    }

    pub(crate) fn deduction_mut(&mut self, at: Coordinate) -> SheetResult<&mut Deduction> {
        self.categories
            .get_mut(at.category)
            .and_then(|c| c.deductions.get_mut(at.deduction))
            .ok_or(SheetError::NoSuchCoordinate { coordinate: at })
    }

    pub fn deduction_count(&self) -> usize {
        self.categories.iter().map(|c| c.deductions.len()).sum()
    }

    /// Recompute the maximum as the sum of every category but the sentinel.
    pub fn recompute_maximum(&mut self) {
        let graded = self.categories.len().saturating_sub(1);
        self.maximum_points = self.categories[..graded].iter().map(|c| c.value).sum();
    }

    /// The trailing "no submission" category.
    pub fn sentinel(&self) -> Option<&Category> {
        self.categories.last()
    }

    /// Categories that count towards the maximum and appear in the report.
    pub fn graded_categories(&self) -> &[Category] {
        let graded = self.categories.len().saturating_sub(1);
        &self.categories[..graded]
    }

    /// Whether the sentinel's deduction is checked.
    pub fn is_no_submission(&self) -> bool {
        self.sentinel()
            .and_then(|c| c.deductions.first())
            .is_some_and(|d| d.checked_count() > 0)
    }
}
