//! Score-sheet grammar parser.
//!
//! Blank rubric templates and previously saved sheets share one line-oriented
//! grammar:
//!
//! ```text
//! CAT [10] Style
//! 	DED [O] [-2, -5] Formatting
//! 		CRT [X] Indentation
//! STR Total: %t / %m
//! NOTES
//! free text to end of input
//! ```
//!
//! Checkbox states found while reading are queued and replayed once the whole
//! document exists, then the running total is rebuilt from scratch.

use std::path::Path;

use crate::error::{SheetError, SheetResult};
use crate::model::{Category, Coordinate, Deduction, Document};

/// Parse a blank rubric template.
pub fn load_template(content: &str) -> SheetResult<Document> {
    let doc = parse_sheet(content)?;
    let checked = doc
        .categories()
        .iter()
        .flat_map(|c| c.deductions())
        .filter(|d| d.checked_count() > 0)
        .count();
    if checked > 0 {
        tracing::warn!("template has {checked} deduction(s) already applied");
    }
    Ok(doc)
}

/// Parse a previously saved sheet, restoring its checkbox states and notes.
pub fn load_saved_sheet(content: &str) -> SheetResult<Document> {
    let doc = parse_sheet(content)?;
    tracing::debug!(
        total = doc.total_points(),
        maximum = doc.maximum_points(),
        "restored saved sheet"
    );
    Ok(doc)
}

/// Read and parse a template or saved sheet from disk.
pub fn load_sheet_file(path: &Path) -> SheetResult<Document> {
    let content = std::fs::read_to_string(path).map_err(|source| SheetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_sheet(&content)
}

/// Parse sheet text into a fully scored [`Document`].
pub fn parse_sheet(content: &str) -> SheetResult<Document> {
    let mut parser = SheetParser::default();
    let mut offset = 0;

    for (index, raw) in content.split_inclusive('\n').enumerate() {
        offset += raw.len();
        let number = index + 1;
        let line = raw.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }

        let body = line.trim_start_matches('\t');
        let indented = body.len() != line.len();
        match body.chars().next() {
            Some('C') if !indented => parser.category(body, number)?,
            Some('S') if !indented => parser.text_block(body),
            Some('D') => parser.deduction(body, number)?,
            Some('C') => parser.criterion(body, number)?,
            Some('N') => {
                parser.doc.set_notes(&content[offset..]);
                break;
            }
            _ => {
                return Err(SheetError::grammar(
                    number,
                    format!("unrecognized line '{line}'"),
                ))
            }
        }
    }

    parser.finish()
}

#[derive(Default)]
struct SheetParser {
    doc: Document,
    category: Option<Category>,
    deduction: Option<(Deduction, bool)>,
    replay: Vec<Coordinate>,
}

impl SheetParser {
    fn category(&mut self, body: &str, line: usize) -> SheetResult<()> {
        let rest = body
            .strip_prefix("CAT")
            .ok_or_else(|| SheetError::grammar(line, "expected CAT"))?;
        self.flush_category();

        let (value, rest) = bracketed(rest, line, "value")?;
        let value = number(value, line)?;
        self.category = Some(Category::new(label(rest), value));
        Ok(())
    }

    fn text_block(&mut self, body: &str) {
        self.flush_category();
        let text = body.strip_prefix("STR").unwrap_or(&body[1..]);
        self.doc
            .add_text_block(text.strip_prefix(' ').unwrap_or(text));
    }

    fn deduction(&mut self, body: &str, line: usize) -> SheetResult<()> {
        if self.category.is_none() {
            return Err(SheetError::grammar(line, "deduction outside of a category"));
        }
        self.flush_deduction();

        let rest = keyword(body);
        let (flag, rest) = bracketed(rest, line, "state")?;
        let flag = state(flag, line)?;
        let (magnitudes, rest) = bracketed(rest, line, "magnitudes")?;
        if magnitudes.trim().is_empty() {
            return Err(SheetError::grammar(line, "deduction has no magnitudes"));
        }

        let mut deduction = Deduction::new(label(rest));
        for (i, magnitude) in magnitudes.split(',').enumerate() {
            deduction
                .set_mapping(i + 1, number(magnitude, line)?)
                .map_err(|e| SheetError::grammar(line, e.to_string()))?;
        }
        self.deduction = Some((deduction, flag));
        Ok(())
    }

    fn criterion(&mut self, body: &str, line: usize) -> SheetResult<()> {
        let (Some(category), Some((deduction, _))) = (&self.category, &mut self.deduction) else {
            return Err(SheetError::grammar(line, "criterion outside of a deduction"));
        };

        let (flag, rest) = bracketed(keyword(body), line, "state")?;
        if state(flag, line)? {
            self.replay.push(Coordinate::new(
                self.doc.categories().len(),
                category.deductions().len(),
                deduction.criteria().len(),
            ));
        }
        deduction.add_criterion(label(rest));
        Ok(())
    }

    fn flush_deduction(&mut self) {
        let (Some(category), Some((deduction, flag))) = (&mut self.category, self.deduction.take())
        else {
            return;
        };
        // The DED flag only carries state for single-toggle deductions.
        if flag && deduction.is_single_toggle() {
            self.replay.push(Coordinate::new(
                self.doc.categories().len(),
                category.deductions().len(),
                0,
            ));
        }
        category.add_deduction(deduction);
    }

    fn flush_category(&mut self) {
        self.flush_deduction();
        if let Some(category) = self.category.take() {
            self.doc.add_category(category);
        }
    }

    fn finish(mut self) -> SheetResult<Document> {
        self.flush_category();
        if self.doc.categories().is_empty() {
            return Err(SheetError::grammar(0, "score sheet has no categories"));
        }

        self.doc.recompute_maximum();
        for at in &self.replay {
            self.doc.set_criterion_state(*at, true)?;
        }
        self.doc.reset_totals()?;

        tracing::debug!(
            categories = self.doc.categories().len(),
            deductions = self.doc.deduction_count(),
            replayed = self.replay.len(),
            "parsed score sheet"
        );
        Ok(self.doc)
    }
}

/// Skip the line keyword (`DED`, `CRT`, ...).
fn keyword(body: &str) -> &str {
    body.trim_start_matches(|c: char| c.is_ascii_alphabetic())
}

/// Split `[inner] rest` off the front of `s`.
fn bracketed<'a>(s: &'a str, line: usize, field: &str) -> SheetResult<(&'a str, &'a str)> {
    let missing = || SheetError::grammar(line, format!("missing [{field}] field"));
    let inner = s.trim_start_matches(' ').strip_prefix('[').ok_or_else(missing)?;
    let end = inner.find(']').ok_or_else(missing)?;
    Ok((&inner[..end], &inner[end + 1..]))
}

/// Labels follow the last field after exactly one space.
fn label(rest: &str) -> &str {
    rest.strip_prefix(' ').unwrap_or(rest)
}

fn number(s: &str, line: usize) -> SheetResult<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SheetError::grammar(line, format!("invalid number '{}'", s.trim())))
}

fn state(s: &str, line: usize) -> SheetResult<bool> {
    match s.trim() {
        "X" => Ok(true),
        "O" => Ok(false),
        other => Err(SheetError::grammar(
            line,
            format!("invalid state '{other}', expected X or O"),
        )),
    }
}
