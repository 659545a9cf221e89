//! Lossless save-file serializer.
//!
//! The save file uses the same grammar the parser reads, with every checkbox
//! state written out and the notes appended after a `NOTES` marker. Text
//! blocks are written raw; placeholders are only filled in by the report.

use crate::model::{Deduction, Document};

/// Render the re-parseable save file for a document.
///
/// Reparsing the output reproduces the document when every deduction has at
/// least one magnitude and no label, criterion or text block contains a line
/// break. Documents produced by the parser always qualify. A document built
/// by hand that breaks either rule is still rendered, but the parser rejects
/// the result rather than guessing.
pub fn render_save_file(doc: &Document) -> String {
    let mut out = String::new();
    let blocks = doc.text_blocks();
    let mut next = 0;

    for (i, category) in doc.categories().iter().enumerate() {
        while next < blocks.len() && blocks[next].precedes <= i {
            out.push_str(&format!("STR {}\n", blocks[next].text));
            next += 1;
        }
        out.push_str(&format!("CAT [{}] {}\n", category.value, category.label));
        for deduction in category.deductions() {
            push_deduction(&mut out, deduction);
        }
    }

    for block in &blocks[next..] {
        out.push_str(&format!("STR {}\n", block.text));
    }

    out.push_str("\nNOTES\n");
    out.push_str(doc.notes());
    out
}

fn push_deduction(out: &mut String, deduction: &Deduction) {
    let mapping = deduction
        .mapping()
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    out.push_str(&format!(
        "\tDED [{}] [{}] {}\n",
        flag(deduction.flag()),
        mapping,
        deduction.label()
    ));
    for criterion in deduction.criteria() {
        out.push_str(&format!(
            "\t\tCRT [{}] {}\n",
            flag(criterion.checked),
            criterion.label
        ));
    }
}

fn flag(checked: bool) -> char {
    if checked {
        'X'
    } else {
        'O'
    }
}
