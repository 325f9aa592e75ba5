use crate::cmd::convert::Conversion;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use linkexplain::api::Explanation;
use linkexplain::diff::{value_text, DiffOperation, ValueDiff};
use linkexplain::records::FieldComparison;
use linkexplain::scorer::WaterfallRow;
use linkexplain::summary::{format_error_rate, format_match_probability};
use strum::IntoEnumIterator;

pub fn print_explanation(explanation: &Explanation) {
    println!("\n{}", explanation.headline.text);
    print_waterfall(&explanation.waterfall);
    if !explanation.comparisons.is_empty() {
        print_comparison(&explanation.comparisons);
    }
}

pub fn print_waterfall(rows: &[WaterfallRow]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Gamma"),
        Cell::new("TF"),
        Cell::new("Bayes factor"),
        Cell::new("log2(BF)").fg(Color::Cyan),
        Cell::new("Cumulative"),
    ]);

    for i in [0, 4, 5, 6] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let mut running = 0.0;
    for row in rows {
        // Prior and final bars are absolute; everything between accumulates.
        if row.is_increment() {
            running += row.log2_bayes_factor;
        } else {
            running = row.log2_bayes_factor;
        }

        let weight_color = if !row.is_increment() {
            Color::Cyan
        } else if row.log2_bayes_factor > 0.0 {
            Color::Green
        } else if row.log2_bayes_factor < 0.0 {
            Color::Red
        } else {
            Color::Reset
        };

        table.add_row(vec![
            Cell::new(row.bar_sort_order),
            Cell::new(&row.column_name).add_attribute(if row.is_increment() {
                Attribute::NormalIntensity
            } else {
                Attribute::Bold
            }),
            Cell::new(
                row.comparison_vector_value
                    .as_ref()
                    .map(value_text)
                    .unwrap_or_default(),
            ),
            Cell::new(match row.term_frequency_adjustment {
                Some(true) => "yes",
                Some(false) => "no",
                None => "",
            }),
            Cell::new(format!("{:.4}", row.bayes_factor)),
            Cell::new(format!("{:+.4}", row.log2_bayes_factor)).fg(weight_color),
            Cell::new(format!("{:.4}", running)),
        ]);
    }
    println!("{}", table);
}

pub fn print_comparison(comparisons: &[FieldComparison]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("")];
    header.extend(
        comparisons
            .iter()
            .map(|c| Cell::new(&c.field).add_attribute(Attribute::Bold)),
    );
    table.set_header(header);

    let mut left = vec![Cell::new("Left Record")];
    left.extend(comparisons.iter().map(|c| Cell::new(&c.left_value)));
    table.add_row(left);

    let mut right = vec![Cell::new("Right Record")];
    right.extend(comparisons.iter().map(|c| Cell::new(&c.right_value)));
    table.add_row(right);

    let mut diff = vec![Cell::new("Diff").fg(Color::Yellow)];
    diff.extend(comparisons.iter().map(|c| Cell::new(c.diff.to_plain())));
    table.add_row(diff);

    println!("{}", table);
}

pub fn print_value_diff(left: &str, right: &str, diff: &ValueDiff) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new("Operation").add_attribute(Attribute::Bold),
        Cell::new("Text").add_attribute(Attribute::Bold),
    ]);

    for seg in &diff.segments {
        let color = match seg.operation {
            DiffOperation::Added => Color::Green,
            DiffOperation::Removed => Color::Red,
            DiffOperation::Unchanged => Color::Reset,
        };
        table.add_row(vec![
            Cell::new(seg.operation).fg(color),
            Cell::new(format!("{:?}", seg.text)),
        ]);
    }

    println!("left:  {}\nright: {}", left, right);
    if diff.is_empty() {
        println!("(no difference)");
    } else {
        println!("{} diff: {}", diff.kind, diff.to_plain());
        println!("{}", table);
        let legend: Vec<String> = DiffOperation::iter()
            .filter(|op| *op != DiffOperation::Unchanged)
            .map(|op| {
                let (open, close) = op.plain_markers();
                format!("{}{}{}", open, op, close)
            })
            .collect();
        println!("legend: {}", legend.join(" "));
    }
}

pub fn print_conversion(c: &Conversion) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new("Representation").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Probability"),
        Cell::new(format!("{} ({})", c.probability, format_match_probability(c.probability))),
    ]);
    table.add_row(vec![Cell::new("Bayes factor"), Cell::new(c.bayes_factor)]);
    table.add_row(vec![
        Cell::new("Match weight (log2)"),
        Cell::new(format!("{:.4}", c.match_weight)).fg(Color::Cyan),
    ]);
    table.add_row(vec![Cell::new("Error"), Cell::new(format_error_rate(c.probability))]);
    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    println!("{}", table);
}
