use crate::schema::Cell;

/// Markers that flag a line as an aggregate total rather than an individual
/// entry. The source data is Indonesian, where total lines read "Jumlah ...".
const TOTAL_MARKERS: [&str; 2] = ["total", "jumlah"];

pub fn is_total_label(label: &str) -> bool {
    let lowered = label.to_lowercase();
    TOTAL_MARKERS.iter().any(|m| lowered.contains(m))
}

/// Lenient numeric coercion for period cells. Missing, empty, or
/// unparseable cells resolve to 0.0, never to an error: stored reports
/// contain free-text artifacts and the displayed totals must not change
/// because one cell failed to parse.
pub fn lenient_number(cell: &Cell) -> f64 {
    match cell {
        Cell::Number(n) => *n,
        Cell::Empty => 0.0,
        Cell::Text(s) => lenient_number_str(s),
    }
}

pub fn lenient_number_str(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    normalize_decimal(trimmed).parse().unwrap_or(0.0)
}

/// Normalizes comma-decimal input ("50,5", "1.234,56") to a parseable
/// form. When a comma is present it is the decimal separator and any dots
/// are thousands separators; otherwise the text is left untouched.
fn normalize_decimal(text: &str) -> String {
    if text.contains(',') {
        text.replace('.', "").replace(',', ".")
    } else {
        text.to_string()
    }
}
