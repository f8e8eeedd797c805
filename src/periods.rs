use chrono::Month;

/// Indonesian month names and the abbreviations that appear in imported
/// spreadsheets. English names are recognized through `chrono::Month`.
const INDONESIAN_MONTHS: [&str; 12] = [
    "januari", "februari", "maret", "april", "mei", "juni", "juli", "agustus", "september",
    "oktober", "november", "desember",
];

const INDONESIAN_ABBREVIATIONS: [&str; 13] = [
    "jan", "feb", "mar", "apr", "mei", "jun", "jul", "agu", "ags", "sep", "okt", "nov", "des",
];

/// Whether a header cell names a reporting period. Headers like
/// "Jan 2021" or "Desember" both count: only the first whitespace-separated
/// token is matched.
pub fn is_period_name(name: &str) -> bool {
    let token = match name.split_whitespace().next() {
        Some(t) => t,
        None => return false,
    };

    if token.parse::<Month>().is_ok() {
        return true;
    }

    let lowered = token.to_lowercase();
    INDONESIAN_MONTHS.contains(&lowered.as_str())
        || INDONESIAN_ABBREVIATIONS.contains(&lowered.as_str())
}

/// Index of the first header column that names a period, scanning left to
/// right. Label columns are everything before it.
pub fn find_period_start(header: &[String]) -> Option<usize> {
    header.iter().position(|name| is_period_name(name))
}
