use calamine::Data;

/// Render a spreadsheet cell as trimmed text.
///
/// Whole floats drop their fraction so a numeric answer such as `3` does not read
/// back as `3.0`. Error cells count as blank.
pub(crate) fn cell_text(cell: &Data) -> String {
    let text = match cell {
        Data::Empty | Data::Error(_) => return String::new(),
        Data::String(value) => value.clone(),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{value:.0}")
        }
        other => other.to_string(),
    };
    text.trim().to_string()
}
