//! Line tokenizer for delimited text.

/// Splits one line into trimmed fields.
///
/// Every `"` toggles the in-quotes state and is not emitted, so a doubled
/// quote inside a quoted field produces nothing. The delimiter only splits
/// outside quotes.
pub fn split_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    fields.push(current.trim().to_string());
    fields
}
