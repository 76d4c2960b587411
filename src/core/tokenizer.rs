/// Split a row into its whitespace-separated tokens, preserving order.
pub fn tokenize(row: &str) -> Vec<&str> {
    row.split_whitespace().collect()
}
