// file: src/models/query.rs
// description: search query extraction from keyword generation output
// reference: comma separated keyword lists

/// Delimiter between keywords in the keyword stage output.
pub const QUERY_DELIMITER: char = ',';

/// Splits generated keyword text into trimmed, non-empty queries, keeping order.
pub fn parse_queries(raw: &str) -> Vec<String> {
    raw.split(QUERY_DELIMITER)
        .map(str::trim)
        .filter(|query| !query.is_empty())
        .map(str::to_string)
        .collect()
}
