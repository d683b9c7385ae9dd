//! Query string tokenizer.

/// Sentinel appended to every token stream.
pub const END_TOKEN: &str = "END";

/// Splits a query string into tokens.
///
/// Parentheses always become standalone tokens; everything else is split on
/// whitespace. The stream is terminated by [`END_TOKEN`], so an empty input
/// yields `["END"]`. Tokens are returned verbatim; keyword matching is the
/// parser's job.
pub fn tokenize(input: &str) -> Vec<String> {
    let spaced = input.replace('(', " ( ").replace(')', " ) ");
    spaced
        .split_whitespace()
        .map(str::to_string)
        .chain(std::iter::once(END_TOKEN.to_string()))
        .collect()
}
