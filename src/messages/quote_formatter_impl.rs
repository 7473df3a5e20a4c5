use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::message_formatter::MessageFormatter;

/// A `"`, the shortest run of non-quote characters, then the closing `"`.
static QUOTED_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]*)""#).expect("invalid quoted span regex"));

/// Removes every `*` that sits inside a pair of double quotes.
///
/// Quotes pair up left to right; an unmatched trailing `"` and whatever
/// follows it are copied through as is.
pub fn remove_asterisks_from_quotes(text: &str) -> String {
    QUOTED_SPAN
        .replace_all(text, |caps: &Captures| {
            format!("\"{}\"", caps[1].replace('*', ""))
        })
        .into_owned()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct QuoteFormatterImpl {}

impl MessageFormatter for QuoteFormatterImpl {
    fn format(&self, message: &str) -> String {
        remove_asterisks_from_quotes(message)
    }
}
