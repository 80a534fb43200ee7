//! Font catalog browsing.

use brandkit_fonts::{FontCategory, catalog, fonts_by_category, pairings, search_fonts};

use crate::cli::OutputFormat;
use crate::context::{CliError, CliResult};
use crate::output::{render_fonts, render_pairings};

pub(crate) fn handle_list(category: Option<FontCategory>, format: OutputFormat) -> CliResult<()> {
    let fonts = match category {
        Some(category) => fonts_by_category(category),
        None => catalog().iter().collect(),
    };
    render_fonts(&fonts, format)
}

pub(crate) fn handle_search(query: &str, format: OutputFormat) -> CliResult<()> {
    if query.trim().is_empty() {
        return Err(CliError::validation("search query cannot be empty"));
    }
    let fonts = search_fonts(query);
    if fonts.is_empty() {
        return Err(CliError::validation(format!("no catalog font matches '{query}'")));
    }
    render_fonts(&fonts, format)
}

pub(crate) fn handle_pairings(format: OutputFormat) -> CliResult<()> {
    render_pairings(pairings(), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_requires_a_match() {
        assert!(handle_search("play", OutputFormat::Table).is_ok());
        let err = handle_search("zzz-no-such-face", OutputFormat::Table).expect_err("no match");
        assert_eq!(err.exit_code(), 2);
        assert!(handle_search("   ", OutputFormat::Json).is_err());
    }

    #[test]
    fn listing_covers_every_category() {
        for category in FontCategory::all() {
            assert!(handle_list(Some(category), OutputFormat::Json).is_ok());
        }
        assert!(handle_list(None, OutputFormat::Table).is_ok());
        assert!(handle_pairings(OutputFormat::Table).is_ok());
    }
}
