//! The routes documentation page.
//!
//! A report is a `# Routes` heading followed by the inspector's output and a
//! single trailing newline. Column alignment is part of the format, so the
//! text is written out exactly as the formatter produced it.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::RoutedocError;
use crate::formatter::{TableFormatter, TableStyle, DEFAULT_HELP_URL};
use crate::inspector::{RouteFilter, RoutesInspector};
use crate::route::RouteTable;
use crate::Result;

/// First line of every report.
pub const REPORT_HEADING: &str = "# Routes";

/// Options controlling report generation.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Table flavor
    pub style: TableStyle,
    /// Which routes to include
    pub filter: RouteFilter,
    /// URL shown after "no routes" messages
    pub help_url: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            style: TableStyle::default(),
            filter: RouteFilter::default(),
            help_url: DEFAULT_HELP_URL.to_string(),
        }
    }
}

impl ReportOptions {
    /// Create default options (plain table, every route).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the table flavor
    pub fn style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder: set the route filter
    pub fn filter(mut self, filter: RouteFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Builder: set the help URL
    pub fn help_url(mut self, url: impl Into<String>) -> Self {
        self.help_url = url.into();
        self
    }
}

/// Render the full report text.
pub fn render_report(table: &RouteTable, options: &ReportOptions) -> String {
    let mut formatter = TableFormatter::new(options.style).help_url(options.help_url.as_str());
    let body = RoutesInspector::new(table).format(&mut formatter, &options.filter);

    let mut report = String::with_capacity(REPORT_HEADING.len() + body.len() + 2);
    report.push_str(REPORT_HEADING);
    report.push('\n');
    report.push_str(&body);
    if !report.ends_with('\n') {
        report.push('\n');
    }
    report
}

/// Render the report and write it to `path`.
pub fn write_report(
    path: impl AsRef<Path>,
    table: &RouteTable,
    options: &ReportOptions,
) -> Result<()> {
    let path = path.as_ref();
    let report = render_report(table, options);

    fs::write(path, report).map_err(|e| RoutedocError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!(path = %path.display(), routes = table.routes.len(), "wrote routes report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteRecord;

    fn sample_table() -> RouteTable {
        RouteTable::new(vec![
            RouteRecord::new("users", "GET", "/users(.:format)").with_endpoint("users", "index"),
            RouteRecord::new("user", "GET", "/users/:id(.:format)")
                .with_endpoint("users", "show")
                .requirement("id", "[0-9]+"),
        ])
    }

    #[test]
    fn test_render_report_plain() {
        let report = render_report(&sample_table(), &ReportOptions::new());
        let expected = [
            "# Routes",
            "Prefix | Verb | URI Pattern          | Controller#Action",
            " users | GET  | /users(.:format)     | users#index",
            "  user | GET  | /users/:id(.:format) | users#show {id: \"[0-9]+\"}",
            "",
        ]
        .join("\n");
        assert_eq!(report, expected);
    }

    #[test]
    fn test_render_report_markdown() {
        let options = ReportOptions::new().style(TableStyle::Markdown);
        let report = render_report(&sample_table(), &options);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], REPORT_HEADING);
        assert!(lines[1].starts_with("| Prefix | Verb"));
        assert!(lines[2].starts_with("|-------:|------|"));
        assert!(lines[3].starts_with("|  users | GET  |"));
        assert!(report.ends_with("users#show {id: \"[0-9]+\"}\n"));
    }

    #[test]
    fn test_render_report_empty_table() {
        let options = ReportOptions::new().help_url("https://example.test/routes");
        let report = render_report(&RouteTable::default(), &options);

        assert!(report.starts_with("# Routes\nYou don't have any routes defined!\n"));
        assert!(report.ends_with("see the Rails guide: https://example.test/routes.\n"));
    }

    #[test]
    fn test_render_report_with_filter() {
        let filter = RouteFilter::new().grep("show").unwrap();
        let report = render_report(&sample_table(), &ReportOptions::new().filter(filter));

        assert!(report.contains("users#show"));
        assert!(!report.contains("users#index"));
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.md");
        let options = ReportOptions::new();

        write_report(&path, &sample_table(), &options).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_report(&sample_table(), &options));
    }

    #[test]
    fn test_write_report_bad_path() {
        let result = write_report(
            "/nonexistent/dir/routes.md",
            &sample_table(),
            &ReportOptions::new(),
        );
        assert!(matches!(result, Err(RoutedocError::FileWrite { .. })));
    }
}
