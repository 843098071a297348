//! Column-aligned route tables.
//!
//! A [`RouteFormatter`] is an append-only text accumulator. It does not decide
//! what to render: an iteration driver (see [`crate::inspector`]) calls
//! `section_title`, `header`, `section` and `no_routes` in whatever order and
//! grouping the host wants, then reads the text back with `result`.
//!
//! Column widths are computed once per batch, so every row of a section lines
//! up with its header:
//!
//! ```text
//!   Prefix | Verb | URI Pattern          | Controller#Action
//!    users | GET  | /users(.:format)     | users#index
//! new_user | GET  | /users/new(.:format) | users#new
//! ```

use std::borrow::Cow;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::route::RouteRecord;

/// Header label of the route name column.
pub const NAME_LABEL: &str = "Prefix";
/// Header label of the verb column.
pub const VERB_LABEL: &str = "Verb";
/// Header label of the path column.
pub const PATH_LABEL: &str = "URI Pattern";
/// Header label of the trailing requirements column.
pub const REQS_LABEL: &str = "Controller#Action";

/// Separator between columns.
const COLUMN_SEPARATOR: &str = " | ";

/// Shown in place of a table when the application defines no routes at all.
pub const NO_ROUTES_DEFINED: [&str; 2] = [
    "You don't have any routes defined!",
    "Please add some routes in config/routes.rb.",
];

/// Shown in place of a table when routes exist but none survived filtering.
pub const NO_ROUTES_MATCHED: &str = "No routes were found for this controller";

/// Default target of the help line printed after a "no routes" message.
pub const DEFAULT_HELP_URL: &str = "http://guides.rubyonrails.org/routing.html";

/// The operations an iteration driver invokes while walking a route table.
pub trait RouteFormatter {
    /// Start a new titled section.
    fn section_title(&mut self, title: &str);

    /// Emit the header for a batch of routes.
    fn header(&mut self, routes: &[RouteRecord]);

    /// Emit one row per route in the batch.
    fn section(&mut self, routes: &[RouteRecord]);

    /// Emit the "no routes" message. `all_routes` is the unfiltered table and
    /// decides which message is shown.
    fn no_routes(&mut self, all_routes: &[RouteRecord]);

    /// Everything emitted so far.
    fn result(&self) -> String;
}

/// Output flavor of a [`TableFormatter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TableStyle {
    /// Plain aligned text
    #[default]
    Plain,
    /// Pipe table understood by Markdown renderers (kramdown, GFM)
    Markdown,
}

impl TableStyle {
    /// Cell text as it appears in a table of this style.
    ///
    /// Markdown cells escape `|` so verbs like `GET|POST` stay in one column.
    pub fn cell<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            TableStyle::Markdown if text.contains('|') => Cow::Owned(text.replace('|', "\\|")),
            _ => Cow::Borrowed(text),
        }
    }
}

impl FromStr for TableStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(TableStyle::Plain),
            "markdown" | "md" | "kramdown" => Ok(TableStyle::Markdown),
            _ => Err(format!("Unknown table style: {}", s)),
        }
    }
}

/// Widths of the three justified columns of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    pub name: usize,
    pub verb: usize,
    pub path: usize,
}

impl ColumnWidths {
    /// Widest value per column, never narrower than the column's label.
    ///
    /// An empty batch collapses to the label widths.
    pub fn compute(routes: &[RouteRecord]) -> Self {
        Self::for_style(routes, TableStyle::Plain)
    }

    /// Widths of the cells as rendered in `style`, escapes included.
    pub fn for_style(routes: &[RouteRecord], style: TableStyle) -> Self {
        let widest = |field: fn(&RouteRecord) -> &str| {
            routes
                .iter()
                .map(|r| style.cell(field(r)).chars().count())
                .max()
                .unwrap_or(0)
        };

        ColumnWidths {
            name: widest(|r| r.name.as_str()).max(NAME_LABEL.len()),
            verb: widest(|r| r.verb.as_str()).max(VERB_LABEL.len()),
            path: widest(|r| r.path.as_str()).max(PATH_LABEL.len()),
        }
    }
}

/// Append-only route table renderer.
#[derive(Debug, Clone)]
pub struct TableFormatter {
    style: TableStyle,
    help_url: String,
    lines: Vec<String>,
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new(TableStyle::default())
    }
}

impl TableFormatter {
    /// Create an empty formatter.
    pub fn new(style: TableStyle) -> Self {
        Self {
            style,
            help_url: DEFAULT_HELP_URL.to_string(),
            lines: Vec::new(),
        }
    }

    /// Builder: set the URL printed after "no routes" messages
    pub fn help_url(mut self, url: impl Into<String>) -> Self {
        self.help_url = url.into();
        self
    }

    /// The output flavor
    pub fn style(&self) -> TableStyle {
        self.style
    }

    /// Lines emitted so far, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn push_row(&mut self, row: String) {
        match self.style {
            TableStyle::Plain => self.lines.push(row),
            TableStyle::Markdown => self.lines.push(format!("| {}", row)),
        }
    }

    fn help_line(&self) -> String {
        format!(
            "For more information about routes, see the Rails guide: {}.",
            self.help_url
        )
    }
}

fn draw_row(widths: &ColumnWidths, name: &str, verb: &str, path: &str, reqs: &str) -> String {
    [
        format!("{:>width$}", name, width = widths.name),
        format!("{:<width$}", verb, width = widths.verb),
        format!("{:<width$}", path, width = widths.path),
        reqs.to_string(),
    ]
    .join(COLUMN_SEPARATOR)
}

/// Delimiter row of a Markdown table; the name column is right-aligned.
fn draw_delimiter(widths: &ColumnWidths) -> String {
    format!(
        "|{}:|{}|{}|{}",
        "-".repeat(widths.name + 1),
        "-".repeat(widths.verb + 2),
        "-".repeat(widths.path + 2),
        "-".repeat(REQS_LABEL.len() + 1),
    )
}

impl RouteFormatter for TableFormatter {
    fn section_title(&mut self, title: &str) {
        self.lines.push(String::new());
        self.lines.push(format!("{}:", title));
    }

    fn header(&mut self, routes: &[RouteRecord]) {
        let widths = ColumnWidths::for_style(routes, self.style);
        self.push_row(draw_row(
            &widths, NAME_LABEL, VERB_LABEL, PATH_LABEL, REQS_LABEL,
        ));
        if self.style == TableStyle::Markdown {
            self.lines.push(draw_delimiter(&widths));
        }
    }

    fn section(&mut self, routes: &[RouteRecord]) {
        let widths = ColumnWidths::for_style(routes, self.style);
        let style = self.style;
        for route in routes {
            let row = draw_row(
                &widths,
                &style.cell(&route.name),
                &style.cell(&route.verb),
                &style.cell(&route.path),
                &style.cell(&route.reqs()),
            );
            self.push_row(row);
        }
    }

    fn no_routes(&mut self, all_routes: &[RouteRecord]) {
        if all_routes.is_empty() {
            self.lines
                .extend(NO_ROUTES_DEFINED.iter().map(|line| line.to_string()));
        } else {
            self.lines.push(NO_ROUTES_MATCHED.to_string());
        }
        self.lines.push(self.help_line());
    }

    fn result(&self) -> String {
        self.lines.join("\n")
    }
}
