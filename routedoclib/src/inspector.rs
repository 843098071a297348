//! Walk a route table and drive a [`RouteFormatter`].
//!
//! The inspector decides what goes into the report: which routes survive the
//! [`RouteFilter`], which batches become sections, and in what order. The
//! formatter only lays the batches out.

use regex::Regex;

use crate::error::RoutedocError;
use crate::formatter::RouteFormatter;
use crate::naming::controller_path;
use crate::route::{RouteRecord, RouteTable};
use crate::Result;

/// Restricts which routes are rendered.
#[derive(Debug, Clone, Default)]
pub struct RouteFilter {
    /// Normalized controller path prefix (e.g. `admin/users`)
    pub controller: Option<String>,
    /// Pattern matched against name, verb, path and requirements
    pub grep: Option<Regex>,
}

impl RouteFilter {
    /// A filter that keeps every route.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only routes into `controller`, given as a class name
    /// (`Admin::UsersController`) or a path (`admin/users`).
    pub fn controller(mut self, controller: &str) -> Self {
        self.controller = Some(controller_path(controller));
        self
    }

    /// Keep only routes with a column matching `pattern`.
    pub fn grep(mut self, pattern: &str) -> Result<Self> {
        let re = Regex::new(pattern).map_err(|e| RoutedocError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.grep = Some(re);
        Ok(self)
    }

    /// True when no restriction is configured.
    pub fn is_empty(&self) -> bool {
        self.controller.is_none() && self.grep.is_none()
    }

    /// Check if a route passes every configured restriction.
    pub fn matches(&self, route: &RouteRecord) -> bool {
        if let Some(ref controller) = self.controller {
            if !route.controller().starts_with(controller.as_str()) {
                return false;
            }
        }

        if let Some(ref re) = self.grep {
            let hit = re.is_match(&route.name)
                || re.is_match(&route.verb)
                || re.is_match(&route.path)
                || re.is_match(&route.reqs());
            if !hit {
                return false;
            }
        }

        true
    }
}

/// Iteration driver over a [`RouteTable`].
#[derive(Debug, Clone, Copy)]
pub struct RoutesInspector<'a> {
    table: &'a RouteTable,
}

/// Routes a report shows: framework-internal ones are never listed.
fn visible(routes: &[RouteRecord]) -> Vec<RouteRecord> {
    routes.iter().filter(|r| !r.internal).cloned().collect()
}

impl<'a> RoutesInspector<'a> {
    pub fn new(table: &'a RouteTable) -> Self {
        Self { table }
    }

    /// Render the table through `formatter` and return its result.
    ///
    /// The application's routes come first under a single header, then each
    /// engine with matching routes gets its own titled section. Only when
    /// nothing matches anywhere is the formatter's "no routes" message
    /// emitted.
    pub fn format<F: RouteFormatter + ?Sized>(
        &self,
        formatter: &mut F,
        filter: &RouteFilter,
    ) -> String {
        let all = visible(&self.table.routes);
        let routes: Vec<RouteRecord> = all.iter().filter(|r| filter.matches(r)).cloned().collect();

        let engines: Vec<(&str, Vec<RouteRecord>)> = self
            .table
            .engines
            .iter()
            .map(|engine| {
                let matching: Vec<RouteRecord> = visible(&engine.routes)
                    .into_iter()
                    .filter(|r| filter.matches(r))
                    .collect();
                (engine.name.as_str(), matching)
            })
            .filter(|(_, matching)| !matching.is_empty())
            .collect();

        if routes.is_empty() && engines.is_empty() {
            formatter.no_routes(&all);
            return formatter.result();
        }

        if !routes.is_empty() {
            formatter.header(&routes);
            formatter.section(&routes);
        }

        for (name, engine_routes) in &engines {
            formatter.section_title(&format!("Routes for {}", name));
            formatter.header(engine_routes);
            formatter.section(engine_routes);
        }

        formatter.result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::{TableFormatter, NO_ROUTES_DEFINED, NO_ROUTES_MATCHED};

    fn sample_table() -> RouteTable {
        RouteTable::new(vec![
            RouteRecord::new("root", "GET", "/").with_endpoint("home", "index"),
            RouteRecord::new("admin_users", "GET", "/admin/users")
                .with_endpoint("admin/users", "index"),
            RouteRecord::new("", "GET", "/assets").opaque("Sprockets::Environment").internal(),
            RouteRecord::new("", "", "/blog").opaque("Blog::Engine"),
        ])
        .engine(
            "Blog::Engine",
            vec![RouteRecord::new("posts", "GET", "/posts").with_endpoint("blog/posts", "index")],
        )
    }

    #[test]
    fn test_filter_controller_by_class_name() {
        let filter = RouteFilter::new().controller("Admin::UsersController");
        assert_eq!(filter.controller.as_deref(), Some("admin/users"));

        let admin = RouteRecord::new("", "GET", "/admin/users")
            .with_endpoint("admin/users", "index");
        let home = RouteRecord::new("", "GET", "/").with_endpoint("home", "index");
        assert!(filter.matches(&admin));
        assert!(!filter.matches(&home));
    }

    #[test]
    fn test_filter_grep() {
        let filter = RouteFilter::new().grep("POST|#create").unwrap();
        let create = RouteRecord::new("", "POST", "/users").with_endpoint("users", "create");
        let index = RouteRecord::new("users", "GET", "/users").with_endpoint("users", "index");
        assert!(filter.matches(&create));
        assert!(!filter.matches(&index));
    }

    #[test]
    fn test_filter_invalid_pattern() {
        let result = RouteFilter::new().grep("(unclosed");
        if let Err(RoutedocError::InvalidPattern { pattern, .. }) = result {
            assert_eq!(pattern, "(unclosed");
        } else {
            panic!("Expected InvalidPattern error");
        }
    }

    #[test]
    fn test_filter_empty_matches_everything() {
        let filter = RouteFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&RouteRecord::default()));
    }

    #[test]
    fn test_format_sections() {
        let table = sample_table();
        let mut formatter = TableFormatter::default();
        let out = RoutesInspector::new(&table).format(&mut formatter, &RouteFilter::new());

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines[0],
            "     Prefix | Verb | URI Pattern  | Controller#Action"
        );
        assert_eq!(lines[1], "       root | GET  | /            | home#index");
        assert_eq!(
            lines[2],
            "admin_users | GET  | /admin/users | admin/users#index"
        );
        assert_eq!(lines[3], "            |      | /blog        | Blog::Engine");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Routes for Blog::Engine:");
        assert_eq!(lines[6], "Prefix | Verb | URI Pattern | Controller#Action");
        assert_eq!(lines[7], " posts | GET  | /posts      | blog/posts#index");
        assert_eq!(lines.len(), 8);
        assert!(!out.contains("/assets"));
    }

    #[test]
    fn test_format_filtered_skips_empty_engines() {
        let table = sample_table();
        let mut formatter = TableFormatter::default();
        let filter = RouteFilter::new().controller("home");
        let out = RoutesInspector::new(&table).format(&mut formatter, &filter);

        assert!(out.contains("home#index"));
        assert!(!out.contains("admin/users#index"));
        assert!(!out.contains("Routes for"));
    }

    #[test]
    fn test_format_filter_matching_only_engine_routes() {
        let table = sample_table();
        let mut formatter = TableFormatter::default();
        let filter = RouteFilter::new().controller("blog/posts");
        let out = RoutesInspector::new(&table).format(&mut formatter, &filter);

        let expected = [
            "",
            "Routes for Blog::Engine:",
            "Prefix | Verb | URI Pattern | Controller#Action",
            " posts | GET  | /posts      | blog/posts#index",
        ]
        .join("\n");
        assert_eq!(out, expected);
        assert!(!out.contains(NO_ROUTES_MATCHED));
    }

    #[test]
    fn test_format_no_matching_routes() {
        let table = sample_table();
        let mut formatter = TableFormatter::default();
        let filter = RouteFilter::new().controller("OrdersController");
        let out = RoutesInspector::new(&table).format(&mut formatter, &filter);

        assert!(out.starts_with(NO_ROUTES_MATCHED));
        assert!(!out.contains("Routes for"));
    }

    #[test]
    fn test_format_empty_table() {
        let table = RouteTable::default();
        let mut formatter = TableFormatter::default();
        let out = RoutesInspector::new(&table).format(&mut formatter, &RouteFilter::new());

        assert!(out.starts_with(NO_ROUTES_DEFINED[0]));
    }

    #[test]
    fn test_format_only_internal_routes_counts_as_empty() {
        let table = RouteTable::new(vec![RouteRecord::new("", "GET", "/assets").internal()]);
        let mut formatter = TableFormatter::default();
        let out = RoutesInspector::new(&table).format(&mut formatter, &RouteFilter::new());

        assert!(out.starts_with(NO_ROUTES_DEFINED[0]));
    }
}
