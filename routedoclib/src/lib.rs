//! # routedoclib
//!
//! Route documentation for web applications: render a framework's route table
//! as an aligned text report, and attach each route to the documentation of
//! the controller and action it dispatches to.
//!
//! ## Overview
//!
//! The library works on data the host has already computed. The host framework
//! dumps its routing table as [`RouteRecord`]s and the host documentation tool
//! exposes its symbols through the [`Resolver`] trait. From there:
//!
//! - **Report**: [`RoutesInspector`] walks the table and drives a
//!   [`TableFormatter`], producing one aligned table per batch of routes
//! - **Annotation**: [`annotate`] guesses the controller class of each route
//!   (`admin/users` → `Admin::UsersController`) and appends a
//!   [`DisplayRecord`] to the class node and the `Class#action` node
//!
//! ## Features
//!
//! - **Byte-exact layout**: column widths are computed per batch and never
//!   narrower than the header labels
//! - **Plain and Markdown tables**: [`TableStyle`] selects the flavor
//! - **Filtering**: by controller (class name or path) and by regex
//! - **Engines**: mounted sub-applications get their own titled sections
//! - **Pure data**: no ambient state; I/O only in the explicit `from_path` /
//!   [`write_report`] helpers
//!
//! ## Example
//!
//! ```rust
//! use routedoclib::{annotate, render_report, DocRegistry, ReportOptions, RouteRecord, RouteTable};
//!
//! let table = RouteTable::new(vec![
//!     RouteRecord::new("users", "GET", "/users(.:format)").with_endpoint("users", "index"),
//! ]);
//!
//! let report = render_report(&table, &ReportOptions::new());
//! assert!(report.starts_with("# Routes\n"));
//! assert!(report.contains("users#index"));
//!
//! let mut registry = DocRegistry::with_paths(["UsersController", "UsersController#index"]);
//! let summary = annotate(&table.routes, &mut registry);
//! assert_eq!(summary.attached.len(), 2);
//! assert_eq!(registry.get("UsersController#index").unwrap().routes.len(), 1);
//! ```

pub mod annotator;
pub mod error;
pub mod formatter;
pub mod inspector;
pub mod naming;
pub mod registry;
pub mod report;
pub mod route;

pub use annotator::{annotate, AnnotationSummary, DisplayRecord};
pub use error::RoutedocError;
pub use formatter::{ColumnWidths, RouteFormatter, TableFormatter, TableStyle};
pub use inspector::{RouteFilter, RoutesInspector};
pub use naming::{action_symbol_path, controller_class_name, controller_path};
pub use registry::{DocNode, DocRegistry, Resolver};
pub use report::{render_report, write_report, ReportOptions};
pub use route::{EngineRoutes, RouteRecord, RouteTable};

/// Result type for routedoclib operations
pub type Result<T> = std::result::Result<T, RoutedocError>;
