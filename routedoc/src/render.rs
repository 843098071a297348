//! Terminal rendering for the annotate summary

use console::Style;
use routedoclib::AnnotationSummary;

/// Summary output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryFormat {
    Text,
    Json,
}

impl SummaryFormat {
    pub fn from_arg(value: &str) -> Self {
        match value {
            "json" => SummaryFormat::Json,
            _ => SummaryFormat::Text,
        }
    }
}

/// Render an annotation summary in the requested format.
pub fn render_summary(
    summary: &AnnotationSummary,
    format: SummaryFormat,
) -> Result<String, serde_json::Error> {
    match format {
        SummaryFormat::Json => serde_json::to_string_pretty(summary).map(|s| s + "\n"),
        SummaryFormat::Text => Ok(render_summary_text(summary)),
    }
}

/// Counts first, then one line per symbol.
fn render_summary_text(summary: &AnnotationSummary) -> String {
    let heading = Style::new().bold();
    let hit = Style::new().green();
    let miss = Style::new().dim();

    let mut output = format!(
        "{}\n",
        heading.apply_to(format!("Annotated {} routes", summary.routes))
    );
    output.push_str(&format!("  attached: {}\n", summary.attached.len()));
    output.push_str(&format!("  missed:   {}\n", summary.missed.len()));

    for symbol in &summary.attached {
        output.push_str(&format!("  {} {}\n", hit.apply_to("+"), symbol));
    }
    for symbol in &summary.missed {
        output.push_str(&format!("  {} {}\n", miss.apply_to("-"), miss.apply_to(symbol)));
    }

    output
}
