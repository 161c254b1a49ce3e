//! HTML output format for dashboard reports
//!
//! Self-contained page with embedded CSS, a parameter summary table and one
//! Plotly line chart per [`ChartSpec`]. Plotly itself is loaded from its CDN.

use crate::chart::{ChartSpec, XAxis, TIME_HOVER_FORMAT};
use crate::dashboard::DashboardReport;
use serde_json::{json, Value};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// HTML output formatter
#[derive(Debug)]
pub struct HtmlOutput {
    title: String,
}

impl HtmlOutput {
    /// Create a new HTML output formatter
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Escape HTML special characters to prevent XSS
    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    /// Make JSON safe to embed inside a `<script>` element
    fn escape_script_json(json: &str) -> String {
        json.replace("</", "<\\/")
    }

    /// Generate embedded CSS styles
    fn generate_styles() -> &'static str {
        r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        h1, h2 {
            color: #333;
        }
        table {
            border-collapse: collapse;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 8px;
            text-align: left;
        }
        th {
            background-color: #4a90d9;
            color: white;
            font-weight: bold;
        }
        tr:nth-child(even) {
            background-color: #f9f9f9;
        }
        .pattern {
            font-family: monospace;
        }
        .chart {
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
            min-height: 450px;
        }
        .empty-notice {
            padding: 12px;
            margin-bottom: 20px;
            background-color: #fff3cd;
            border: 1px solid #ffe08a;
            color: #7a5b00;
        }
        .footer {
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }
        "#
    }

    /// Render the parameters and record counts as a table
    fn render_summary(&self, report: &DashboardReport) -> String {
        let params = &report.params;
        let rows = [
            ("Domain", params.filter.domain.to_string()),
            ("Include URL patterns", params.filter.include.to_string()),
            ("Exclude URL patterns", params.filter.exclude.to_string()),
            ("Time unit", params.unit.to_string()),
            ("Metric", params.statistic.to_string()),
            (
                "Records",
                format!("{} of {}", report.matched_records, report.total_records),
            ),
        ];

        let mut html = String::new();
        html.push_str("    <h2>Settings</h2>\n");
        html.push_str("    <table class=\"settings\">\n");
        for (name, value) in rows {
            html.push_str(&format!(
                "        <tr><th>{}</th><td class=\"pattern\">{}</td></tr>\n",
                name,
                Self::escape_html(&value)
            ));
        }
        html.push_str("    </table>\n");
        html
    }

    /// Build the Plotly `data` and `layout` objects for one chart
    pub fn plotly_figure(chart: &ChartSpec) -> Value {
        let hover_x = match chart.x_axis {
            XAxis::Time => format!("%{{x|{}}}", TIME_HOVER_FORMAT),
            XAxis::HourOfDay => "%{x:.0f}".to_string(),
        };
        let traces: Vec<Value> = chart
            .series
            .iter()
            .map(|series| {
                let name_line = match &series.name {
                    Some(_) => "<br>day=%{fullData.name}",
                    None => "",
                };
                json!({
                    "type": "scatter",
                    "mode": "lines",
                    "name": series.name,
                    "showlegend": series.name.is_some(),
                    "x": series.x,
                    "y": series.y,
                    "hovertemplate": format!(
                        "{}={}<br>{}=%{{y:{}}}{}<extra></extra>",
                        chart.x_label, hover_x, chart.y_label, chart.value_format, name_line
                    ),
                })
            })
            .collect();

        let mut xaxis = json!({ "title": { "text": chart.x_label } });
        match chart.x_axis {
            XAxis::Time => {
                xaxis["type"] = json!("date");
            }
            XAxis::HourOfDay => {
                xaxis["tickmode"] = json!("array");
                xaxis["tickvals"] = json!((0..24).collect::<Vec<u32>>());
                xaxis["ticktext"] = json!(chart.tick_labels);
                xaxis["range"] = json!([-0.5, 23.5]);
            }
        }

        json!({
            "data": traces,
            "layout": {
                "title": { "text": chart.title },
                "xaxis": xaxis,
                "yaxis": { "title": { "text": chart.y_label } },
                "legend": { "title": { "text": "day" } },
            },
        })
    }

    /// Render one chart container plus its Plotly call
    fn render_chart(chart: &ChartSpec) -> String {
        let figure = Self::plotly_figure(chart);
        let id = Self::escape_html(&chart.id);
        format!(
            "    <div class=\"chart\" id=\"{id}\"></div>\n    <script>\n        (function () {{\n            var fig = {fig};\n            Plotly.newPlot(\"{id}\", fig.data, fig.layout, {{responsive: true}});\n        }})();\n    </script>\n",
            id = id,
            fig = Self::escape_script_json(&figure.to_string()),
        )
    }

    /// Generate complete HTML document
    pub fn to_html(&self, report: &DashboardReport) -> String {
        let mut html = String::new();

        // DOCTYPE and HTML start
        html.push_str("<!DOCTYPE html>\n");
        html.push_str("<html lang=\"en\">\n");

        // Head section
        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str(&format!(
            "    <title>{}</title>\n",
            Self::escape_html(&self.title)
        ));
        html.push_str(&format!(
            "    <script src=\"{}\" charset=\"utf-8\"></script>\n",
            PLOTLY_CDN
        ));
        html.push_str("    <style>");
        html.push_str(Self::generate_styles());
        html.push_str("</style>\n");
        html.push_str("</head>\n");

        // Body section
        html.push_str("<body>\n");
        html.push_str(&format!(
            "    <h1>{}</h1>\n",
            Self::escape_html(&self.title)
        ));
        html.push_str(&self.render_summary(report));

        if report.is_empty() {
            html.push_str(
                "    <div class=\"empty-notice\">No records matched the current filters.</div>\n",
            );
        }

        for chart in report.charts() {
            html.push_str(&Self::render_chart(&chart));
        }

        // Footer
        html.push_str("    <div class=\"footer\">\n");
        html.push_str("        Generated by Hourglass - Access Log Dashboard\n");
        html.push_str("    </div>\n");

        html.push_str("</body>\n");
        html.push_str("</html>\n");

        html
    }
}
