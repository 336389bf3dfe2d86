//! Figure container and shared styling

use crate::error::Result;
use serde::Serialize;
use serde_json::{json, Value};

/// Brand colours
pub mod palette {
    pub const BLACK: &str = "#000000";
    pub const PRIMARY_500: &str = "#319795";
    pub const PRIMARY_700: &str = "#285E61";
    pub const PRIMARY_ALPHA_60: &str = "rgba(49, 151, 149, 0.6)";
    pub const TEAL_LIGHT: &str = "rgba(49, 151, 149, 0.4)";
    pub const TEAL_DARK: &str = "#285E61";
    pub const GRAY_200: &str = "#E5E7EB";
    pub const GRAY_400: &str = "#9CA3AF";
    pub const GRAY_600: &str = "#4B5563";
}

/// Logo watermark shown in the lower right of every chart
pub const WATERMARK_SOURCE: &str =
    "https://policyengine.github.io/utah-sb60-calc/assets/teal-square-transparent.png";

pub const FONT_FAMILY: &str = "Roboto Serif";

/// A Plotly figure: traces plus layout
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
}

impl Figure {
    pub fn new(layout: Value) -> Self {
        Self {
            data: Vec::new(),
            layout,
        }
    }

    pub fn add_trace(&mut self, trace: Value) {
        self.data.push(trace);
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Chart title text, if one is set
    pub fn title(&self) -> Option<&str> {
        self.layout["title"]["text"]
            .as_str()
            .or_else(|| self.layout["title"].as_str())
    }
}

/// Watermark image placed at paper coordinates `(x, y)`
pub(crate) fn watermark(x: f64, y: f64, size: f64) -> Value {
    json!({
        "source": WATERMARK_SOURCE,
        "xref": "paper",
        "yref": "paper",
        "sizex": size,
        "sizey": size,
        "xanchor": "right",
        "yanchor": "bottom",
        "x": x,
        "y": y,
    })
}

/// Dollar-formatted, non-zoomable axis
pub(crate) fn dollar_axis(title: &str) -> Value {
    json!({
        "title": { "text": title },
        "tickformat": ",",
        "tickprefix": "$",
        "fixedrange": true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figure_json_shape() {
        let mut fig = Figure::new(json!({ "title": { "text": "Test" } }));
        fig.add_trace(json!({ "type": "bar", "x": [1, 2] }));
        let value: Value = serde_json::from_str(&fig.to_json().unwrap()).unwrap();
        assert_eq!(value["data"][0]["type"], "bar");
        assert_eq!(value["layout"]["title"]["text"], "Test");
        assert_eq!(fig.title(), Some("Test"));
    }

    #[test]
    fn test_plain_string_title() {
        let fig = Figure::new(json!({ "title": "Plain" }));
        assert_eq!(fig.title(), Some("Plain"));
    }
}
