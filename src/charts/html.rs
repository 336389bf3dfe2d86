//! Standalone HTML pages embedding one chart each

use super::Figure;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory the chart pages are written to
pub const CHARTS_DIR: &str = "output/charts";

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";
const FONT_CSS: &str =
    "https://fonts.googleapis.com/css2?family=Roboto+Serif:wght@400;500;600&display=swap";

/// Page for a single figure, sized to the viewport
pub fn render_chart_html(figure: &Figure, title: &str) -> Result<String> {
    // Keep the JSON from closing the surrounding <script> element
    let figure_json = figure.to_json()?.replace("</", "<\\/");

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link href="{font_css}" rel="stylesheet">
    <script src="{plotly}"></script>
    <style>
        body {{
            margin: 0;
            padding: 0;
            font-family: 'Roboto Serif', serif;
        }}
        #chart {{
            width: 100%;
            height: 100vh;
        }}
    </style>
</head>
<body>
    <div id="chart"></div>
    <script>
        var figure = {figure_json};
        Plotly.newPlot('chart', figure.data, figure.layout, {{responsive: true}});
    </script>
</body>
</html>
"#,
        title = escape_text(title),
        font_css = FONT_CSS,
        plotly = PLOTLY_CDN,
        figure_json = figure_json,
    ))
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Write a chart page into `dir`, creating the directory if needed
pub fn write_chart_html(dir: &Path, figure: &Figure, title: &str, filename: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    fs::write(&path, render_chart_html(figure, title)?)?;
    log::info!("Generated: {}", path.display());
    Ok(path)
}
