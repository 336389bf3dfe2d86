//! Household-level line charts

use super::figure::{dollar_axis, palette, watermark, Figure, FONT_FAMILY};
use crate::household::{BenefitCurve, CreditComparison};
use serde_json::json;

/// Line colour and dash per household size, in legend order
const LINE_STYLES: [(&str, &str); 3] = [
    (palette::TEAL_LIGHT, "dot"),
    (palette::PRIMARY_500, "solid"),
    (palette::TEAL_DARK, "dash"),
];

fn line_layout(title: &str, y_title: &str, legend_width: u32) -> serde_json::Value {
    json!({
        "title": { "text": title },
        "font": { "family": FONT_FAMILY, "color": palette::BLACK },
        "xaxis": dollar_axis("Employment income"),
        "yaxis": dollar_axis(y_title),
        "legend": {
            "orientation": "h",
            "yanchor": "top",
            "y": -0.15,
            "xanchor": "center",
            "x": 0.5,
            "entrywidth": legend_width,
            "entrywidthmode": "pixels",
        },
        "margin": { "l": 60, "r": 60, "b": 120, "t": 80, "pad": 4 },
        "images": [watermark(1.05, -0.22, 0.07)],
    })
}

/// Refundable CTC under current law (dashed) and the reform (solid)
pub fn baseline_reform_chart(comparison: &CreditComparison, title: &str) -> Figure {
    let mut fig = Figure::new(line_layout(title, "Refundable Child Tax Credit", 150));
    let hover = "Employment income: $%{x:,}<br>Refundable CTC: $%{y:,.0f}<extra></extra>";

    fig.add_trace(json!({
        "type": "scatter",
        "mode": "lines",
        "name": "Current law",
        "x": comparison.incomes.values(),
        "y": comparison.baseline_credits,
        "line": { "color": palette::GRAY_600, "width": 3, "dash": "dash" },
        "hovertemplate": hover,
    }));
    fig.add_trace(json!({
        "type": "scatter",
        "mode": "lines",
        "name": "Stronger Start reform",
        "x": comparison.incomes.values(),
        "y": comparison.reform_credits,
        "line": { "color": palette::PRIMARY_500, "width": 3 },
        "hovertemplate": hover,
    }));

    fig
}

/// Change in net income, one line per household curve
pub fn net_income_change_chart(curves: &[BenefitCurve], title: &str) -> Figure {
    let mut fig = Figure::new(line_layout(title, "Change in net income", 100));

    for (i, curve) in curves.iter().enumerate() {
        // A lone curve gets the primary colour
        let (color, dash) = if curves.len() == 1 {
            (palette::PRIMARY_500, "solid")
        } else {
            LINE_STYLES[i % LINE_STYLES.len()]
        };
        let name = curve.household.label();

        fig.add_trace(json!({
            "type": "scatter",
            "mode": "lines",
            "name": name,
            "x": curve.incomes.values(),
            "y": curve.changes,
            "line": { "color": color, "width": 3, "dash": dash },
            "hovertemplate": format!(
                "{}<br>Employment income: $%{{x:,}}<br>Change in net income: $%{{y:.2f}}<extra></extra>",
                name
            ),
        }));
    }

    fig
}
