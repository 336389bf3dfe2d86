//! Decile-level bar charts

use super::figure::{palette, watermark, Figure, FONT_FAMILY};
use crate::microsim::{DecileImpacts, OutcomeBucket, DECILES};
use serde_json::{json, Value};

fn bucket_color(bucket: OutcomeBucket) -> &'static str {
    match bucket {
        OutcomeBucket::GainMoreThan5Pct => palette::PRIMARY_700,
        OutcomeBucket::GainLessThan5Pct => palette::PRIMARY_ALPHA_60,
        OutcomeBucket::NoChange => palette::GRAY_200,
        OutcomeBucket::LoseLessThan5Pct => palette::GRAY_400,
        OutcomeBucket::LoseMoreThan5Pct => palette::GRAY_600,
    }
}

/// Light fills need dark label text
fn bucket_text_color(bucket: OutcomeBucket) -> Option<&'static str> {
    match bucket {
        OutcomeBucket::GainLessThan5Pct | OutcomeBucket::NoChange => Some(palette::BLACK),
        _ => None,
    }
}

fn bar_label(share: f64) -> String {
    if share > 0.0 {
        format!("{:.0}%", share)
    } else {
        String::new()
    }
}

/// One horizontal bar trace per bucket on the given subplot axes
fn stacked_bar_traces(
    labels: &[String],
    shares: impl Fn(OutcomeBucket) -> Vec<f64>,
    axes: (&str, &str),
    show_legend: bool,
) -> Vec<Value> {
    OutcomeBucket::ALL
        .iter()
        .map(|&bucket| {
            let values = shares(bucket);
            let text: Vec<String> = values.iter().map(|&v| bar_label(v)).collect();
            let mut trace = json!({
                "type": "bar",
                "orientation": "h",
                "y": labels,
                "x": values,
                "name": bucket.legend(),
                "marker": { "color": bucket_color(bucket) },
                "text": text,
                "textposition": "inside",
                "textangle": 0,
                "legendgroup": bucket.label().to_lowercase().replace(' ', "_"),
                "showlegend": show_legend,
                "hovertemplate": "%{x:.1f}%<extra></extra>",
                "xaxis": axes.0,
                "yaxis": axes.1,
            });
            if let Some(color) = bucket_text_color(bucket) {
                trace["textfont"] = json!({ "color": color });
            }
            trace
        })
        .collect()
}

/// Stacked shares of winners and losers: an "All" row above ten decile rows
pub fn winners_by_decile_chart(impacts: &DecileImpacts, title: &str) -> Figure {
    let mut fig = Figure::new(json!({
        "barmode": "stack",
        "title": { "text": title, "x": 0 },
        "font": { "family": FONT_FAMILY, "color": palette::BLACK },
        "xaxis": {
            "anchor": "y",
            "domain": [0.0, 1.0],
            "matches": "x2",
            "title": { "text": "" },
            "ticksuffix": "%",
            "range": [0, 100],
            "showgrid": false,
            "showticklabels": false,
            "fixedrange": true,
        },
        "xaxis2": {
            "anchor": "y2",
            "domain": [0.0, 1.0],
            "title": { "text": "Population share" },
            "ticksuffix": "%",
            "range": [0, 100],
            "fixedrange": true,
        },
        "yaxis": {
            "anchor": "x",
            "domain": [0.902, 1.0],
            "title": { "text": "" },
            "tickvals": ["All"],
        },
        "yaxis2": {
            "anchor": "x2",
            "domain": [0.0, 0.882],
            "title": { "text": "Income decile" },
            "automargin": true,
        },
        "legend": {
            "title": { "text": "" },
            "orientation": "h",
            "yanchor": "bottom",
            "y": 1.08,
            "xanchor": "center",
            "x": 0.5,
            "traceorder": "normal",
            "font": { "size": 10 },
        },
        "margin": { "l": 60, "r": 60, "b": 100, "t": 120, "pad": 4 },
        "height": 580,
        "width": 800,
        "uniformtext": { "mode": "hide", "minsize": 8 },
        "images": [watermark(1.05, -0.20, 0.09)],
    }));

    let all_label = vec!["All".to_string()];
    for trace in stacked_bar_traces(
        &all_label,
        |b| vec![impacts.all_outcomes.get(b)],
        ("x", "y"),
        true,
    ) {
        fig.add_trace(trace);
    }

    let decile_labels: Vec<String> = DECILES.iter().map(|d| d.to_string()).collect();
    for trace in stacked_bar_traces(
        &decile_labels,
        |b| impacts.bucket_series(b),
        ("x2", "y2"),
        false,
    ) {
        fig.add_trace(trace);
    }

    fig
}

/// Average dollar gain per household in each decile
pub fn avg_benefit_by_decile_chart(impacts: &DecileImpacts, title: &str) -> Figure {
    let text: Vec<String> = impacts
        .avg_impact_by_decile
        .iter()
        .map(|v| format!("${}", *v as i64))
        .collect();

    let mut fig = Figure::new(json!({
        "title": { "text": title },
        "font": { "family": FONT_FAMILY, "color": palette::BLACK },
        "xaxis": {
            "title": { "text": "Income decile" },
            "tickvals": DECILES,
            "fixedrange": true,
        },
        "yaxis": {
            "title": { "text": "Absolute change in household income" },
            "tickformat": ",",
            "tickprefix": "$",
            "fixedrange": true,
        },
        "showlegend": false,
        "margin": { "l": 60, "r": 60, "b": 80, "t": 80, "pad": 4 },
        "images": [watermark(1.05, -0.18, 0.07)],
    }));

    fig.add_trace(json!({
        "type": "bar",
        "x": DECILES,
        "y": impacts.avg_impact_by_decile,
        "text": text,
        "marker": { "color": palette::PRIMARY_500 },
        "hovertemplate": "Income decile: %{x}<br>Average impact: $%{y:,.0f}<extra></extra>",
    }));

    fig
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::microsim::OutcomeShares;

    fn impacts() -> DecileImpacts {
        let row = OutcomeShares {
            gain_more_than_5pct: 0.4,
            gain_less_than_5pct: 5.5,
            no_change: 94.1,
            ..Default::default()
        };
        DecileImpacts {
            decile_outcomes: vec![row; 10],
            all_outcomes: row,
            avg_impact_by_decile: vec![24.0, 31.0, 20.0, 12.0, 7.0, 4.0, 2.0, 1.0, 0.0, 0.0],
        }
    }

    #[test]
    fn test_winners_trace_layout() {
        let fig = winners_by_decile_chart(&impacts(), "Figure 3");
        assert_eq!(fig.data.len(), 10);

        // "All" row first, with legend entries
        assert_eq!(fig.data[0]["y"][0], "All");
        assert_eq!(fig.data[0]["showlegend"], true);
        assert_eq!(fig.data[0]["yaxis"], "y");

        // Decile rows on the second subplot
        assert_eq!(fig.data[5]["y"].as_array().unwrap().len(), 10);
        assert_eq!(fig.data[5]["showlegend"], false);
        assert_eq!(fig.data[5]["xaxis"], "x2");
        assert_eq!(fig.layout["barmode"], "stack");
    }

    #[test]
    fn test_bar_labels_hide_zero() {
        let fig = winners_by_decile_chart(&impacts(), "Figure 3");
        // No change bucket on the "All" row
        assert_eq!(fig.data[2]["text"][0], "94%");
        assert_eq!(fig.data[2]["textfont"]["color"], palette::BLACK);
        // Lose less than 5% is empty
        assert_eq!(fig.data[3]["text"][0], "");
        assert!(fig.data[3].get("textfont").is_none());
    }

    #[test]
    fn test_avg_benefit_chart() {
        let fig = avg_benefit_by_decile_chart(&impacts(), "Figure 4");
        assert_eq!(fig.data.len(), 1);
        assert_eq!(fig.data[0]["text"][0], "$24");
        assert_eq!(fig.data[0]["text"][9], "$0");
        assert_eq!(fig.data[0]["x"][9], 10);
        assert_eq!(fig.layout["showlegend"], false);
    }
}
