//! Chart specifications for the blog post figures
//!
//! Figures are Plotly `{data, layout}` documents built with `serde_json`.
//! Rendering happens in the browser; this module only decides what data
//! goes into each trace and how the axes are labelled.

mod figure;
mod household;
mod distribution;
pub mod html;

pub use figure::{palette, Figure};
pub use household::{baseline_reform_chart, net_income_change_chart};
pub use distribution::{avg_benefit_by_decile_chart, winners_by_decile_chart};
