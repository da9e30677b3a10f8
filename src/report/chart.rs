//! Per-variable chart data and its SVG rendering.
//!
//! The same [`ChartSeries`] feeds both the SVG charts and the vector charts
//! drawn into the PDF, so the two can never disagree.

use crate::report::bundle::ReportData;
use crate::report::error::ReportError;
use crate::report::fonts::FontAssets;
use crate::types::variable::Variable;
use log::{info, warn};
use ordered_float::OrderedFloat;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use std::cmp;
use std::ops::Range;
use std::sync::OnceLock;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 560;
const FONT_FAMILY: &str = "sans-serif";

static CHART_TEXT: OnceLock<bool> = OnceLock::new();

/// Registers the report's regular font for chart captions and axis labels.
///
/// Registration happens at most once per process; the result of the first
/// attempt is returned on every later call.
pub fn enable_chart_text(fonts: &FontAssets) -> bool {
    *CHART_TEXT.get_or_init(|| {
        let (path, bytes) = fonts.regular();
        let leaked: &'static [u8] = Box::leak(bytes.to_vec().into_boxed_slice());
        match register_font(FONT_FAMILY, FontStyle::Normal, leaked) {
            Ok(()) => {
                info!("Chart text enabled with font {:?}", path);
                true
            }
            Err(_) => {
                warn!("Font {:?} could not be used for chart text", path);
                false
            }
        }
    })
}

fn chart_text_enabled() -> bool {
    CHART_TEXT.get().copied().unwrap_or(false)
}

/// Points of one variable's chart: observations, in-sample trend line and
/// extrapolation from the last observed year through every horizon year.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub variable: Variable,
    pub observed: Vec<(f64, f64)>,
    pub trend: Vec<(f64, f64)>,
    pub extrapolation: Vec<(f64, f64)>,
}

impl ChartSeries {
    pub fn for_variable(report: &ReportData, variable: Variable) -> Self {
        let observed = report
            .yearly()
            .iter()
            .map(|row| (f64::from(row.year), row.observed(variable)))
            .collect();
        let trend: Vec<(f64, f64)> = report
            .yearly()
            .iter()
            .map(|row| (f64::from(row.year), row.trend(variable)))
            .collect();

        let mut horizons: Vec<(f64, f64)> = report
            .predictions()
            .rows()
            .iter()
            .map(|p| (f64::from(p.year), p.predicted(variable)))
            .collect();
        horizons.sort_by_key(|(year, _)| OrderedFloat(*year));

        let mut extrapolation = Vec::with_capacity(horizons.len() + 1);
        if !horizons.is_empty() {
            extrapolation.extend(trend.last().copied());
            extrapolation.extend(horizons);
        }

        Self {
            variable,
            observed,
            trend,
            extrapolation,
        }
    }

    fn points(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.observed
            .iter()
            .chain(self.trend.iter())
            .chain(self.extrapolation.iter())
    }

    /// Year span covered by all series, padded by one year on each side.
    pub fn x_range(&self) -> Range<f64> {
        padded(self.points().map(|p| p.0), 0.0, 1.0)
    }

    /// Value span covered by all series, padded by 5 %.
    pub fn y_range(&self) -> Range<f64> {
        padded(self.points().map(|p| p.1), 0.05, 1.0)
    }

    pub fn title(&self) -> String {
        format!("{} [{}]", self.variable.label(), self.variable.unit())
    }

    /// Renders the chart as an SVG document.
    ///
    /// Captions and axis labels are drawn only once [`enable_chart_text`] has
    /// succeeded; otherwise the chart is drawn without any text.
    pub fn render_svg(&self) -> Result<String, ReportError> {
        let labelled = chart_text_enabled();
        let err = chart_error(self.variable);
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
            root.fill(&WHITE).map_err(&err)?;

            let mut builder = ChartBuilder::on(&root);
            builder.margin(20);
            if labelled {
                builder
                    .caption(self.title(), (FONT_FAMILY, 24))
                    .x_label_area_size(40)
                    .y_label_area_size(60);
            }
            let mut chart = builder
                .build_cartesian_2d(self.x_range(), self.y_range())
                .map_err(&err)?;

            let mut mesh = chart.configure_mesh();
            if labelled {
                mesh.x_desc("Year").y_desc(self.variable.unit());
            } else {
                mesh.x_labels(0).y_labels(0);
            }
            mesh.draw().map_err(&err)?;

            chart
                .draw_series(
                    self.observed
                        .iter()
                        .map(|&point| Circle::new(point, 3, BLUE.filled())),
                )
                .map_err(&err)?;
            chart
                .draw_series(LineSeries::new(self.trend.iter().copied(), RED.stroke_width(2)))
                .map_err(&err)?;
            chart
                .draw_series(LineSeries::new(
                    self.extrapolation.iter().copied(),
                    MAGENTA.stroke_width(1),
                ))
                .map_err(&err)?;

            root.present().map_err(&err)?;
        }
        Ok(svg)
    }
}

fn chart_error<E: std::fmt::Display>(variable: Variable) -> impl Fn(E) -> ReportError {
    move |e| ReportError::Chart {
        variable,
        message: e.to_string(),
    }
}

fn padded(values: impl Iterator<Item = f64>, fraction: f64, minimum: f64) -> Range<f64> {
    let mut bounds: Option<(OrderedFloat<f64>, OrderedFloat<f64>)> = None;
    for value in values.map(OrderedFloat) {
        bounds = Some(match bounds {
            Some((min, max)) => (cmp::min(min, value), cmp::max(max, value)),
            None => (value, value),
        });
    }
    match bounds {
        Some((min, max)) => {
            let pad = ((max.0 - min.0) * fraction).max(minimum);
            (min.0 - pad)..(max.0 + pad)
        }
        None => 0.0..1.0,
    }
}
