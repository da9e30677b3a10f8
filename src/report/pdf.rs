//! PDF rendering of a [`ReportData`] bundle.

use crate::report::bundle::{format_value, ReportData, EXTRAPOLATION_CAVEAT, SLOPE_DECIMALS};
use crate::report::chart::ChartSeries;
use crate::report::error::ReportError;
use crate::report::fonts::FontAssets;
use crate::types::variable::Variable;
use log::info;
use printpdf::{
    Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point, Rgb,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const CHART_HEIGHT: f32 = 65.0;
const LAYER: &str = "Layer 1";
const MM_PER_PT: f32 = 0.3528;

/// Renders the complete report and returns the PDF bytes.
///
/// # Errors
///
/// Returns [`ReportError::FontEmbed`] if a font file is not a usable TrueType
/// font and [`ReportError::PdfRender`] if the document cannot be serialised.
pub fn render_pdf(report: &ReportData, fonts: &FontAssets) -> Result<Vec<u8>, ReportError> {
    let title = format!("Climate analysis and linear extrapolation - {}", report.station().name);
    let (doc, page, layer) = PdfDocument::new(&title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);

    let (regular_path, regular_bytes) = fonts.regular();
    let regular = doc
        .add_external_font(regular_bytes)
        .map_err(|e| ReportError::FontEmbed {
            path: regular_path.to_path_buf(),
            source: e,
        })?;
    let (bold_path, bold_bytes) = fonts.bold();
    let bold = doc
        .add_external_font(bold_bytes)
        .map_err(|e| ReportError::FontEmbed {
            path: bold_path.to_path_buf(),
            source: e,
        })?;

    let mut writer = PageWriter {
        layer: doc.get_page(page).get_layer(layer),
        doc: &doc,
        regular,
        bold,
        cursor: PAGE_HEIGHT - MARGIN,
    };

    writer.text(&title, 16.0, true);
    writer.text(
        &format!(
            "Station {} - data {}-{} - generated {}",
            report.station().id,
            report.first_year(),
            report.last_year(),
            report.current_year()
        ),
        9.0,
        false,
    );
    writer.gap(4.0);

    write_trends(&mut writer, report);
    write_predictions(&mut writer, report);

    for line in wrap(EXTRAPOLATION_CAVEAT, 100) {
        writer.text(&line, 8.5, false);
    }
    writer.gap(4.0);

    for variable in Variable::ALL {
        writer.chart(&ChartSeries::for_variable(report, variable));
    }

    write_yearly(&mut writer, report);

    let bytes = doc.save_to_bytes().map_err(ReportError::PdfRender)?;
    info!("Rendered PDF report ({} bytes)", bytes.len());
    Ok(bytes)
}

fn write_trends(writer: &mut PageWriter, report: &ReportData) {
    let widths = [50.0, 45.0, 40.0, 45.0];
    writer.text("Trends", 12.0, true);
    writer.row(&["Variable", "Slope per year", "Intercept", "Direction"], &widths, true);
    for metric in report.trend_metrics() {
        let cells = [
            metric.variable.label().to_string(),
            metric.slope_label(),
            format_value(metric.model.intercept, SLOPE_DECIMALS),
            metric.direction_label().to_string(),
        ];
        writer.row(&cells, &widths, false);
    }
    writer.gap(4.0);
}

fn write_predictions(writer: &mut PageWriter, report: &ReportData) {
    let widths = [30.0, 50.0, 50.0, 50.0];
    let mut headers = vec!["Year".to_string()];
    headers.extend(Variable::ALL.iter().map(|v| format!("{} [{}]", v, v.unit())));
    writer.text("Extrapolated values", 12.0, true);
    writer.row(&headers, &widths, true);
    for row in report.prediction_rows(|v| v.pdf_decimals()) {
        let mut cells = vec![row.year.to_string()];
        cells.extend(row.values);
        writer.row(&cells, &widths, false);
    }
    writer.gap(3.0);
}

fn write_yearly(writer: &mut PageWriter, report: &ReportData) {
    let widths = [18.0, 27.0, 27.0, 27.0, 27.0, 27.0, 27.0];
    writer.text("Yearly data", 12.0, true);
    writer.row(
        &["Year", "tavg", "tavg trend", "wspd", "wspd trend", "prcp", "prcp trend"],
        &widths,
        true,
    );
    for row in report.yearly() {
        let mut cells = vec![row.year.to_string()];
        for variable in Variable::ALL {
            let decimals = variable.pdf_decimals();
            cells.push(format_value(row.observed(variable), decimals));
            cells.push(format_value(row.trend(variable), decimals));
        }
        writer.row(&cells, &widths, false);
    }
}

/// Writes top to bottom, starting a new page when the current one is full.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Baseline of the next line, in mm from the bottom edge.
    cursor: f32,
}

impl PageWriter<'_> {
    fn line_height(size: f32) -> f32 {
        size * MM_PER_PT * 1.4
    }

    fn ensure_space(&mut self, height: f32) {
        if self.cursor - height < MARGIN {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor = PAGE_HEIGHT - MARGIN;
        }
    }

    fn font(&self, bold: bool) -> &IndirectFontRef {
        if bold {
            &self.bold
        } else {
            &self.regular
        }
    }

    fn gap(&mut self, height: f32) {
        self.cursor -= height;
    }

    fn text(&mut self, text: &str, size: f32, bold: bool) {
        let height = Self::line_height(size);
        self.ensure_space(height);
        self.cursor -= height;
        self.layer
            .use_text(text, size, Mm(MARGIN), Mm(self.cursor), self.font(bold));
    }

    fn row<S: AsRef<str>>(&mut self, cells: &[S], widths: &[f32], bold: bool) {
        let size = 9.0;
        let height = Self::line_height(size);
        self.ensure_space(height);
        self.cursor -= height;
        let mut x = MARGIN;
        for (cell, width) in cells.iter().zip(widths) {
            self.layer
                .use_text(cell.as_ref(), size, Mm(x), Mm(self.cursor), self.font(bold));
            x += width;
        }
    }

    fn label(&self, text: String, x: f32, y: f32) {
        self.layer.use_text(text, 7.0, Mm(x), Mm(y), &self.regular);
    }

    fn stroke(&self, points: &[(f32, f32)], color: (f32, f32, f32), thickness: f32, closed: bool) {
        if points.len() < 2 {
            return;
        }
        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(color.0, color.1, color.2, None)));
        self.layer.set_outline_thickness(thickness);
        self.layer.add_line(Line {
            points: points
                .iter()
                .map(|&(x, y)| (Point::new(Mm(x), Mm(y)), false))
                .collect(),
            is_closed: closed,
        });
    }

    fn chart(&mut self, series: &ChartSeries) {
        let title_height = Self::line_height(10.0);
        self.ensure_space(title_height + CHART_HEIGHT + 8.0);
        self.text(&series.title(), 10.0, true);
        self.cursor -= 2.0;

        let (left, bottom) = (MARGIN + 12.0, self.cursor - CHART_HEIGHT);
        let (width, height) = (CONTENT_WIDTH - 12.0, CHART_HEIGHT);
        let (xr, yr) = (series.x_range(), series.y_range());
        let project = |&(x, y): &(f64, f64)| {
            (
                left + ((x - xr.start) / (xr.end - xr.start)) as f32 * width,
                bottom + ((y - yr.start) / (yr.end - yr.start)) as f32 * height,
            )
        };

        let frame = [
            (left, bottom),
            (left + width, bottom),
            (left + width, bottom + height),
            (left, bottom + height),
        ];
        self.stroke(&frame, (0.4, 0.4, 0.4), 0.5, true);

        for point in &series.observed {
            let (x, y) = project(point);
            self.stroke(&[(x - 0.6, y), (x + 0.6, y)], (0.1, 0.3, 0.8), 0.8, false);
            self.stroke(&[(x, y - 0.6), (x, y + 0.6)], (0.1, 0.3, 0.8), 0.8, false);
        }
        let trend: Vec<(f32, f32)> = series.trend.iter().map(project).collect();
        self.stroke(&trend, (0.85, 0.1, 0.1), 1.0, false);
        let extrapolation: Vec<(f32, f32)> = series.extrapolation.iter().map(project).collect();
        self.stroke(&extrapolation, (0.7, 0.1, 0.7), 0.6, false);

        let decimals = series.variable.pdf_decimals();
        self.label(format!("{:.0}", xr.start), left, bottom - 4.0);
        self.label(format!("{:.0}", xr.end), left + width - 8.0, bottom - 4.0);
        self.label(format_value(yr.start, decimals), MARGIN, bottom);
        self.label(format_value(yr.end, decimals), MARGIN, bottom + height - 2.0);

        self.cursor = bottom - 8.0;
    }
}

/// Greedy word wrap at `width` characters.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::TrendAnalysis;
    use crate::config::{FontConfig, StationInfo};
    use crate::error::{ClimateError, ErrorKind};
    use crate::types::variable::VariableValues;
    use crate::types::yearly::YearlyObservation;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn report() -> ReportData {
        let observations: Vec<YearlyObservation> = (1961..2021)
            .map(|year| YearlyObservation {
                year,
                observed: VariableValues::new(
                    7.5 + 0.03 * f64::from(year - 1961),
                    3.4 - 0.01 * f64::from(year - 1961),
                    480.0 + f64::from((year * 13) % 40),
                ),
            })
            .collect();
        ReportData::new(
            StationInfo::builder().id("11723").name("Brno").build(),
            Arc::new(TrendAnalysis::fit(&observations).unwrap()),
            &[2036, 2126, 3026],
            2026,
        )
    }

    #[test]
    fn test_unusable_font_is_reported_and_not_terminal() {
        let dir = TempDir::new().unwrap();
        let config = FontConfig {
            directory: dir.path().to_path_buf(),
            ..FontConfig::default()
        };
        fs::write(config.regular_path(), b"not a truetype font").unwrap();
        fs::write(config.bold_path(), b"not a truetype font either").unwrap();
        let fonts = FontAssets::load(&config).unwrap();

        let err = render_pdf(&report(), &fonts).unwrap_err();
        match &err {
            ReportError::FontEmbed { path, .. } => assert_eq!(path, &config.regular_path()),
            other => panic!("unexpected error: {other}"),
        }

        let err = ClimateError::from(err);
        assert!(!err.is_terminal());
        assert_eq!(err.kind(), ErrorKind::Processing);
    }

    #[test]
    fn test_renders_pdf_document() {
        let directory = PathBuf::from("/usr/share/fonts/truetype/dejavu");
        let config = FontConfig {
            directory,
            ..FontConfig::default()
        };
        // Needs the DejaVu fonts installed on the machine running the tests.
        let Ok(fonts) = FontAssets::load(&config) else {
            return;
        };

        let bytes = render_pdf(&report(), &fonts).unwrap();

        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.windows(5).any(|w| w == b"%%EOF"));
    }

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap(EXTRAPOLATION_CAVEAT, 40);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 40));
        assert_eq!(lines.join(" "), EXTRAPOLATION_CAVEAT.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_keeps_overlong_word_whole() {
        assert_eq!(wrap("a verylongword b", 4), vec!["a", "verylongword", "b"]);
    }
}
