//! Chart rendering: one plot per metric, stacked vertically.

use chrono::{Datelike, NaiveDate};
use eframe::egui;
use egui_plot::{GridMark, Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text};
use std::ops::RangeInclusive;

use crate::analysis::ExtremumKind;
use crate::app::EstateViewApp;
use crate::parsers::TimeSeries;
use crate::render::ChartSpec;
use crate::state::{trace_color, CHART_HEIGHT, CHART_SPACING, PEAK_COLOR, TROUGH_COLOR};

/// X coordinate of a date (days since 0001-01-01)
pub fn day_number(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Axis label for an x coordinate produced by [`day_number`]
pub fn format_day_axis(x: f64) -> String {
    if !x.is_finite() || x.fract().abs() > 1e-6 {
        return String::new();
    }
    NaiveDate::from_num_days_from_ce_opt(x as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Split a series into contiguous runs of present values so gaps are not bridged
pub fn line_segments(series: &TimeSeries) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();

    for point in series.points() {
        match point.value.filter(|v| v.is_finite()) {
            Some(value) => current.push([day_number(point.date), value]),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn rgb(color: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(color[0], color[1], color[2])
}

impl EstateViewApp {
    /// Render the central chart area
    pub fn render_charts(&mut self, ui: &mut egui::Ui) {
        if self.dataset.is_none() {
            self.render_empty_state(ui, "Open a market data CSV to get started");
            return;
        }

        if let Some(error) = &self.render_error {
            let error = error.clone();
            self.render_empty_state(ui, &error);
            return;
        }

        let Some(result) = self.result.clone() else {
            return;
        };

        if result.is_empty() {
            self.render_empty_state(ui, "Select one or more regions to display charts");
            return;
        }

        let color_blind_mode = self.settings.color_blind_mode;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for chart in &result.charts {
                    Self::render_metric_chart(ui, chart, color_blind_mode);
                    ui.add_space(CHART_SPACING);
                }
            });
    }

    fn render_empty_state(&self, ui: &mut egui::Ui, message: &str) {
        ui.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new(message)
                    .size(18.0)
                    .color(egui::Color32::GRAY),
            );
        });
    }

    /// Render a single metric chart with its traces and extrema annotations
    fn render_metric_chart(ui: &mut egui::Ui, chart: &ChartSpec, color_blind_mode: bool) {
        ui.label(egui::RichText::new(&chart.title).size(16.0).strong());
        ui.add_space(4.0);

        let peak_color = rgb(PEAK_COLOR);
        let trough_color = rgb(TROUGH_COLOR);

        Plot::new(format!("chart_{}", chart.metric.as_ref()))
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
                format_day_axis(mark.value)
            })
            .show(ui, |plot_ui| {
                for (i, trace) in chart.traces.iter().enumerate() {
                    let color = rgb(trace_color(i, color_blind_mode));

                    for segment in line_segments(&trace.series) {
                        plot_ui.line(
                            Line::new(trace.region.clone(), PlotPoints::from(segment))
                                .color(color)
                                .width(1.5),
                        );
                    }

                    let Some(extrema) = &trace.extrema else {
                        continue;
                    };

                    for point in extrema {
                        let x = day_number(point.date);
                        let (marker, marker_color, anchor) = match point.kind {
                            ExtremumKind::Peak => {
                                (MarkerShape::Up, peak_color, egui::Align2::CENTER_BOTTOM)
                            }
                            ExtremumKind::Trough => {
                                (MarkerShape::Down, trough_color, egui::Align2::CENTER_TOP)
                            }
                        };

                        plot_ui.points(
                            Points::new(format!("{} extrema", trace.region), vec![[x, point.value]])
                                .shape(marker)
                                .filled(true)
                                .radius(4.0)
                                .color(marker_color),
                        );
                        plot_ui.text(
                            Text::new(
                                format!("{} extrema", trace.region),
                                PlotPoint::new(x, point.value),
                                egui::RichText::new(point.label())
                                    .size(11.0)
                                    .color(marker_color),
                            )
                            .anchor(anchor),
                        );
                    }
                }
            });
    }
}
