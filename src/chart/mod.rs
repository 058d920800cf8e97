//! Chart — line-chart data and SVG rendering for a balance series.
//!
//! The final point is annotated with its balance to two decimals, and the
//! same figure feeds the "Last balance" summary line.

use plotters::prelude::*;
use rust_decimal::prelude::{Decimal, RoundingStrategy, ToPrimitive};
use serde::Serialize;
use std::error::Error;

use crate::error::{DebtSimError, Result};
use crate::types::{BalanceSeries, DATE_FORMAT};

pub const CHART_TITLE: &str = "Daily Balance Over 30 Days";
pub const X_LABEL: &str = "Date";
pub const Y_LABEL: &str = "Balance";

/// Format a balance with two decimals, rounding halves away from zero.
pub fn format_balance(balance: Decimal) -> String {
    let rounded = balance.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: String,
    pub balance: f64,
}

/// Everything a renderer needs to draw the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<ChartPoint>,
    /// Final balance, two decimals.
    pub annotation: String,
    /// "Last balance: …" line shown beside the chart.
    pub summary: String,
}

impl ChartData {
    pub fn from_series(series: &BalanceSeries) -> Self {
        let points = series
            .iter()
            .map(|p| ChartPoint {
                date: p.date.format(DATE_FORMAT).to_string(),
                balance: p.balance.to_f64().unwrap_or(0.0),
            })
            .collect();
        let annotation = format_balance(series.final_balance());
        let summary = format!("Last balance: {annotation}");
        Self {
            title: CHART_TITLE,
            x_label: X_LABEL,
            y_label: Y_LABEL,
            points,
            annotation,
            summary,
        }
    }

    /// Render a standalone SVG line chart.
    pub fn to_svg(&self, width: u32, height: u32) -> Result<String> {
        let mut svg = String::new();
        self.draw_svg(&mut svg, (width, height))
            .map_err(|e| DebtSimError::Render(e.to_string()))?;
        Ok(svg)
    }

    fn draw_svg(&self, svg: &mut String, size: (u32, u32)) -> std::result::Result<(), Box<dyn Error>> {
        let root = SVGBackend::with_string(svg, size).into_drawing_area();
        root.fill(&WHITE)?;

        let last_x = self.points.len().saturating_sub(1).max(1) as f64;
        let (min, max) = self.balance_range();

        let mut chart = ChartBuilder::on(&root)
            .caption(self.title, ("sans-serif", 18).into_font())
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0..last_x, min..max)?;

        chart
            .configure_mesh()
            .x_desc(self.x_label)
            .y_desc(self.y_label)
            .x_labels(5)
            .x_label_formatter(&|x| self.date_at(*x))
            .y_label_formatter(&|y| format!("{y:.0}"))
            .draw()?;

        chart.draw_series(LineSeries::new(
            self.points
                .iter()
                .enumerate()
                .map(|(i, p)| (i as f64, p.balance)),
            &BLUE,
        ))?;

        if let Some(last) = self.points.last() {
            let at = ((self.points.len() - 1) as f64, last.balance);
            chart.draw_series(std::iter::once(
                EmptyElement::at(at)
                    + Circle::new((0, 0), 3, BLACK.filled())
                    + Text::new(
                        self.annotation.clone(),
                        (-40, -20),
                        ("sans-serif", 14).into_font(),
                    ),
            ))?;
        }

        root.present()?;
        Ok(())
    }

    /// Y-axis range with headroom; flat series get a unit band around the value.
    fn balance_range(&self) -> (f64, f64) {
        let (lo, hi) = self
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.balance), hi.max(p.balance))
            });
        if !lo.is_finite() || !hi.is_finite() {
            return (0.0, 1.0);
        }
        let pad = ((hi - lo) * 0.1).max(1.0);
        (lo - pad, hi + pad)
    }

    fn date_at(&self, x: f64) -> String {
        if x < 0.0 {
            return String::new();
        }
        self.points
            .get(x.round() as usize)
            .map(|p| p.date.clone())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
