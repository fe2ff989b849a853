use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, anyhow};
use log::{info, warn};
use plotters::prelude::*;

use crate::{historic::WINS_COLUMN, record_set::RecordSet};

const CHART_SIZE: (u32, u32) = (800, 600);

/// `(wins, value)` pairs of `metric`, skipping rows where either is missing.
pub fn curve(records: &RecordSet, metric: &str) -> Option<Vec<(f64, f64)>> {
    let wins = records.column_index(WINS_COLUMN).ok()?;
    let values = records.column_index(metric).ok()?;
    Some(
        records
            .rows()
            .iter()
            .filter_map(|row| Some((row[wins].as_number()?, row[values].as_number()?)))
            .collect(),
    )
}

pub fn chart_path(dir: &Path, metric: &str) -> PathBuf {
    dir.join(format!("{}_vs_wins.png", metric.replace('/', "_")))
}

/// Draws one chart per metric: the averaged curve plus, when the smoothed
/// reference has the metric, the smoothed curve.
pub fn render_charts(
    dir: &Path,
    averages: &RecordSet,
    smoothed: &RecordSet,
    metrics: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let mut written = Vec::with_capacity(metrics.len());
    for metric in metrics {
        let average = curve(averages, metric).unwrap_or_default();
        if average.is_empty() {
            warn!("no averaged values for '{metric}'; skipping its chart");
            continue;
        }
        let reference = curve(smoothed, metric);
        let path = chart_path(dir, metric);
        draw_metric_chart(&path, metric, &average, reference.as_deref())
            .map_err(|e| anyhow!("failed to draw {}: {e}", path.display()))?;
        written.push(path);
    }
    info!("Saved {} charts to {}", written.len(), dir.display());
    Ok(written)
}

fn axis_range(values: impl Iterator<Item = f64>) -> std::ops::Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    (lo - pad)..(hi + pad)
}

fn draw_metric_chart(
    path: &Path,
    metric: &str,
    average: &[(f64, f64)],
    smoothed: Option<&[(f64, f64)]>,
) -> Result<(), Box<dyn Error>> {
    let all_points = || average.iter().chain(smoothed.unwrap_or_default());
    let x_range = axis_range(all_points().map(|(x, _)| *x));
    let y_range = axis_range(all_points().map(|(_, y)| *y));

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Line Graph of {metric} vs Wins"), ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;
    chart
        .configure_mesh()
        .x_desc("Wins")
        .y_desc(metric)
        .draw()?;

    chart
        .draw_series(LineSeries::new(average.iter().copied(), BLUE.stroke_width(2)))?
        .label(format!("Avg {metric}"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
    chart.draw_series(
        average
            .iter()
            .map(|&point| Circle::new(point, 4, BLUE.filled())),
    )?;

    if let Some(smoothed) = smoothed {
        chart
            .draw_series(DashedLineSeries::new(
                smoothed.iter().copied(),
                8,
                4,
                RED.stroke_width(2),
            ))?
            .label(format!("Smoothed {metric}"))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
        chart.draw_series(
            smoothed
                .iter()
                .map(|&point| Cross::new(point, 4, RED.stroke_width(2))),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_set::Cell;

    fn averages() -> RecordSet {
        let mut r = RecordSet::new(vec!["wins".into(), "ypc".into()]);
        r.push_row(vec![Cell::Number(3.0), Cell::Number(3.9)]).unwrap();
        r.push_row(vec![Cell::Number(4.0), Cell::Missing]).unwrap();
        r.push_row(vec![Cell::Number(9.0), Cell::Number(4.6)]).unwrap();
        r
    }

    #[test]
    fn curve_skips_missing_points() {
        assert_eq!(curve(&averages(), "ypc"), Some(vec![(3.0, 3.9), (9.0, 4.6)]));
        assert_eq!(curve(&averages(), "Rate"), None);
    }

    #[test]
    fn chart_file_names() {
        assert_eq!(
            chart_path(Path::new("graphs"), "Pen_per_snap"),
            PathBuf::from("graphs/Pen_per_snap_vs_wins.png")
        );
    }

    #[test]
    fn axis_range_pads_flat_series() {
        let r = axis_range([5.0, 5.0].into_iter());
        assert_eq!(r, 4.0..6.0);
    }
}
