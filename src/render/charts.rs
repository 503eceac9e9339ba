//! Character-based charts for terminal output.

use crate::processors::Histogram;

const BAR: char = '█';
const POINT: char = '·';
const DENSE_POINT: char = '•';

/// Horizontal bar chart, bars scaled so the largest value fills `width`.
///
/// Negative values are drawn as empty bars.
pub fn bar_chart(rows: &[(String, f64)], width: usize) -> String {
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max_value = rows
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    for (label, value) in rows {
        let length = scaled_length(*value, max_value, width);
        out.push_str(&format!(
            "  {:<label_width$} | {} {:.1}\n",
            label,
            BAR.to_string().repeat(length),
            value,
            label_width = label_width
        ));
    }
    out
}

/// Vertical listing of histogram bins with bar lengths proportional to counts
pub fn histogram_chart(histogram: &Histogram, width: usize) -> String {
    let max_count = histogram.max_count() as f64;

    let mut out = String::new();
    for bin in &histogram.bins {
        let length = scaled_length(bin.count as f64, max_count, width);
        out.push_str(&format!(
            "  {:>9.1} - {:<9.1} | {} {}\n",
            bin.lower,
            bin.upper,
            BAR.to_string().repeat(length),
            bin.count
        ));
    }
    out
}

/// Scatter plot on a character grid; points outside the y range are left out
pub fn scatter_plot(
    points: &[(f64, f64)],
    y_range: (f64, f64),
    width: usize,
    height: usize,
) -> String {
    if points.is_empty() || width == 0 || height == 0 {
        return String::new();
    }

    let (y_min, y_max) = y_range;
    let visible: Vec<(f64, f64)> = points
        .iter()
        .copied()
        .filter(|(_, y)| (y_min..=y_max).contains(y))
        .collect();
    let hidden = points.len() - visible.len();

    let (x_min, x_max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (x, _)| {
            (lo.min(*x), hi.max(*x))
        });
    let x_span = if x_max > x_min { x_max - x_min } else { 1.0 };
    let y_span = y_max - y_min;

    let mut counts = vec![vec![0usize; width]; height];
    for (x, y) in &visible {
        let column = (((x - x_min) / x_span) * (width - 1) as f64).round() as usize;
        let row = (((y - y_min) / y_span) * (height - 1) as f64).round() as usize;
        counts[height - 1 - row.min(height - 1)][column.min(width - 1)] += 1;
    }

    let mut out = String::new();
    for (i, row) in counts.iter().enumerate() {
        let y_label = if i == 0 {
            format!("{:>7.1}", y_max)
        } else if i == height - 1 {
            format!("{:>7.1}", y_min)
        } else {
            " ".repeat(7)
        };
        let line: String = row
            .iter()
            .map(|&n| match n {
                0 => ' ',
                1..=3 => POINT,
                _ => DENSE_POINT,
            })
            .collect();
        out.push_str(&format!("  {} |{}\n", y_label, line.trim_end()));
    }
    out.push_str(&format!("  {} +{}\n", " ".repeat(7), "-".repeat(width)));
    out.push_str(&format!(
        "  {}  {:<half$}{:>half$}\n",
        " ".repeat(7),
        format!("{:.0}", x_min),
        format!("{:.0}", x_max),
        half = width / 2
    ));

    if hidden > 0 {
        out.push_str(&format!(
            "  ({} points outside {:.0}..{:.0} not shown)\n",
            hidden, y_min, y_max
        ));
    }
    out
}

fn scaled_length(value: f64, max_value: f64, width: usize) -> usize {
    if max_value <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max_value) * width as f64).round() as usize
}
