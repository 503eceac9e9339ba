use crate::analyzers::{TrafficProfile, TrafficReport};
use crate::models::NumericColumn;
use crate::processors::{CorrelationTable, GroupedMeans, Summary};
use crate::render::charts::{bar_chart, histogram_chart, scatter_plot};
use crate::utils::constants::SCATTER_ROWS;
use crate::utils::AnalysisSettings;

/// Renders analysis results as plain text with character charts
pub struct TextRenderer {
    settings: AnalysisSettings,
}

impl TextRenderer {
    pub fn new(settings: AnalysisSettings) -> Self {
        Self { settings }
    }

    pub fn render_report(&self, report: &TrafficReport) -> String {
        let mut out = String::new();

        out.push_str("=== Traffic Volume Analysis ===\n");
        out.push_str(&format!(
            "Records: {} hourly observations, {} to {}\n\n",
            report.total_records, report.first_timestamp, report.last_timestamp
        ));

        out.push_str(&self.render_profile("Traffic Volume: All Hours", &report.overall));
        out.push_str(&self.render_profile("Traffic Volume: Day (07:00-19:00)", &report.day));
        out.push_str(&self.render_profile("Traffic Volume: Night (19:00-07:00)", &report.night));

        out.push_str(&self.render_grouped(
            "Day Traffic by Month",
            &report.day_by_month,
            &[NumericColumn::TrafficVolume],
        ));
        out.push_str(&self.render_grouped(
            &format!("Day Traffic by Year (month {})", report.focus_month),
            &report.focus_month_by_year,
            &[NumericColumn::TrafficVolume],
        ));
        out.push_str(&self.render_grouped(
            "Day Traffic by Day of Week",
            &report.day_by_weekday,
            &[NumericColumn::TrafficVolume],
        ));
        out.push_str(&self.render_grouped(
            "Traffic by Hour: Monday-Friday",
            &report.business_by_hour,
            &[NumericColumn::TrafficVolume],
        ));
        out.push_str(&self.render_grouped(
            "Traffic by Hour: Weekend",
            &report.weekend_by_hour,
            &[NumericColumn::TrafficVolume],
        ));

        out.push_str(&self.render_correlations(
            "Day Correlations with Traffic Volume",
            &report.day_correlations,
        ));

        out.push_str("--- Temperature (K) vs Traffic Volume: Day ---\n");
        let points: Vec<(f64, f64)> = report
            .temperature_scatter
            .iter()
            .map(|p| (p.traffic_volume, p.temp))
            .collect();
        out.push_str(&scatter_plot(
            &points,
            (self.settings.scatter_temp_min, self.settings.scatter_temp_max),
            self.settings.chart_width,
            SCATTER_ROWS,
        ));
        out.push('\n');

        out.push_str(&self.render_grouped(
            "Day Traffic by Weather Type",
            &report.day_by_weather_main,
            &[NumericColumn::TrafficVolume],
        ));
        out.push_str(&self.render_grouped(
            "Day Traffic by Weather Description",
            &report.day_by_weather_description,
            &[NumericColumn::TrafficVolume],
        ));

        out.push_str(&format!(
            "--- Heavy Traffic Indicators (mean > {:.0} vehicles/hour) ---\n",
            report.heavy_traffic_threshold
        ));
        if report.indicators.is_empty() {
            out.push_str("  none\n");
        }
        for indicator in &report.indicators {
            out.push_str(&format!(
                "  {:?} {}: {} ({:.0}, {} records)\n",
                indicator.subset,
                indicator.key,
                indicator.display_label,
                indicator.mean_traffic,
                indicator.records
            ));
        }

        out
    }

    pub fn render_profile(&self, title: &str, profile: &TrafficProfile) -> String {
        let mut out = format!("--- {} ---\n", title);

        match &profile.summary {
            Some(summary) => out.push_str(&render_summary(summary)),
            None => out.push_str("  no records\n"),
        }

        if let Some(histogram) = &profile.histogram {
            out.push_str("  Frequency:\n");
            out.push_str(&histogram_chart(histogram, self.settings.chart_width));
        }

        out.push('\n');
        out
    }

    /// Table of group means followed by a bar chart of the first column
    pub fn render_grouped(
        &self,
        title: &str,
        grouped: &GroupedMeans,
        columns: &[NumericColumn],
    ) -> String {
        let mut out = format!("--- {} ---\n", title);

        if grouped.is_empty() {
            out.push_str("  no groups\n\n");
            return out;
        }

        let label_width = grouped
            .groups
            .iter()
            .map(|g| grouped.key.describe_label(&g.label).chars().count())
            .max()
            .unwrap_or(0)
            .max(grouped.key.display_name().len());

        out.push_str(&format!(
            "  {:<label_width$} {:>8}",
            grouped.key.display_name(),
            "records",
            label_width = label_width
        ));
        for column in columns {
            out.push_str(&format!(" {:>14}", column.name()));
        }
        out.push('\n');

        for group in &grouped.groups {
            out.push_str(&format!(
                "  {:<label_width$} {:>8}",
                grouped.key.describe_label(&group.label),
                group.count,
                label_width = label_width
            ));
            for column in columns {
                match group.mean(*column) {
                    Some(value) => out.push_str(&format!(" {:>14.2}", value)),
                    None => out.push_str(&format!(" {:>14}", "-")),
                }
            }
            if let Some(summary) = &group.summary {
                out.push_str(&format!(
                    "   [q1 {:.0}, median {:.0}, q3 {:.0}]",
                    summary.q1, summary.median, summary.q3
                ));
            }
            out.push('\n');
        }

        if let Some(column) = columns.first() {
            let rows: Vec<(String, f64)> = grouped
                .groups
                .iter()
                .filter_map(|g| {
                    g.mean(*column)
                        .map(|m| (grouped.key.describe_label(&g.label), m))
                })
                .collect();
            out.push('\n');
            out.push_str(&bar_chart(&rows, self.settings.chart_width));

            if let Some(peak) = grouped.peak(*column) {
                out.push_str(&format!(
                    "  peak: {} ({:.1})\n",
                    grouped.key.describe_label(&peak.label),
                    peak.mean(*column).unwrap_or_default()
                ));
            }
        }

        out.push('\n');
        out
    }

    pub fn render_correlations(&self, title: &str, table: &CorrelationTable) -> String {
        let mut out = format!("--- {} ({} records) ---\n", title, table.sample_size);

        for entry in &table.entries {
            out.push_str(&format!(
                "  {:<15} {:>+8.4}\n",
                entry.column.name(),
                entry.coefficient
            ));
        }

        let undefined: Vec<&str> = NumericColumn::ALL
            .iter()
            .filter(|c| table.get(**c).is_none())
            .map(|c| c.name())
            .collect();
        if !undefined.is_empty() {
            out.push_str(&format!("  undefined: {}\n", undefined.join(", ")));
        }

        if let Some(strongest) = table.strongest() {
            out.push_str(&format!(
                "  strongest: {} ({:+.2})\n",
                strongest.column, strongest.coefficient
            ));
        }

        out.push('\n');
        out
    }
}

fn render_summary(summary: &Summary) -> String {
    let std_dev = summary
        .std_dev
        .map_or_else(|| "-".to_string(), |s| format!("{:.2}", s));

    format!(
        "  count {}\n  mean  {:.2}\n  std   {}\n  min   {:.2}\n  25%   {:.2}\n  50%   {:.2}\n  75%   {:.2}\n  max   {:.2}\n",
        summary.count,
        summary.mean,
        std_dev,
        summary.min,
        summary.q1,
        summary.median,
        summary.q3,
        summary.max
    )
}
