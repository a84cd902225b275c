//! Text (terminal) reporter

use super::{MetricsSection, Report};
use crate::classifier::{ConfusionMatrix, InformativeFeature, Metrics, MetricsSpread};
use crate::models::Label;
use anyhow::Result;
use console::style;
use std::fmt::Write;

const LABEL_WIDTH: usize = 14;
const COLUMN_WIDTH: usize = 14;

/// Render report as aligned terminal tables
pub fn render(report: &Report) -> Result<String> {
    let mut out = String::new();

    write!(out, "{}", style(format!("seed {}", report.seed)).dim())?;
    if let Some(n) = report.repetitions {
        write!(out, "{}", style(format!("  repetitions {}", n)).dim())?;
    }
    out.push('\n');

    for section in &report.sections {
        render_section(&mut out, section)?;
    }

    if !report.informative.is_empty() {
        render_informative(&mut out, &report.informative)?;
    }

    Ok(out)
}

fn render_section(out: &mut String, section: &MetricsSection) -> Result<()> {
    writeln!(out)?;
    write!(out, "{}", style(&section.title).bold())?;
    if let (Some(train), Some(test)) = (section.train_size, section.test_size) {
        write!(out, "  {}", style(format!("(train {}, test {})", train, test)).dim())?;
    }
    writeln!(out)?;
    writeln!(out, "{}", style(rule()).dim())?;

    if !section.hide_metrics {
        render_metrics(out, &section.metrics)?;
    }
    if let Some(spread) = &section.spread {
        render_spread(out, spread)?;
    }
    if let Some(confusion) = &section.confusion {
        render_confusion(out, confusion)?;
    }
    Ok(())
}

fn rule() -> String {
    "─".repeat(LABEL_WIDTH + COLUMN_WIDTH * Label::ALL.len())
}

fn header_row(out: &mut String) -> Result<()> {
    write!(out, "{:LABEL_WIDTH$}", "")?;
    for label in Label::ALL {
        write!(out, "{:>COLUMN_WIDTH$}", label.to_string())?;
    }
    writeln!(out)?;
    Ok(())
}

fn render_metrics(out: &mut String, metrics: &Metrics) -> Result<()> {
    header_row(out)?;
    for (name, values) in metrics.named_arrays() {
        write!(out, "{:LABEL_WIDTH$}", name)?;
        for value in values {
            let cell = if name == "support" {
                format_support(value)
            } else {
                format!("{:.4}", value)
            };
            write!(out, "{:>COLUMN_WIDTH$}", cell)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Whole supports print as counts, averaged supports keep two decimals
fn format_support(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn render_spread(out: &mut String, spread: &MetricsSpread) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style("Spread across repetitions").bold())?;
    header_row(out)?;
    let rows = spread
        .min
        .named_arrays()
        .into_iter()
        .zip(spread.max.named_arrays())
        .zip(spread.std_dev.named_arrays());
    for (((name, min), (_, max)), (_, std_dev)) in rows {
        if name == "support" {
            continue;
        }
        write!(out, "{:LABEL_WIDTH$}", name)?;
        for i in 0..Label::ALL.len() {
            let cell = format!("{:.2}..{:.2}", min[i], max[i]);
            write!(out, "{:>COLUMN_WIDTH$}", cell)?;
        }
        writeln!(out)?;
        write!(out, "{:LABEL_WIDTH$}", "  std dev")?;
        for value in std_dev {
            write!(out, "{:>COLUMN_WIDTH$}", format!("{:.4}", value))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn render_confusion(out: &mut String, confusion: &ConfusionMatrix) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{} {}",
        style("Confusion matrix").bold(),
        style("(rows = true, columns = predicted)").dim()
    )?;
    header_row(out)?;
    for truth in Label::ALL {
        write!(out, "{:LABEL_WIDTH$}", truth.to_string())?;
        for predicted in Label::ALL {
            let count = confusion.get(truth, predicted);
            let cell = format!("{:>COLUMN_WIDTH$}", count);
            if truth == predicted {
                write!(out, "{}", style(cell).green())?;
            } else {
                write!(out, "{}", style(cell).red())?;
            }
        }
        writeln!(out)?;
    }
    writeln!(
        out,
        "{:LABEL_WIDTH$}{}",
        "accuracy",
        style(format!("{:.4}", confusion.accuracy())).bold()
    )?;
    Ok(())
}

fn render_informative(out: &mut String, features: &[InformativeFeature]) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style("Most informative features").bold())?;
    let width = features.iter().map(|f| f.name.len()).max().unwrap_or(0);
    for feature in features {
        let other = match feature.favours {
            Label::Explicit => Label::NotExplicit,
            Label::NotExplicit => Label::Explicit,
        };
        writeln!(
            out,
            "  {:>width$} = {:<3} {:>12} : {:<12} = {:>8.1} : 1.0",
            feature.name,
            feature.value,
            feature.favours.to_string(),
            other.to_string(),
            feature.ratio,
            width = width
        )?;
    }
    Ok(())
}
