//! `logscope analyze` command handler

use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use logscope_core::config::LogScopeConfig;
use logscope_log_analysis::{AnalysisReport, LogAnalyzer, read_lines, write_csv_file};

use crate::cli::AnalyzeArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `analyze` command.
///
/// Reads the log source, runs the analysis, renders the report and
/// writes the CSV results file unless disabled.
pub async fn execute(
    args: AnalyzeArgs,
    config: &LogScopeConfig,
    writer: &OutputWriter,
) -> Result<AnalysisReport, CliError> {
    let plan = AnalyzePlan::resolve(args, config);

    info!(
        source = %plan.source.display(),
        threshold = plan.threshold,
        "starting access log analysis"
    );

    let lines = read_lines(&plan.source).await?;
    let analyzer = LogAnalyzer::new(plan.threshold)?;
    let report = analyzer.analyze(&lines);

    writer.render(&report)?;

    if let Some(csv_path) = &plan.csv_output {
        write_csv_file(&report, csv_path).await?;
    }

    info!(
        clients = report.requests_per_client.len(),
        suspicious = report.suspicious_clients.len(),
        "analysis finished"
    );

    Ok(report)
}

/// Effective analyze settings after merging CLI flags over configuration.
#[derive(Debug, PartialEq, Eq)]
struct AnalyzePlan {
    source: PathBuf,
    threshold: u64,
    csv_output: Option<PathBuf>,
}

impl AnalyzePlan {
    fn resolve(args: AnalyzeArgs, config: &LogScopeConfig) -> Self {
        let analysis = &config.analysis;

        let csv_output = if args.no_csv {
            None
        } else if let Some(path) = args.csv {
            Some(path)
        } else if analysis.csv_enabled {
            Some(PathBuf::from(&analysis.csv_output))
        } else {
            None
        };

        Self {
            source: args
                .log_file
                .unwrap_or_else(|| PathBuf::from(&analysis.source_path)),
            threshold: args.threshold.unwrap_or(analysis.failed_login_threshold),
            csv_output,
        }
    }
}

impl Render for AnalysisReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "{}", "Requests per IP:".bold())?;
        writeln!(w, "{:<20} {}", "IP Address", "Request Count")?;
        for (client, count) in self.requests_per_client.sorted_by_count_desc() {
            writeln!(w, "{:<20} {}", client, count)?;
        }

        writeln!(w)?;
        writeln!(w, "{}", "Most Accessed Endpoint:".bold())?;
        writeln!(
            w,
            "{} (Accessed {} times)",
            self.top_endpoint.endpoint.as_deref().unwrap_or("None"),
            self.top_endpoint.count
        )?;

        writeln!(w)?;
        if self.has_suspicious_activity() {
            writeln!(w, "{}", "Suspicious Activity Detected:".red().bold())?;
            writeln!(w, "{:<20} {}", "IP Address", "Failed Login Attempts")?;
            for (client, count) in self.suspicious_clients.iter() {
                writeln!(w, "{:<20} {}", client, count)?;
            }
        } else {
            writeln!(w, "{}", "No suspicious activity detected.".green())?;
        }

        Ok(())
    }
}
