use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, trace};

use ecrf_cli::config::Settings;
use ecrf_cli::logging::redact_value;
use ecrf_cli::workflow::{
    Destination, MapReport, MapRequest, list_sheets, load_catalog, run_map, study_overview,
};
use ecrf_core::ExportOptions;
use ecrf_ingest::DEFAULT_DELIMITER;

use crate::cli::MapArgs;
use crate::summary::{print_report, print_sheets, print_studies};

pub fn run_studies(catalog: Option<PathBuf>, settings: &Settings) -> Result<()> {
    let path = catalog.or_else(|| settings.catalog.clone());
    let catalog = load_catalog(path.as_deref())?;
    print_studies(&study_overview(&catalog));
    Ok(())
}

pub fn run_sheets(file: &Path) -> Result<()> {
    let sheets = list_sheets(file)?;
    print_sheets(&sheets);
    Ok(())
}

/// Runs `map` and returns the process exit code.
pub async fn run_map_command(
    args: MapArgs,
    catalog: Option<PathBuf>,
    settings: Settings,
) -> Result<i32> {
    let catalog_path = catalog.or(settings.catalog.clone());
    let catalog = load_catalog(catalog_path.as_deref())?;
    let json = args.json;
    let request = build_request(args, settings);
    debug!(?request, "resolved map request");

    let spinner = (!json).then(|| spinner(&format!("Mapping {}", request.input.display())));
    let result = run_map(catalog, &request).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let report = result?;

    trace_findings(&report);
    if json {
        let rendered = serde_json::to_string_pretty(&report).context("render JSON report")?;
        println!("{rendered}");
    } else {
        print_report(&report);
    }
    Ok(report.status.exit_code())
}

/// Merges flags over settings. Flags win.
fn build_request(args: MapArgs, settings: Settings) -> MapRequest {
    let destination = if args.dry_run {
        Destination::DryRun
    } else if let Some(path) = args.output {
        Destination::File(path)
    } else {
        Destination::Directory(
            args.output_dir
                .or(settings.output_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
        )
    };
    MapRequest {
        input: args.file,
        study: args.study.or(settings.default_study),
        sheet: args.sheet,
        delimiter: args
            .delimiter
            .or(settings.delimiter)
            .unwrap_or(DEFAULT_DELIMITER),
        add_fields: args.add_fields,
        remove_fields: args.remove_fields,
        assignments: args.assignments,
        validate: args.validate,
        export: ExportOptions {
            policy: args
                .policy
                .map_or(settings.export_policy, Into::into),
            correct_values: args.correct_values || settings.correct_values,
        },
        destination,
    }
}

fn trace_findings(report: &MapReport) {
    let Some(result) = &report.validation else {
        return;
    };
    for error in &result.errors {
        trace!(
            row = error.row_index,
            field = %error.field,
            value = redact_value(error.value.as_deref().unwrap_or_default()),
            message = %error.message,
            "validation finding"
        );
    }
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
