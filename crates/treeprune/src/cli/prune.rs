use crate::util::{create_spinner, format_bytes, format_duration};
use comfy_table::{presets::UTF8_FULL, Table};
use console::style;
use std::path::PathBuf;
use std::time::Instant;
use treeprune_lib::{
    EngineOptions, PruneConfig, PruneEngine, PruneReport, RealFileSystem, Result, Settings,
};

pub struct PruneArgs {
    pub root: PathBuf,
    pub config: Option<PathBuf>,
    pub trash: Option<PathBuf>,
    pub dry_run: bool,
    pub log: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

pub fn handle_prune_command(args: PruneArgs, verbose: bool, quiet: bool) -> Result<()> {
    let platform = super::host_platform()?;
    let settings = Settings::new(&args.root, args.config.clone(), args.trash.clone())?;
    let config = PruneConfig::from_file(settings.require_config_path()?)?;

    if !quiet {
        let mode = if config.skip {
            " (skipping)"
        } else if args.dry_run {
            " (dry run)"
        } else {
            ""
        };
        println!(
            "{} Prune step{} for {}",
            style(">>>").cyan(),
            mode,
            style(platform).bold()
        );
    }

    let spinner = if verbose || quiet {
        None
    } else {
        Some(create_spinner("Pruning files"))
    };

    let started = Instant::now();
    let mut engine = PruneEngine::new(
        &RealFileSystem,
        config,
        platform,
        &settings.trash_root,
        EngineOptions {
            dry_run: args.dry_run,
        },
    );
    let result = engine.run_with(&args.root, |_| {
        if let Some(pb) = &spinner {
            pb.inc(1);
        }
    });

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} {}", style("✗").red(), e);
            if let Some(partial) = engine.partial_report() {
                write_outputs(partial, &args)?;
            }
            if !args.dry_run {
                eprintln!(
                    "  Files pruned so far remain under {}",
                    settings.trash_root.display()
                );
            }
            return Err(e);
        }
    };

    write_outputs(&report, &args)?;

    if !quiet {
        print_summary(&report, started.elapsed());
        for (name, value) in engine.variables() {
            println!("  {}={}", name, value);
        }
    }

    Ok(())
}

fn write_outputs(report: &PruneReport, args: &PruneArgs) -> Result<()> {
    if let Some(path) = &args.log {
        report.write_log(path)?;
    }
    if let Some(path) = &args.report {
        report.write_json(path)?;
    }
    Ok(())
}

fn print_summary(report: &PruneReport, elapsed: std::time::Duration) {
    if report.skipped {
        println!("{} Prune skipped by configuration", style("✓").green());
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Kept files".to_string(), report.kept_count().to_string()]);
    table.add_row(vec!["Pruned files".to_string(), report.pruned_count().to_string()]);
    table.add_row(vec!["Pruned size".to_string(), format_bytes(report.pruned_bytes())]);
    table.add_row(vec![
        "Empty directories removed".to_string(),
        report.empty_dirs_removed.to_string(),
    ]);
    table.add_row(vec![
        "Symlinks removed".to_string(),
        report.symlinks_removed.to_string(),
    ]);
    table.add_row(vec![
        "Trash directory".to_string(),
        report.trash_root.display().to_string(),
    ]);
    if !report.commands_run.is_empty() {
        table.add_row(vec![
            "Post-prune commands".to_string(),
            report.commands_run.len().to_string(),
        ]);
    }
    table.add_row(vec!["Duration".to_string(), format_duration(elapsed)]);

    println!("{}", table);

    if report.dry_run {
        println!("{} Dry run: no files were moved", style("!").yellow());
    } else {
        println!("{} Prune complete", style("✓").green());
    }
}
