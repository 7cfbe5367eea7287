use comfy_table::{presets::UTF8_FULL, Table};
use console::style;
use std::path::PathBuf;
use treeprune_lib::{build_classifier, CommandList, Platform, PruneConfig, Result, Settings};

pub fn handle_check_command(
    config_path: Option<PathBuf>,
    platform: Option<Platform>,
    quiet: bool,
) -> Result<()> {
    let platform = match platform {
        Some(platform) => platform,
        None => super::host_platform()?,
    };

    let cwd = std::env::current_dir()?;
    let settings = Settings::new(&cwd, config_path, Some(cwd.join("trash")))?;
    let path = settings.require_config_path()?;
    let config = PruneConfig::from_file(path)?;

    if config.skip {
        if !quiet {
            println!("{} Prune step is skipped by {}", style("✓").green(), path.display());
        }
        return Ok(());
    }

    let post_prune = config.post_prune.as_deref().unwrap_or(&[]);
    let checked = build_classifier(&config, platform)
        .and_then(|classifier| Ok((classifier, CommandList::new(post_prune, platform)?)));
    let (classifier, commands) = match checked {
        Ok(checked) => checked,
        Err(e) => {
            eprintln!("{} {}", style("✗").red(), e);
            return Err(e);
        }
    };

    if quiet {
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Layer", "Keep", "Delete"]);
    for layer in classifier.layers() {
        table.add_row(vec![
            layer.source().to_string(),
            layer.accept().len().to_string(),
            layer.reject().len().to_string(),
        ]);
    }

    println!("{}", table);
    for command in commands.commands() {
        println!("  post-prune: {}", command);
    }
    println!(
        "{} {} active layers for {}",
        style("✓").green(),
        classifier.layers().len(),
        style(platform).bold()
    );

    Ok(())
}
