use console::style;
use std::path::Path;
use treeprune_lib::{RealFileSystem, RestoreEngine, Result};

pub fn handle_restore_command(root: &Path, trash: &Path, quiet: bool) -> Result<()> {
    if !quiet {
        println!(
            "{} Restoring {} into {}",
            style(">>>").cyan(),
            trash.display(),
            root.display()
        );
    }

    let stats = RestoreEngine::new(&RealFileSystem, trash).restore(root)?;

    if !quiet {
        println!("{} Restore complete", style("✓").green());
        println!("  Files restored: {}", style(stats.files_restored).green());
    }

    Ok(())
}
