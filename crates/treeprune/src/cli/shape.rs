use console::style;
use treeprune_lib::{runtime_shape, Platform, Result};

pub fn handle_shape_command(platform: Option<Platform>) -> Result<()> {
    let platform = match platform {
        Some(platform) => platform,
        None => super::host_platform()?,
    };
    let shape = runtime_shape(platform);

    println!("{} Runtime shape for {}", style(">>>").cyan(), style(platform).bold());
    println!("{}", style("keep:").green());
    for pattern in &shape.accept {
        println!("  {}", pattern);
    }
    println!("{}", style("delete:").red());
    for pattern in &shape.reject {
        println!("  {}", pattern);
    }

    Ok(())
}
