use indicatif::{ProgressBar, ProgressStyle};

pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{pos} files]")
            .expect("Failed to create spinner template"),
    );
    spinner.set_message(message.to_string());
    spinner
}
