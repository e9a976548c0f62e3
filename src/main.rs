use log::{debug, error, info};
use std::env;
use std::fs;
use std::process::ExitCode;

use recipe_form::{render_summary, submit_json, FormConfig};

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::init();

    // Get the draft path from command-line arguments
    let args: Vec<String> = env::args().collect();
    let path = args
        .get(1)
        .ok_or("Please provide the path of a recipe draft JSON file as an argument")?;

    let config = FormConfig::load()?;
    debug!("{:#?}", config);

    let json = fs::read_to_string(path)?;
    let form = submit_json(&json, &config)?;

    match form.submitted() {
        Some(record) => {
            info!("Accepted recipe from {}", path);
            println!("{}", render_summary(record));
            Ok(ExitCode::SUCCESS)
        }
        None => {
            error!(
                "Recipe in {} has {} validation error(s)",
                path,
                form.errors().error_count()
            );
            println!("{}", serde_json::to_string_pretty(form.errors())?);
            Ok(ExitCode::FAILURE)
        }
    }
}
