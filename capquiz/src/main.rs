//! Name-the-capital quiz CLI.
//!
//! A line-oriented front-end over the quiz engine. It plays the same
//! conversation a voice host would: greeting, difficulty selection, then
//! country prompts until a wrong answer ends the game.
//!
//! ```bash
//! cargo run -p capquiz -- --locale ru --name Alex
//! ```

mod repl;
mod router;

use capquiz_core::{CountryDataset, Locale};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let options = parse_options(&args);
    let locale = Locale::from_tag(&options.locale);

    let dataset = match &options.data {
        Some(path) => CountryDataset::load_json(path).await?,
        None => CountryDataset::builtin().clone(),
    };

    repl::run(&dataset, locale, options.user_name)?;
    Ok(())
}

struct Options {
    locale: String,
    data: Option<String>,
    user_name: Option<String>,
}

/// Parse command line options.
fn parse_options(args: &[String]) -> Options {
    let mut options = Options {
        locale: "en".to_string(),
        data: None,
        user_name: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--locale" => {
                if let Some(tag) = args.get(i + 1) {
                    options.locale = tag.clone();
                    i += 1;
                }
            }
            "--data" => {
                if let Some(path) = args.get(i + 1) {
                    options.data = Some(path.clone());
                    i += 1;
                }
            }
            "--name" => {
                if let Some(name) = args.get(i + 1) {
                    options.user_name = Some(name.clone());
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    options
}

fn print_help() {
    println!("capquiz - name-the-capital quiz");
    println!();
    println!("USAGE:");
    println!("  capquiz [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  --locale <tag>   Content locale (any ru* tag plays in Russian; default en)");
    println!("  --data <path>    Country dataset JSON file (default: built-in dataset)");
    println!("  --name <name>    Skip the name question and greet you by name");
    println!("  --help, -h       Show this help");
}
