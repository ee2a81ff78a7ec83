use clap::{Arg, ArgAction, Command};
use colored::*;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use gifforge::{build_plan, export, ExportSettings, FrameList, DELAY_OPTIONS, SETTINGS_FILE};

fn main() {
    env_logger::init();

    let matches = Command::new("gifforge")
        .version("0.1.0")
        .about("Assemble a directory of still images into an animated GIF")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("DIR")
                .help("Input directory containing source images")
                .default_value("gif"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output GIF path")
                .default_value("output/animation.gif"),
        )
        .arg(
            Arg::new("delay")
                .short('d')
                .long("delay")
                .value_name("SECONDS")
                .help("Per-frame delay in seconds: 0.1, 0.3, 0.5, 1.0 or 2.0 (default: the persisted setting)"),
        )
        .arg(
            Arg::new("random")
                .short('r')
                .long("random")
                .action(ArgAction::SetTrue)
                .help("Shuffle the frame order before encoding"),
        )
        .get_matches();

    let input = matches.get_one::<String>("input").unwrap();
    let output = matches.get_one::<String>("output").unwrap();
    let delay = matches.get_one::<String>("delay");
    let random = matches.get_flag("random");

    if let Err(err) = run(input, output, delay, random) {
        eprintln!("{}: {}", "Error".red().bold(), err);
        process::exit(1);
    }
}

fn run(
    input: &str,
    output: &str,
    delay_arg: Option<&String>,
    random: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings_path = Path::new(SETTINGS_FILE);
    let mut settings = ExportSettings::load_or_default(settings_path);

    // CLI arguments override the persisted preferences for this run.
    if let Some(raw) = delay_arg {
        let delay = raw
            .parse::<f64>()
            .map_err(|_| format!("invalid delay value: {}", raw))?;
        if !DELAY_OPTIONS.contains(&delay) {
            return Err(format!("delay must be one of {:?} seconds", DELAY_OPTIONS).into());
        }
        settings.delay = delay;
    }
    if random {
        settings.random_order = true;
    }

    let frames = FrameList::scan(Path::new(input))?;
    if frames.is_empty() {
        println!(
            "{}: add images to '{}' to build a GIF",
            "No frames found".yellow(),
            input
        );
        return Ok(());
    }

    println!("{} {} image files", "Found".bold().blue(), frames.len());
    for path in frames.paths() {
        println!("  {}", path.display());
    }
    println!("{}", "Encoding with settings:".bold().cyan());
    println!("  {}: {}s per frame", "Delay".green(), settings.delay);
    println!(
        "  {}: {}",
        "Random order".green(),
        if settings.random_order { "yes" } else { "no" }
    );

    let start_time = Instant::now();

    let plan = build_plan(&frames, &settings)?;

    let dest = PathBuf::from(output);
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    export(&plan, &dest)?;
    settings.save(settings_path);

    println!(
        "{}: {}",
        "GIF created successfully".bold().green(),
        dest.display()
    );
    println!("{}: {:.2?}", "Processing time".blue(), start_time.elapsed());
    Ok(())
}
