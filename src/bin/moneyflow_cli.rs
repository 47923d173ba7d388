use std::{
    env, fs,
    io::{self, Read},
    process,
};

use colored::Colorize;
use moneyflow_core::{
    config::{ConfigManager, ViewportClass},
    init,
    render::svg::render_document,
    utils::build_info,
    FlowInput, FlowPipeline,
};

const DESKTOP_SIZE: (f64, f64) = (960.0, 600.0);
const NARROW_SIZE: (f64, f64) = (360.0, 480.0);

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    });

    if command == "version" {
        println!("{}", build_info::current().summary());
        return Ok(());
    }
    if command != "graph" && command != "svg" {
        print_usage();
        process::exit(1);
    }

    let mut source = None;
    let mut viewport = ViewportClass::Desktop;
    for arg in args {
        if arg == "--narrow" {
            viewport = ViewportClass::Narrow;
        } else if source.is_none() {
            source = Some(arg);
        } else {
            print_usage();
            process::exit(1);
        }
    }
    let source = source.unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    });

    let input = read_input(&source)?;
    let mut config = ConfigManager::new()?.load()?;
    config.layout = config.layout.with_viewport(viewport);
    let (width, height) = match viewport {
        ViewportClass::Desktop => DESKTOP_SIZE,
        ViewportClass::Narrow => NARROW_SIZE,
    };

    let locale = config.locale.clone();
    let pipeline = FlowPipeline::new(config)?;
    let result = pipeline.run(&input, width, height);

    if let Some(warning) = &result.graph.warning {
        eprintln!("{} {}", "Warning:".yellow().bold(), warning);
    }
    if result.graph.is_empty() {
        eprintln!("{}", "Not enough data to draw a flow diagram.".yellow());
    }

    match command.as_str() {
        "graph" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print!(
            "{}",
            render_document(&result.graph, &result.layout, width, height, &locale)
        ),
    }
    Ok(())
}

fn read_input(source: &str) -> Result<FlowInput, Box<dyn std::error::Error>> {
    let data = if source == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(source)?
    };
    Ok(serde_json::from_str(&data)?)
}

fn print_usage() {
    eprintln!(
        "Usage: moneyflow_cli <command>\n\
         Commands:\n  \
         graph <input.json|-> [--narrow]\n  \
         svg <input.json|-> [--narrow]\n  \
         version"
    );
}
