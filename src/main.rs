use anyhow::Context;
use clap::{Arg, ArgAction, Command};
use log::LevelFilter;
use phish_lens::config::Config;
use phish_lens::extraction::{compose_input, InputSource, TextExtractor};
use phish_lens::report;
use phish_lens::Analyzer;
use std::io::Read;
use std::path::Path;
use std::process;
use std::str::FromStr;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let matches = Command::new("phish-lens")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Offline phishing and social-engineering risk scoring for documents")
        .long_about(
            "phish-lens scores pasted text and files for likely phishing intent using\n\
             local heuristics only. No network lookups are performed:\n\
             • URL, email and domain extraction with IDN/punycode decoding\n\
             • Urgency language, shorteners, suspicious TLDs and brand lookalikes\n\
             • Sender / Reply-To consistency and sensitive data requests",
        )
        .arg(
            Arg::new("files")
                .value_name("FILE")
                .help("Files to analyze (.txt, .eml, .pdf)")
                .num_args(0..)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("text")
                .short('t')
                .long("text")
                .value_name("TEXT")
                .help("Text to analyze in addition to any files")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("stdin")
                .long("stdin")
                .help("Read text to analyze from standard input")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("YAML file overriding the bundled word lists and limits")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Write the default configuration to FILE and exit")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the analysis result as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging, including per-rule scoring")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config = match matches.get_one::<String>("config") {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Error loading configuration from {path}"))?,
        None => Config::default(),
    };

    init_logging(&config, matches.get_flag("verbose"));

    if let Some(path) = matches.get_one::<String>("generate-config") {
        let yaml = Config::default().to_yaml()?;
        std::fs::write(path, yaml).with_context(|| format!("Failed to write {path}"))?;
        println!("Default configuration written to {path}");
        return Ok(());
    }

    let extractor = TextExtractor::with_bundled_backends(config.extraction.clone());
    let mut sources = Vec::new();

    if let Some(files) = matches.get_many::<String>("files") {
        for file in files {
            match extractor.extract_file(file) {
                Ok(text) => {
                    log::info!("Extracted {} characters from {}", text.chars().count(), file);
                    sources.push(InputSource::File {
                        name: display_name(file),
                        text,
                    });
                }
                Err(e) => {
                    // one bad file does not abort the rest
                    log::warn!("Skipping {}: {}", file, e);
                    eprintln!("⚠️  {e}");
                }
            }
        }
    }

    if let Some(text) = matches.get_one::<String>("text") {
        sources.push(InputSource::Pasted(text.clone()));
    }

    if matches.get_flag("stdin") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read standard input")?;
        sources.push(InputSource::Pasted(buffer));
    }

    let document = compose_input(&sources);
    if document.is_empty() {
        anyhow::bail!("Add at least one file or some text to analyze");
    }

    let analyzer = Analyzer::new(&config.heuristics).context("Invalid heuristic tables")?;
    let result = analyzer.analyze(&document);
    log::info!(
        "Analysis completed: score {} ({})",
        result.score,
        result.verdict.label
    );

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::render_text(&result, &document));
    }

    Ok(())
}

fn init_logging(config: &Config, verbose: bool) {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        config
            .logging
            .as_ref()
            .and_then(|l| LevelFilter::from_str(&l.level).ok())
            .unwrap_or(LevelFilter::Warn)
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .init();
}

fn display_name(file: &str) -> String {
    Path::new(file)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file.to_string())
}
