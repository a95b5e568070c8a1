use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::debug;

use oktogen::charset::{ OPTION_AVOID_SIMILAR, OPTION_LOWER_CASE, OPTION_NUMBERS, OPTION_SYMBOLS, OPTION_UPPER_CASE };
use oktogen::generators::{ OPTION_SEGMENT_LENGTH, OPTION_WORDS, PARAMETER_DICTIONARY_FILE, PARAMETER_SEPARATOR };
use oktogen::{ GeneratorConfig, GeneratorError, GeneratorKind, OptionValue, Parameter, PasswordGenerator };

/// Generate passwords from the command line.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Generator: computer, hybrid, requirement, human or dummy
    #[arg(long, short)]
    kind: Option<GeneratorKind>,

    /// Number of passwords to print
    #[arg(long, short = 'c', default_value_t = 1)]
    count: i64,

    /// Characters, segments or words, depending on the generator
    #[arg(long, short = 'L')]
    length: Option<i64>,

    #[arg(long, short = 'u')]
    no_uppercase: bool,

    #[arg(long, short = 'l')]
    no_lowercase: bool,

    #[arg(long, short = 'n')]
    no_numbers: bool,

    #[arg(long, short = 's')]
    symbols: bool,

    /// Leave out look-alike characters
    #[arg(long)]
    avoid_similar: bool,

    /// Characters per hybrid segment
    #[arg(long)]
    segment_length: Option<i64>,

    /// Separator between hybrid segments or dictionary words
    #[arg(long)]
    separator: Option<String>,

    /// Word list for the human generator
    #[arg(long, short = 'd')]
    dictionary: Option<PathBuf>,

    /// Number of dictionary words
    #[arg(long, short = 'w')]
    words: Option<i64>,

    /// Minimum characters of a class, as CLASS=N
    #[arg(long = "min", value_parser = parse_count)]
    minimum: Vec<(String, i64)>,

    /// Maximum characters of a class, as CLASS=N
    #[arg(long = "max", value_parser = parse_count)]
    maximum: Vec<(String, i64)>,

    /// Rejected candidates allowed per password
    #[arg(long)]
    max_attempts: Option<usize>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// JSON generator config; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the generator options as JSON and exit
    #[arg(long)]
    list_options: bool,
}

fn parse_count(value: &str) -> Result<(String, i64), String> {
    let (class, count) = value
        .split_once('=')
        .ok_or_else(|| format!("expected CLASS=N, got '{}'", value))?;
    let count = count.trim().parse::<i64>().map_err(|e| e.to_string())?;

    Ok((class.trim().to_ascii_uppercase(), count))
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    debug!("{:?}", cli);

    if let Err(error) = run(cli) {
        eprintln!("{}", error);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), GeneratorError> {
    let config = configure(&cli)?;
    let mut generator = config.build()?;

    if cli.list_options {
        println!("{}", serde_json::to_string_pretty(generator.options())?);
        return Ok(());
    }

    for password in generator.generate_passwords(cli.count)? {
        println!("{}", password);
    }

    Ok(())
}

fn configure(cli: &Cli) -> Result<GeneratorConfig, GeneratorError> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };

    if let Some(kind) = cli.kind {
        config.kind = kind;
    }

    let length_option = config.kind.length_option();
    let mut set = |name: &str, value: OptionValue| {
        config.options.insert(name.to_string(), value);
    };

    if let Some(length) = cli.length {
        set(length_option, OptionValue::Integer(length));
    }
    if cli.no_uppercase {
        set(OPTION_UPPER_CASE, OptionValue::Boolean(false));
    }
    if cli.no_lowercase {
        set(OPTION_LOWER_CASE, OptionValue::Boolean(false));
    }
    if cli.no_numbers {
        set(OPTION_NUMBERS, OptionValue::Boolean(false));
    }
    if cli.symbols {
        set(OPTION_SYMBOLS, OptionValue::Boolean(true));
    }
    if cli.avoid_similar {
        set(OPTION_AVOID_SIMILAR, OptionValue::Boolean(true));
    }
    if let Some(length) = cli.segment_length {
        set(OPTION_SEGMENT_LENGTH, OptionValue::Integer(length));
    }
    if let Some(words) = cli.words {
        set(OPTION_WORDS, OptionValue::Integer(words));
    }

    if let Some(separator) = &cli.separator {
        config.parameters.insert(PARAMETER_SEPARATOR.to_string(), Parameter::from(separator.as_str()));
    }
    if let Some(dictionary) = &cli.dictionary {
        config.parameters.insert(
            PARAMETER_DICTIONARY_FILE.to_string(),
            Parameter::from(dictionary.to_string_lossy().into_owned()),
        );
    }

    config.minimum_counts.extend(cli.minimum.iter().cloned());
    config.maximum_counts.extend(cli.maximum.iter().cloned());

    if cli.max_attempts.is_some() {
        config.max_attempts = cli.max_attempts;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    Ok(config)
}
