use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use log::{error, info, LevelFilter};
use moonfront::{
    display_error,
    parser::parser::parse_source,
    printer::printer::print_block,
    semantic::analyzer::{Analyzer, AnalyzerOptions},
};

/// Parse and check a Lua source file.
#[derive(Parser, Debug)]
#[command(name = "moonfront", version, about)]
struct Cli {
    /// Source file to check
    file: PathBuf,

    /// Print the parsed syntax tree
    #[arg(long)]
    ast: bool,

    /// Print source regenerated from the syntax tree
    #[arg(long)]
    pretty: bool,

    /// Print the symbol table after analysis
    #[arg(long)]
    symbols: bool,

    /// Fail when analysis reports warnings
    #[arg(long)]
    deny_warnings: bool,

    /// Extra global function name to treat as a built-in (repeatable)
    #[arg(long = "builtin", value_name = "NAME")]
    builtins: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.to_string_lossy().into_owned());

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(io_error) => {
            error!("failed to read {}: {}", cli.file.display(), io_error);
            eprintln!("Error: cannot read {}: {}", cli.file.display(), io_error);
            return ExitCode::from(2);
        }
    };

    let start = Instant::now();

    let program = match parse_source(&source, Some(file_name)) {
        Ok(program) => program,
        Err(syntax_error) => {
            display_error(&syntax_error, &source);
            return ExitCode::from(1);
        }
    };

    info!("parsed in {:?}", start.elapsed());

    if cli.ast {
        println!("{:#?}", program);
    }

    if cli.pretty {
        print!("{}", print_block(&program));
    }

    let analyze_start = Instant::now();
    let options = AnalyzerOptions::default().with_builtins(cli.builtins);
    let result = Analyzer::new(options).analyze(&program);

    info!("analyzed in {:?}", analyze_start.elapsed());

    for message in result.error_messages() {
        println!("{}", message);
    }
    for message in result.warning_messages() {
        println!("{}", message);
    }

    if cli.symbols {
        print!("{}", result.symbols);
    }

    println!(
        "{}: {} error(s), {} warning(s)",
        if result.is_success() { "PASSED" } else { "FAILED" },
        result.errors.len(),
        result.warnings.len()
    );

    if !result.is_success() || (cli.deny_warnings && !result.warnings.is_empty()) {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
