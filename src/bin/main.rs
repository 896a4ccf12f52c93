use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use xliff_to_json::{convert_file, initialize_tracing, report_success, report_usage, ConvertArgs};

/// Converts the <source>/<target> pairs of an XLIFF file into a JSON array.
#[derive(Parser)]
#[command(name = "xliff-to-json", version)]
struct Cli {
    /// XLIFF file to read
    input: Option<OsString>,
    /// JSON file to write
    output: Option<OsString>,
    /// Extra arguments are ignored
    #[arg(hide = true)]
    rest: Vec<OsString>,
}

/// An empty argument counts as missing.
fn path_arg(arg: Option<OsString>) -> Option<PathBuf> {
    arg.filter(|value| !value.is_empty()).map(PathBuf::from)
}

fn main() -> ExitCode {
    initialize_tracing();
    let cli = Cli::parse();

    let (Some(input), Some(output)) = (path_arg(cli.input), path_arg(cli.output)) else {
        report_usage(&mut io::stdout()).ok();
        return ExitCode::FAILURE;
    };

    let args = ConvertArgs { input, output };
    if let Err(err) = convert_file(&args) {
        eprintln!("error: {}", error_chain(&err));
        return ExitCode::FAILURE;
    }

    report_success(&mut io::stdout(), &args.output).ok();
    ExitCode::SUCCESS
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
