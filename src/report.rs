use std::io::{self, Write};
use std::path::Path;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

pub fn report_success<W: Write>(out: &mut W, output: &Path) -> io::Result<()> {
    writeln!(
        out,
        "{GREEN} Your translation file '{}' has been created. {RESET} ",
        output.display()
    )
}

pub fn report_usage<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{RED} ERROR: You must specify input and output file. {RESET}\n \
         Example: xliff-to-json input.xliff output.json"
    )
}
