use crate::cli::output::{Formatter, OutputPreferences};
use crate::utils::build_info;

pub fn run() {
    let meta = build_info::current();
    let formatter = Formatter::new(OutputPreferences::default());
    formatter.print_header(format!("Heft {}", meta.version));
    let rows: Vec<(String, String)> = meta
        .rows()
        .into_iter()
        .map(|(label, value)| (label.to_string(), value))
        .collect();
    formatter.print_two_column(&rows);
}
