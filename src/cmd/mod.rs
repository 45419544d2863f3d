pub mod compare;
pub mod config;
pub mod repos;
pub mod tags;

/// Prints caller-visible warnings to stderr.
pub fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }
}
