//! kseo binary entry point.

fn main() {
    if let Err(err) = keystone_seo::cli::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
