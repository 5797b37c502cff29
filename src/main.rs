fn main() {
    if let Err(err) = wlformat::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
