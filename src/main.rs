fn main() {
    if let Err(e) = yoloremap::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
