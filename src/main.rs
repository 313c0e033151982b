fn main() {
    if let Err(err) = textcard::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
