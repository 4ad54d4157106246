fn main() {
    if let Err(err) = score_intake::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
