fn main() -> Result<(), eframe::Error> {
    // Set up logging, filtered with RUST_LOG
    env_logger::init();

    // Run the focus city application
    focus_city::run_app()
}
