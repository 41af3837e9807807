//! Main application entry point.

fn main() {
    env_logger::init();
    log::info!("Starting MerchCraft");

    if let Err(err) = merchcraft_app::App::run() {
        log::error!("MerchCraft failed to start: {err}");
        std::process::exit(1);
    }
}
