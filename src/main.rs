//! rWorklog main entrypoint.

use rworklog::run;
use rworklog::ui::messages::error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        error(e);
        std::process::exit(1);
    }
}
