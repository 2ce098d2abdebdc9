//! scireport main entrypoint.

use scireport::run;

fn main() {
    if let Err(e) = run() {
        scireport::ui::messages::error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
