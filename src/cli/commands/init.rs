use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::storage::log::ActivityLog;
use crate::ui::messages::success;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped with `--test`)
///  - the storage directory holding the draft and the activity log
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.storage.clone(), cli.test)?;
    let storage = cfg.storage_path();

    println!("⚙️  Initializing scireport…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗂️  Storage     : {}", storage.display());

    ActivityLog::in_dir(&storage).note(
        "init",
        "storage",
        &format!("Storage initialized at {}", storage.display()),
    );

    success("scireport initialization completed!");
    Ok(())
}
