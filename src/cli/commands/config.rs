use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration:\n");
            let yaml =
                serde_yaml::to_string(&cfg).map_err(|e| AppError::Config(e.to_string()))?;
            println!("{yaml}");
        }

        // ---- CHECK CONFIG ----
        if *check {
            let problems = cfg.check();
            if problems.is_empty() {
                messages::success("configuration looks good");
            } else {
                for p in &problems {
                    messages::warning(p);
                }
                messages::info(format!(
                    "{} problem(s) found in {}",
                    problems.len(),
                    Config::config_file().display()
                ));
            }
        }

        if !*print_config && !*check {
            messages::info("nothing to do: pass --print or --check");
        }
    }

    Ok(())
}
