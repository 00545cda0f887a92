use probe_lib::{config, probe};
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    pretty_env_logger::init();

    // Load environment variables from .env.local / .env
    let loaded = config::load_env_files(&config::env_dir());
    log::info!("Environment files loaded: {:?}", loaded);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = probe::check(|name| std::env::var(name).ok(), &mut out).await;
    out.flush()?;

    match result {
        Ok(report) => {
            log::debug!("Probe finished: {:?}", report);
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
