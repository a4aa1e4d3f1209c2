use std::io;

use anyhow::Context;

use stockbook_cli::{AppConfig, Menu, Prompter};
use stockbook_infra::{InventoryService, JsonFileStore};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    stockbook_observability::init(&config.log_filter);

    let store = JsonFileStore::open(&config.data_dir)
        .with_context(|| format!("failed to open data directory {:?}", config.data_dir))?;
    let service = InventoryService::open(store).context("failed to load inventory data")?;
    tracing::info!(data_dir = %config.data_dir.display(), "stockbook started");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let prompt = Prompter::new(stdin.lock(), stdout.lock());

    Menu::new(service, prompt, config)
        .run()
        .context("terminal input/output failed")?;
    Ok(())
}
