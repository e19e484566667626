use clap::Parser;
use mandala::config;
use mandala::gui::app::AppModel;
use mandala::gui::mandala::State;
use mandala::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mandala", version, about, long_about = None)]
struct Cli {
    /// Config file to load and watch instead of the per-user one
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = config::resolve_config_path(cli.config)?;
    let config = config::load_or_setup(&config_path);
    let state = State::new(config);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(config_path.clone(), tx.clone());

    // arguments were consumed by clap
    let app = RelmApp::new("org.mandala.mandala").with_args(Vec::new());

    app.run::<AppModel>((state, config_path, tx, rx));
    Ok(())
}
