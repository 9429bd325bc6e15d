mod app;

use anyhow::Result;
use app::{AppConfig, EulerApp};
use clap::Parser;

fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::parse();
    let mut app = EulerApp::new(&config)?;
    app.run()
}

fn init_tracing() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}
