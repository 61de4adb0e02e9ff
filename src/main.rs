use smitten::app::App;
use smitten::config::GreetingConfig;
use smitten::error::user_friendly_message;
use std::sync::Mutex;

#[tokio::main]
async fn main() {
    init_logging();
    if let Err(err) = run().await {
        eprintln!("{}", user_friendly_message(&err));
        std::process::exit(1);
    }
}

async fn run() -> smitten::Result<()> {
    let config = GreetingConfig::load()?;
    let mut app = App::new(config)?;
    app.init()?;
    app.run().await
}

/// Log to a file when RUST_LOG is set; stdout belongs to the TUI.
fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    if let Ok(file) = std::fs::File::create(smitten::LOG_FILE) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init();
    }
}
