use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use travelrecs::{
    DatasetSource, RenderCommand, RenderSurface, TravelApp, TravelRecsConfig, logging,
};

/// Prints results to stdout. A clock is printed when it starts; later ticks
/// are only stored and `:clock` shows the latest one.
#[derive(Default)]
struct ConsoleSurface {
    clock: Mutex<Option<String>>,
}

impl ConsoleSurface {
    fn latest_clock(&self) -> Option<String> {
        self.clock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Text before the time on the first clock line
fn clock_label(text: &str) -> &str {
    let first_line = text.lines().next().unwrap_or_default();
    first_line
        .rsplit_once(": ")
        .map_or(first_line, |(label, _)| label)
}

impl RenderSurface for ConsoleSurface {
    fn render(&self, command: RenderCommand) {
        match command {
            RenderCommand::SetHeader(Some(header)) => println!("\n== {header} =="),
            RenderCommand::SetHeader(None) | RenderCommand::ClearQuery => {}
            RenderCommand::ShowCards(cards) => {
                for card in cards {
                    println!("[{}] {}", card.badge, card.title);
                    println!("    {}", card.description);
                    println!("    image: {}", card.image_url);
                }
            }
            RenderCommand::ShowMessage(message) => println!("{message}"),
            RenderCommand::SetClock(clock) => {
                let mut latest = self.clock.lock().unwrap_or_else(PoisonError::into_inner);
                let previous = latest.as_deref().map(clock_label);
                if let Some(text) = clock.as_deref() {
                    if previous != Some(clock_label(text)) {
                        println!("{text}");
                    }
                }
                *latest = clock;
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = TravelRecsConfig::load()?;
    logging::init_logging(&config.logging)?;

    let surface = Arc::new(ConsoleSurface::default());
    let app = Arc::new(TravelApp::from_config(surface.clone(), &config));

    let source = DatasetSource::parse(&config.data.source);
    let timeout = config.data.timeout();
    let loader = Arc::clone(&app);
    tokio::spawn(async move {
        if let Err(e) = loader.load_dataset(&source, timeout).await {
            tracing::debug!("Background dataset load ended with: {}", e);
        }
    });

    println!("TravelRecs {}", travelrecs::VERSION);
    println!("Search beaches, temples, countries or cities. Commands: :reset :home :clock :quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":quit" | ":q" => break,
            ":reset" => app.reset(),
            ":home" => app.leave_search(),
            ":clock" => match surface.latest_clock() {
                Some(text) => println!("{text}"),
                None => println!("No clock running."),
            },
            _ => {
                if let Err(e) = app.search(&line) {
                    tracing::debug!("Search for '{}' failed: {}", line.trim(), e);
                }
            }
        }
    }

    app.reset();
    Ok(())
}
