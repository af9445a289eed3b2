mod app;
mod plot;
mod tweets;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file with one tweet object per entry.
    #[arg(long, default_value = "tweets.json")]
    data: String,
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 900.0]),
        ..Default::default()
    };

    eframe::run_native(
        "sentiswarm",
        options,
        Box::new(move |cc| Ok(Box::new(app::SwarmApp::new(cc, args.data.clone())))),
    )
}
