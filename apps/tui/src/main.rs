use clap::Parser;
use color_eyre::Result;
use precinct_lookup::app::App;
use precinct_lookup::cli::CliArgs;
use precinct_lookup::config::init_app_config;
use precinct_lookup::lookup::PrecinctLookup;
use precinct_lookup::{event, logging, terminal};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = init_app_config()?;
    let headless = args.headless || !is_terminal();
    logging::init_logging(&config, !headless)?;

    let lookup = PrecinctLookup::from_config(&config)?;

    if headless {
        let address = args.address();
        if address.validate().is_err() {
            eprintln!("{}", CliArgs::help_text());
        }
        return event::run_headless(&lookup, &address, args.json).await;
    }

    let mut app = App::new(lookup);
    if args.has_address() {
        app.form = args.address();
    }

    // Setup terminal
    let mut terminal = terminal::setup()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
