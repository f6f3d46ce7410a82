use clap::{CommandFactory, Parser};

use crate::domain::AddressInput;

#[derive(Debug, Parser)]
#[command(name = "precinct_lookup", version, about = "Find the JP precinct for a street address")]
pub struct CliArgs {
    /// Look up the address given by flags and print the result instead of opening the form
    #[arg(long)]
    pub headless: bool,

    /// Print the headless result as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Street address
    #[arg(long, value_name = "TEXT")]
    pub street: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub city: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub state: Option<String>,

    /// ZIP code
    #[arg(long, value_name = "TEXT")]
    pub zip: Option<String>,

    /// Override the geocoder search endpoint
    #[arg(long = "geocoder-url", value_name = "URL")]
    pub geocoder_url: Option<String>,

    /// Override the precinct feature query endpoint
    #[arg(long = "feature-url", value_name = "URL")]
    pub feature_url: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.geocoder_url {
            std::env::set_var("GEOCODER_URL", url);
        }
        if let Some(url) = &self.feature_url {
            std::env::set_var("FEATURE_SERVICE_URL", url);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    /// Address from the flags; missing flags become empty fields and fail validation.
    pub fn address(&self) -> AddressInput {
        AddressInput::new(
            self.street.clone().unwrap_or_default(),
            self.city.clone().unwrap_or_default(),
            self.state.clone().unwrap_or_default(),
            self.zip.clone().unwrap_or_default(),
        )
    }

    pub fn has_address(&self) -> bool {
        self.street.is_some() || self.city.is_some() || self.state.is_some() || self.zip.is_some()
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}
