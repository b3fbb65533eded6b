//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "api.base_url")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    if args.reset {
        Config::default().save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        (None, None) => print!("{}", render_config(&config)),

        (Some(key), None) => match config.get(key) {
            Some(value) => println!("{}", value),
            None => {
                return Err(Error::Config(format!(
                    "Unknown config key: {}\n\nAvailable keys:\n  {}",
                    key,
                    Config::available_keys().join("\n  ")
                )))
            }
        },

        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        (None, Some(_)) => {
            return Err(Error::Config(
                "Must specify a key to set a value".to_string(),
            ))
        }
    }

    Ok(())
}

/// Every setting, grouped by section
fn render_config(config: &Config) -> String {
    let mut out = String::new();

    out.push_str("[api]\n");
    out.push_str(&format!("base_url = \"{}\"\n", config.api.base_url));
    out.push_str(&format!("timeout_secs = {}\n\n", config.api.timeout_secs));

    out.push_str("[search]\n");
    out.push_str(&format!("radius = {}\n", config.search.radius));
    out.push_str(&format!("include_houses = {}\n\n", config.search.include_houses));

    out.push_str("[map]\n");
    out.push_str(&format!("default_lat = {}\n", config.map.default_lat));
    out.push_str(&format!("default_lng = {}\n", config.map.default_lng));
    out.push_str(&format!("zoom = {}\n", config.map.zoom));
    out.push_str(&format!("use_geolocation = {}\n\n", config.map.use_geolocation));

    out.push_str("[viewer]\n");
    out.push_str(&format!("hfov = {}\n\n", config.viewer.hfov));

    out.push_str("[output]\n");
    out.push_str(&format!("format = \"{}\"\n", config.output.format));
    out.push_str(&format!("units = \"{}\"\n\n", config.output.units));

    out.push_str("[url]\n");
    out.push_str(&format!("default = \"{}\"\n\n", config.url.default));

    out.push_str("[url.providers]\n");
    let mut providers: Vec<_> = config.url.providers.iter().collect();
    providers.sort();
    for (name, template) in providers {
        out.push_str(&format!("{} = \"{}\"\n", name, template));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_config_sections() {
        let rendered = render_config(&Config::default());

        for section in ["[api]", "[search]", "[map]", "[viewer]", "[output]", "[url.providers]"] {
            assert!(rendered.contains(section), "missing {}", section);
        }
        assert!(rendered.contains("base_url = \"http://localhost:3000/api\""));
        assert!(rendered.contains("default_lat = 40.4406"));

        let apple = rendered.find("apple =").unwrap();
        let google = rendered.find("google =").unwrap();
        assert!(apple < google);
    }
}
