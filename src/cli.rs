use std::path::PathBuf;

use clap::Parser;

use crate::calendar::layout::ViewMode;

#[derive(Debug, Clone, Parser)]
#[clap(bin_name = env!("CARGO_PKG_NAME"), version = env!("CARGO_PKG_VERSION"), about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    /// Path to the configuration file
    #[clap(name = "config")]
    pub config: PathBuf,

    /// Start in this view instead of the configured one (day, week, month, year)
    #[clap(long)]
    pub view: Option<ViewMode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_the_config_path() {
        let cli = Cli::try_parse_from(["shared-calendar", "/etc/shared-calendar.toml"]).unwrap();

        assert_eq!(cli.config, PathBuf::from("/etc/shared-calendar.toml"));
        assert_eq!(cli.view, None);

        let cli = Cli::try_parse_from(["shared-calendar", "c.toml", "--view", "Year"]).unwrap();
        assert_eq!(cli.view, Some(ViewMode::Year));
        assert!(Cli::try_parse_from(["shared-calendar"]).is_err());
    }
}
