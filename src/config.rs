use std::path::PathBuf;

use clap::Parser;

use crate::state::Page;

/// Command line of the viewer.
#[derive(Debug, Parser)]
#[command(name = "restaurant-explorer", version)]
#[command(about = "Browse and chart a table of restaurant listings", long_about = None)]
pub struct Cli {
    /// Listing file (.csv, .json or .parquet). A file dialog opens when omitted.
    #[arg(value_name = "FILE", env = "RESTAURANT_EXPLORER_DATA")]
    pub data: Option<PathBuf>,

    /// Currency symbol shown in front of costs
    #[arg(long, default_value = "₹")]
    pub currency: String,

    /// Page shown at startup
    #[arg(long, value_enum, default_value_t = Page::Explore)]
    pub page: Page,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "restaurant-explorer",
            "cleaned_data.csv",
            "--currency",
            "$",
            "--page",
            "dashboard",
        ])
        .unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("cleaned_data.csv")));
        assert_eq!(cli.currency, "$");
        assert_eq!(cli.page, Page::Dashboard);
    }

    #[test]
    fn test_rejects_unknown_page() {
        assert!(Cli::try_parse_from(["restaurant-explorer", "--page", "settings"]).is_err());
    }
}
