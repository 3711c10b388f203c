//! Command line interface definition using clap.
//!
//! Every option is optional: with no arguments the tool prompts for the root
//! directory on standard input.

use clap::Parser;

/// Concatenate the files under a directory so that each file follows the
/// files it `require`s.
#[derive(Debug, Parser, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory to process. Prompted for interactively when omitted.
    #[arg(value_name = "DIR")]
    pub root: Option<String>,

    /// Enable verbose logging output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Force accessible (static) status output on or off.
    #[arg(long, value_name = "BOOL")]
    pub accessible: Option<bool>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "tests fail fast on setup errors")]
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&["catena"], None, false, None)]
    #[case(&["catena", "work"], Some("work"), false, None)]
    #[case(&["catena", "-v", "Folder 1"], Some("Folder 1"), true, None)]
    #[case(&["catena", "--accessible", "false"], None, false, Some(false))]
    #[case(&["catena", "--verbose", "--accessible", "true", "x"], Some("x"), true, Some(true))]
    fn parses_arguments(
        #[case] argv: &[&str],
        #[case] root: Option<&str>,
        #[case] verbose: bool,
        #[case] accessible: Option<bool>,
    ) {
        let cli = Cli::try_parse_from(argv).expect("parse");
        assert_eq!(cli.root.as_deref(), root);
        assert_eq!(cli.verbose, verbose);
        assert_eq!(cli.accessible, accessible);
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["catena", "--jobs", "4"]).is_err());
    }
}
