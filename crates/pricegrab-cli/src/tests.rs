use super::*;

#[test]
fn scrape_defaults_to_brief() {
    let cli = Cli::try_parse_from(["pricegrab", "scrape"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Scrape {
            mode: OutputMode::Brief
        }
    ));
}

#[test]
fn parses_scrape_mode() {
    let cli = Cli::try_parse_from(["pricegrab", "scrape", "--mode", "db"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Scrape {
            mode: OutputMode::Db
        }
    ));
}

#[test]
fn rejects_unknown_scrape_mode() {
    assert!(Cli::try_parse_from(["pricegrab", "scrape", "--mode", "xml"]).is_err());
}

#[test]
fn parses_show_sku() {
    let cli = Cli::try_parse_from(["pricegrab", "show", "sku", "sku565936"])
        .expect("expected valid cli args");
    match cli.command {
        Commands::Show {
            command: ShowCommands::Sku { skuid },
        } => assert_eq!(skuid, "sku565936"),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_show_name() {
    let cli = Cli::try_parse_from(["pricegrab", "show", "name", "Big Ben"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Show {
            command: ShowCommands::Name { ref fragment }
        } if fragment == "Big Ben"
    ));
}

#[test]
fn parses_changes_recent_json() {
    let cli = Cli::try_parse_from(["pricegrab", "changes", "recent", "--json"])
        .expect("expected valid cli args");
    let Commands::Changes { command } = cli.command else {
        panic!("expected changes command");
    };
    assert_eq!(command.kind_and_format(), (ChangeKind::Recent, true));
}

#[test]
fn changes_ever_defaults_to_text() {
    let cli = Cli::try_parse_from(["pricegrab", "changes", "ever"]).expect("expected valid cli args");
    let Commands::Changes { command } = cli.command else {
        panic!("expected changes command");
    };
    assert_eq!(command.kind_and_format(), (ChangeKind::Ever, false));
}

#[test]
fn command_is_required() {
    assert!(Cli::try_parse_from(["pricegrab"]).is_err());
}

#[test]
fn help_is_answered_by_the_parser() {
    let err = Cli::try_parse_from(["pricegrab", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    assert!(err.to_string().contains("scrape"));
}
