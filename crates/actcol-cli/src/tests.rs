use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["actcol-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_brands_list_without_filters() {
    let cli = Cli::try_parse_from(["actcol-cli", "brands", "list"]).expect("expected valid cli args");
    match cli.command {
        Some(Commands::Brands {
            command: BrandsCommands::List { filters },
        }) => assert!(filters.is_empty()),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_repeated_filters() {
    let cli = Cli::try_parse_from([
        "actcol-cli",
        "brands",
        "list",
        "--filter",
        "activity=running,yoga",
        "--filter",
        "regions=eu",
    ])
    .expect("expected valid cli args");
    match cli.command {
        Some(Commands::Brands {
            command: BrandsCommands::List { filters },
        }) => assert_eq!(
            filters,
            vec![
                ("activity".to_string(), "running,yoga".to_string()),
                ("regions".to_string(), "eu".to_string()),
            ]
        ),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn rejects_filter_without_equals() {
    let result = Cli::try_parse_from(["actcol-cli", "brands", "list", "--filter", "activity"]);
    assert!(result.is_err());
}

#[test]
fn parses_brands_show() {
    let cli = Cli::try_parse_from(["actcol-cli", "brands", "show", "tracksmith"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Brands {
            command: BrandsCommands::Show { ref slug }
        }) if slug == "tracksmith"
    ));
}

#[test]
fn brands_show_requires_slug() {
    assert!(Cli::try_parse_from(["actcol-cli", "brands", "show"]).is_err());
}

#[test]
fn parses_filters_and_debug() {
    let cli = Cli::try_parse_from(["actcol-cli", "filters"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Filters)));

    let cli = Cli::try_parse_from(["actcol-cli", "debug"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Debug)));
}

#[test]
fn filter_arg_splits_on_first_equals() {
    assert_eq!(
        parse_filter_arg("values=b-corp=yes").unwrap(),
        ("values".to_string(), "b-corp=yes".to_string())
    );
}
