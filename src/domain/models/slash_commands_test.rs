use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    assert!(SlashCommand::parse("").is_none());
}

#[test]
fn it_parse_space_only() {
    assert!(SlashCommand::parse(" ").is_none());
}

#[test]
fn it_parse_single_slash() {
    assert!(SlashCommand::parse("/").is_none());
}

#[test]
fn it_parse_plain_prompt() {
    assert!(SlashCommand::parse("coffee then a bookstore then the park").is_none());
}

#[test]
fn it_parse_valid_prefix() {
    let cmd = SlashCommand::parse("/q");
    assert!(cmd.is_some());
    assert_eq!(cmd.unwrap().command, "/q");
}

#[test]
fn it_is_quit() {
    assert!(SlashCommand::parse("/q").unwrap().is_quit());
    assert!(SlashCommand::parse("/quit").unwrap().is_quit());
    assert!(SlashCommand::parse("/exit").unwrap().is_quit());
    assert!(!SlashCommand::parse("/new").unwrap().is_quit());
}

#[test]
fn it_is_new_session() {
    assert!(SlashCommand::parse("/n").unwrap().is_new_session());
    assert!(SlashCommand::parse("/new").unwrap().is_new_session());
}

#[test]
fn it_is_list_sessions() {
    assert!(SlashCommand::parse("/ls").unwrap().is_list_sessions());
    assert!(SlashCommand::parse("/sessions").unwrap().is_list_sessions());
}

#[test]
fn it_requires_an_argument_to_select() {
    assert!(SlashCommand::parse("/select").is_none());
    let cmd = SlashCommand::parse("/s 2").unwrap();
    assert!(cmd.is_select_session());
    assert_eq!(cmd.args, vec!["2".to_string()]);
}

#[test]
fn it_keeps_the_full_rename_text() {
    assert!(SlashCommand::parse("/rename").is_none());
    let cmd = SlashCommand::parse("/rename  Saturday   food tour ").unwrap();
    assert!(cmd.is_rename_session());
    assert_eq!(cmd.rest(), "Saturday food tour");
}

#[test]
fn it_is_delete_session_with_or_without_target() {
    assert!(SlashCommand::parse("/d").unwrap().is_delete_session());
    assert!(SlashCommand::parse("/delete 3").unwrap().is_delete_session());
}

#[test]
fn it_is_route_views() {
    assert!(SlashCommand::parse("/stops").unwrap().is_stops());
    assert!(SlashCommand::parse("/dir").unwrap().is_directions());
    assert!(SlashCommand::parse("/directions").unwrap().is_directions());
}

#[test]
fn it_is_export() {
    assert!(SlashCommand::parse("/x").unwrap().is_export());
    assert!(SlashCommand::parse("/export").unwrap().is_export());
    assert!(SlashCommand::parse("/nav").unwrap().is_navigate());
    assert!(!SlashCommand::parse("/nav").unwrap().is_export());
}

#[test]
fn it_is_help() {
    assert!(SlashCommand::parse("/h").unwrap().is_help());
    assert!(SlashCommand::parse("/help").unwrap().is_help());
}

#[test]
fn it_is_map_controls() {
    assert!(SlashCommand::parse("/p").unwrap().is_panel());
    assert!(SlashCommand::parse("/panel left").unwrap().is_panel());
    assert!(SlashCommand::parse("/locate").unwrap().is_locate());
    assert!(SlashCommand::parse("/m").unwrap().is_map());
    assert!(SlashCommand::parse("/map").unwrap().is_map());
    assert!(!SlashCommand::parse("/map").unwrap().is_panel());
}
