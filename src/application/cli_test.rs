use anyhow::Result;

use super::build;
use super::decode_polyline;
use super::encode_points;

#[test]
fn it_has_a_valid_command_tree() {
    build().debug_assert();
}

#[test]
fn it_decodes_polylines() -> Result<()> {
    let res = decode_polyline(" _p~iF~ps|U_ulLnnqC_mqNvxq`@ ")?;

    let expected = vec!["38.5,-120.2", "40.7,-120.95", "43.252,-126.453"];
    assert_eq!(res, expected.join("\n"));

    return Ok(());
}

#[test]
fn it_rejects_truncated_polylines() {
    assert!(decode_polyline("_p~iF~ps|").is_err());
}

#[test]
fn it_accepts_global_args_after_subcommands() -> Result<()> {
    let matches = build().try_get_matches_from(vec![
        "polaris",
        "chat",
        "--renderer",
        "headless",
        "--travel-mode",
        "walking",
    ])?;
    let (_, chat_matches) = matches.subcommand().unwrap();

    assert_eq!(
        chat_matches.get_one::<String>("renderer").map(String::as_str),
        Some("headless")
    );
    assert_eq!(
        chat_matches
            .get_one::<String>("travel-mode")
            .map(String::as_str),
        Some("walking")
    );

    return Ok(());
}

#[test]
fn it_rejects_unknown_renderers() {
    let res = build().try_get_matches_from(vec!["polaris", "--renderer", "hologram"]);
    assert!(res.is_err());
}

#[test]
fn it_encodes_points() -> Result<()> {
    let points = vec![
        "38.5,-120.2".to_string(),
        "40.7, -120.95".to_string(),
        "43.252,-126.453".to_string(),
    ];

    insta::assert_snapshot!(encode_points(&points)?, @"_p~iF~ps|U_ulLnnqC_mqNvxq`@");
    return Ok(());
}

#[test]
fn it_rejects_points_off_the_globe() {
    let err = encode_points(&["38.5,-120.2".to_string(), "91,0".to_string()]).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r###"Expected a lat,lng pair, got "91,0""###);
}

#[test]
fn it_accepts_negative_coordinates() -> Result<()> {
    let matches =
        build().try_get_matches_from(vec!["polaris", "encode", "-33.86,151.2", "-37.81,144.96"])?;
    let (_, encode_matches) = matches.subcommand().unwrap();
    let points = encode_matches
        .get_many::<String>("points")
        .unwrap()
        .collect::<Vec<&String>>();

    assert_eq!(points, vec!["-33.86,151.2", "-37.81,144.96"]);
    return Ok(());
}
