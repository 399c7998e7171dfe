use clap::Parser;
use docserve::cli::Args;

#[test]
fn test_cli_no_port() {
    let args = Args::try_parse_from(["docserve"]).unwrap();
    assert_eq!(args.port, None);
}

#[test]
fn test_cli_port_in_range() {
    assert_eq!(Args::try_parse_from(["docserve", "49152"]).unwrap().port, Some(49152));
    assert_eq!(Args::try_parse_from(["docserve", "65535"]).unwrap().port, Some(65535));
}

#[test]
fn test_cli_port_out_of_range() {
    assert!(Args::try_parse_from(["docserve", "49151"]).is_err());
    assert!(Args::try_parse_from(["docserve", "8080"]).is_err());
    assert!(Args::try_parse_from(["docserve", "70000"]).is_err());
}

#[test]
fn test_cli_port_not_a_number() {
    assert!(Args::try_parse_from(["docserve", "http"]).is_err());
}

#[test]
fn test_cli_too_many_arguments() {
    assert!(Args::try_parse_from(["docserve", "50000", "50001"]).is_err());
}
