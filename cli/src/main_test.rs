use clap::CommandFactory;

use super::*;

#[test]
fn command_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn hr_leave_list_parses_wire_values() {
    let cli = Cli::try_parse_from([
        "staffdesk", "hr", "leave", "list", "--status", "Pending", "--type", "Sick", "--page", "2",
    ])
    .unwrap();
    let Command::Hr(HrCommand { command: HrSubcommand::Leave(leave) }) = cli.command else {
        panic!("expected hr leave command");
    };
    let LeaveSubcommand::List { page, status, leave_type, .. } = leave.command else {
        panic!("expected leave list");
    };
    assert_eq!(page.page, 2);
    assert_eq!(page.limit, 10);
    assert_eq!(status, Some(LeaveStatus::Pending));
    assert_eq!(leave_type, Some(LeaveType::Sick));
}

#[test]
fn variant_flag_accepts_aliases() {
    let cli = Cli::try_parse_from(["staffdesk", "--variant", "HR", "status"]).unwrap();
    assert_eq!(cli.variant, Some(Variant::Hr));
    assert_eq!(command_variant(&cli), Some(Variant::Hr));

    assert!(Cli::try_parse_from(["staffdesk", "--variant", "payroll", "status"]).is_err());
}

#[test]
fn query_pairs_split_on_first_equals() {
    assert_eq!(parse_query_pair("start_date=2024-01-01").unwrap(), ("start_date", "2024-01-01".to_owned()));
    assert_eq!(parse_query_pair("search=a=b").unwrap(), ("search", "a=b".to_owned()));
    assert!(parse_query_pair("novalue").is_err());
    assert!(parse_query_pair("=x").is_err());
}

#[test]
fn session_file_defaults_per_variant() {
    assert_ne!(default_session_file(Variant::Tracker), default_session_file(Variant::Hr));
}

#[test]
fn typed_payloads_parse_from_data_flag() {
    let request: staffdesk::hr::types::UpdateEmployeeRequest = parse_data(r#"{"position":"Lead"}"#).unwrap();
    assert_eq!(request.position.as_deref(), Some("Lead"));
    assert!(parse_data::<staffdesk::hr::types::CreateLeaveRequest>("{}").is_err());
}

#[test]
fn subcommand_pins_backend_over_variant_flag() {
    let cli = Cli::try_parse_from(["staffdesk", "--variant", "hr", "tracker", "today"]).unwrap();
    assert_eq!(command_variant(&cli), Some(Variant::Tracker));

    let cli = Cli::try_parse_from(["staffdesk", "status"]).unwrap();
    assert_eq!(command_variant(&cli), None);
}

#[test]
fn env_url_fallback_reaches_client_config() {
    let cli = Cli::try_parse_from(["staffdesk", "hr", "profile"]).unwrap();
    let env = ClientConfig::from_lookup_for(Variant::Hr, |key| {
        (key == "NEXT_PUBLIC_API_URL").then(|| "http://10.0.0.5:8080/api/v1".to_owned())
    })
    .unwrap();

    let config = apply_overrides(&cli, env);

    assert_eq!(config.variant, Variant::Hr);
    assert_eq!(config.base_url, "http://10.0.0.5:8080/api/v1");
    assert_eq!(config.login_path, "/login");
}

#[test]
fn explicit_flags_override_env_config() {
    let cli = Cli::try_parse_from([
        "staffdesk", "--base-url", "http://localhost:9000/api/", "--timeout-secs", "5", "status",
    ])
    .unwrap();
    let env = ClientConfig::from_lookup(|key| match key {
        "STAFFDESK_API_URL" => Some("http://env.test/api".to_owned()),
        "STAFFDESK_REQUEST_TIMEOUT_SECS" => Some("30".to_owned()),
        "STAFFDESK_LOGIN_PATH" => Some("/signin".to_owned()),
        _ => None,
    })
    .unwrap();

    let config = apply_overrides(&cli, env);

    assert_eq!(config.base_url, "http://localhost:9000/api");
    assert_eq!(config.request_timeout_secs, Some(5));
    assert_eq!(config.login_path, "/signin");
}
