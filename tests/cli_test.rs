//! CLI Command Tests
//!
//! Argument parsing, JSON output format, and command exit codes against a
//! mocked backend.

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use blip::cli::{Cli, Command, OpinionArg};
    use blip::models::Platform;
    use clap::Parser;

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from::<_, &str>([]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_discover_defaults() {
        let cli = Cli::parse_from(["blip", "discover"]);
        assert!(cli.is_cli_mode());
        match cli.command {
            Some(Command::Discover(cmd)) => {
                assert!(cmd.platforms.is_empty());
                assert!(cmd.limit.is_none());
            }
            _ => panic!("Expected Discover command"),
        }
    }

    #[test]
    fn test_discover_accepts_names_and_slugs() {
        let cli = Cli::parse_from([
            "blip",
            "discover",
            "--platforms",
            "Disney Plus,prime-video,max",
        ]);
        match cli.command {
            Some(Command::Discover(cmd)) => assert_eq!(
                cmd.platforms,
                vec![Platform::DisneyPlus, Platform::PrimeVideo, Platform::HboMax]
            ),
            _ => panic!("Expected Discover command"),
        }
    }

    #[test]
    fn test_rate_rejects_unknown_opinion() {
        assert!(Cli::try_parse_from(["blip", "rate", "603", "meh"]).is_err());
        assert!(Cli::try_parse_from(["blip", "rate", "abc", "loved"]).is_err());
    }

    #[test]
    fn test_watchlist_opinion_flag() {
        let cli = Cli::parse_from(["blip", "watchlist", "--opinion", "loved", "--page", "3"]);
        match cli.command {
            Some(Command::Watchlist(cmd)) => {
                assert_eq!(cmd.opinion, OpinionArg::Loved);
                assert_eq!(cmd.page, 3);
            }
            _ => panic!("Expected Watchlist command"),
        }
    }

    #[test]
    fn test_command_aliases() {
        let cli = Cli::parse_from(["blip", "d"]);
        assert!(matches!(cli.command, Some(Command::Discover(_))));

        let cli = Cli::parse_from(["blip", "r", "1", "pass"]);
        assert!(matches!(cli.command, Some(Command::Rate(_))));

        let cli = Cli::parse_from(["blip", "wl", "--all"]);
        assert!(matches!(cli.command, Some(Command::Watchlist(_))));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["blip", "platforms", "-q", "-c", "/tmp/blip.toml"]);
        assert!(cli.quiet);
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("/tmp/blip.toml"))
        );
    }
}

// =============================================================================
// JSON Output Format Tests
// =============================================================================

mod json_output {
    use blip::cli::{ExitCode, JsonOutput};

    #[test]
    fn test_json_output_success() {
        let output = JsonOutput::success(vec![1, 2, 3]);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert!(json.get("error").is_none());
        assert!(json.get("exit_code").is_none());
    }

    #[test]
    fn test_json_output_error() {
        let output = JsonOutput::<()>::error_msg("backend down", ExitCode::NetworkError);
        let json = serde_json::to_value(&output).unwrap();
        assert!(json.get("data").is_none());
        assert_eq!(json["error"], "backend down");
        assert_eq!(json["exit_code"], 3);
    }
}

// =============================================================================
// Command Exit Codes
// =============================================================================

mod commands {
    use blip::cli::{DiscoverCmd, ExitCode, OpinionArg, Output, RateCmd, WatchlistCmd};
    use blip::commands::{discover_cmd, rate_cmd, watchlist_cmd};
    use blip::config::Settings;
    use blip::discovery::PlatformSet;
    use blip::models::Platform;
    use mockito::{Matcher, Server};

    fn output() -> Output {
        Output {
            json: true,
            quiet: true,
        }
    }

    fn settings(url: String) -> Settings {
        Settings {
            api_url: url,
            user_id: 1,
            platforms: PlatformSet::default_selection(),
        }
    }

    #[tokio::test]
    async fn test_discover_uses_configured_platforms() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/discover-movies")
            .match_query(Matcher::UrlEncoded(
                "platforms".into(),
                "Netflix,Prime Video,HBO Max,Disney Plus,Paramount Plus".into(),
            ))
            .with_status(200)
            .with_body(r#"[{"id": 1, "title": "Heat"}, {"id": 2, "title": "Ronin"}]"#)
            .create_async()
            .await;

        let cmd = DiscoverCmd {
            platforms: vec![],
            limit: Some(1),
        };
        let code = discover_cmd(cmd, &settings(server.url()), &output()).await;

        mock.assert_async().await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_discover_empty_result_is_no_movies() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/discover-movies")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let cmd = DiscoverCmd {
            platforms: vec![Platform::Hulu],
            limit: None,
        };
        let code = discover_cmd(cmd, &settings(server.url()), &output()).await;
        assert_eq!(code, ExitCode::NoMovies);
    }

    #[tokio::test]
    async fn test_discover_without_platforms_is_invalid() {
        let mut settings = settings("http://127.0.0.1:9".into());
        settings.platforms = PlatformSet::new();

        let cmd = DiscoverCmd {
            platforms: vec![],
            limit: None,
        };
        let code = discover_cmd(cmd, &settings, &output()).await;
        assert_eq!(code, ExitCode::InvalidArgs);
    }

    #[tokio::test]
    async fn test_rate_failure_is_network_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/user/1/movie")
            .with_status(500)
            .create_async()
            .await;

        let cmd = RateCmd {
            movie_id: 603,
            opinion: OpinionArg::Loved,
        };
        let code = rate_cmd(cmd, &settings(server.url()), &output()).await;
        assert_eq!(code, ExitCode::NetworkError);
    }

    #[tokio::test]
    async fn test_rate_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/user/1/movie")
            .match_body(Matcher::Json(serde_json::json!({"movie_id": 603, "opinion": 1})))
            .with_status(200)
            .create_async()
            .await;

        let cmd = RateCmd {
            movie_id: 603,
            opinion: OpinionArg::Loved,
        };
        let code = rate_cmd(cmd, &settings(server.url()), &output()).await;

        mock.assert_async().await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_watchlist_page_zero_is_invalid() {
        let cmd = WatchlistCmd {
            page: 0,
            all: false,
            opinion: OpinionArg::Watch,
        };
        let code = watchlist_cmd(cmd, &settings("http://127.0.0.1:9".into()), &output()).await;
        assert_eq!(code, ExitCode::InvalidArgs);
    }

    #[tokio::test]
    async fn test_watchlist_requests_chosen_opinion() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/user/1/movies")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("opinion".into(), "2".into()),
                Matcher::UrlEncoded("page".into(), "1".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"movies": [], "has_more": false}"#)
            .create_async()
            .await;

        let cmd = WatchlistCmd {
            page: 1,
            all: false,
            opinion: OpinionArg::Disliked,
        };
        let code = watchlist_cmd(cmd, &settings(server.url()), &output()).await;

        mock.assert_async().await;
        assert_eq!(code, ExitCode::Success);
    }
}
