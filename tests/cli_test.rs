//! CLI Command Tests
//!
//! Argument parsing, JSON output shape, and command handlers run against a
//! mocked catalog.

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use clap::Parser;
    use cinerow::cli::{CategoryArg, Cli, Command, MediaTypeFilter};
    use cinerow::models::Category;

    #[test]
    fn test_search_command_basic() {
        let cli = Cli::parse_from(["cinerow", "search", "기생충"]);
        assert!(cli.is_cli_mode());
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.keyword, "기생충");
                assert_eq!(cmd.limit, 20);
                assert!(cmd.media_type.is_none());
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_search_with_filters() {
        let cli = Cli::parse_from(["cinerow", "s", "dune", "-t", "tv", "--limit", "5"]);
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.media_type, Some(MediaTypeFilter::Tv));
                assert_eq!(cmd.limit, 5);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_every_category_name_parses() {
        let names = [
            ("now-playing", Category::NowPlaying),
            ("popular-movies", Category::PopularMovies),
            ("top-rated-movies", Category::TopRatedMovies),
            ("upcoming", Category::Upcoming),
            ("airing-today", Category::AiringToday),
            ("popular-tv", Category::PopularTv),
            ("top-rated-tv", Category::TopRatedTv),
        ];
        for (name, expected) in names {
            let cli = Cli::parse_from(["cinerow", "list", name]);
            match cli.command {
                Some(Command::List(cmd)) => assert_eq!(Category::from(cmd.category), expected),
                _ => panic!("Expected List command for {}", name),
            }
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!(Cli::try_parse_from(["cinerow", "list", "trending"]).is_err());
    }

    #[test]
    fn test_window_command() {
        let cli = Cli::parse_from(["cinerow", "window", "popular-tv", "-s", "4", "-p", "2"]);
        match cli.command {
            Some(Command::Window(cmd)) => {
                assert_eq!(cmd.category, CategoryArg::PopularTv);
                assert_eq!(cmd.page_size, Some(4));
                assert_eq!(cmd.page, 2);
            }
            _ => panic!("Expected Window command"),
        }
    }

    #[test]
    fn test_seasons_requires_numbers() {
        assert!(Cli::try_parse_from(["cinerow", "seasons", "1399"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["cinerow", "videos", "603", "-t", "movie", "--json", "-q"]);
        assert!(cli.json);
        assert!(cli.quiet);
        match cli.command {
            Some(Command::Videos(cmd)) => {
                assert_eq!(cmd.id, 603);
                assert!(!cmd.trailer);
            }
            _ => panic!("Expected Videos command"),
        }
    }

    #[test]
    fn test_config_path_flag() {
        let cli = Cli::parse_from(["cinerow", "-c", "/tmp/cinerow.toml"]);
        assert!(!cli.is_cli_mode());
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("/tmp/cinerow.toml"))
        );
    }
}

// =============================================================================
// JSON Output Tests
// =============================================================================

mod json_output {
    use cinerow::cli::{ExitCode, JsonOutput};

    #[test]
    fn test_success_omits_error_and_exit_code() {
        let json = serde_json::to_value(JsonOutput::success(vec![1, 2])).unwrap();
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert!(json.get("error").is_none());
        assert!(json.get("exit_code").is_none());
    }

    #[test]
    fn test_error_carries_exit_code() {
        let json =
            serde_json::to_value(JsonOutput::<()>::error_msg("no key", ExitCode::MissingApiKey)).unwrap();
        assert_eq!(json["error"], "no key");
        assert_eq!(json["exit_code"], 5);
        assert!(json.get("data").is_none());
    }
}

// =============================================================================
// Command Handler Tests
// =============================================================================

mod handlers {
    use mockito::{Matcher, Server};
    use cinerow::cli::{
        CategoryArg, ExitCode, InfoCmd, ListCmd, MediaTypeFilter, Output, SearchCmd, WindowCmd,
    };
    use cinerow::commands;
    use cinerow::config::Config;

    fn config(url: String) -> Config {
        Config {
            tmdb_api_key: Some("test_key".into()),
            base_url: Some(url),
            ..Config::default()
        }
    }

    fn quiet_json() -> Output {
        Output {
            json: true,
            quiet: true,
        }
    }

    fn page_body(count: u64) -> String {
        let results: Vec<String> = (0..count)
            .map(|i| format!(r#"{{"id": {}, "title": "Movie {}"}}"#, i, i))
            .collect();
        format!(r#"{{"page": 1, "results": [{}]}}"#, results.join(","))
    }

    #[tokio::test]
    async fn test_list_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/movie/popular")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(200)
            .with_body(page_body(3))
            .create_async()
            .await;

        let cmd = ListCmd {
            category: CategoryArg::PopularMovies,
            page: Some(2),
            limit: 20,
        };
        let code = commands::list_cmd(cmd, &config(server.url()), &quiet_json()).await;

        mock.assert_async().await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_info_not_found_exit_code() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/tv/42")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let cmd = InfoCmd {
            id: 42,
            media_type: MediaTypeFilter::Tv,
        };
        let code = commands::info_cmd(cmd, &config(server.url()), &quiet_json()).await;
        assert_eq!(code, ExitCode::NotFound);
    }

    #[tokio::test]
    async fn test_search_short_keyword_is_invalid_args() {
        let server = Server::new_async().await;
        let cmd = SearchCmd {
            keyword: "x".into(),
            media_type: None,
            limit: 20,
        };
        let code = commands::search_cmd(cmd, &config(server.url()), &quiet_json()).await;
        assert_eq!(code, ExitCode::InvalidArgs);
    }

    #[tokio::test]
    async fn test_window_server_error_is_network_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/tv/popular")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let cmd = WindowCmd {
            category: CategoryArg::PopularTv,
            page_size: Some(6),
            page: 1,
        };
        let code = commands::window_cmd(cmd, &config(server.url()), &quiet_json()).await;
        assert_eq!(code, ExitCode::NetworkError);
    }

    #[tokio::test]
    async fn test_window_rejects_zero_page_size() {
        let server = Server::new_async().await;
        let cmd = WindowCmd {
            category: CategoryArg::Upcoming,
            page_size: Some(0),
            page: 0,
        };
        let code = commands::window_cmd(cmd, &config(server.url()), &quiet_json()).await;
        assert_eq!(code, ExitCode::InvalidArgs);
    }
}
