use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("earlyjobs-auth")
        .about("EarlyJobs session and identity tooling")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-url")
                .short('u')
                .long("api-url")
                .help("API base URL, example: https://api.earlyjobs.in")
                .env("EARLYJOBS_API_URL")
                .required(true),
        )
        .arg(
            Arg::new("token-file")
                .short('t')
                .long("token-file")
                .help("File used to persist the access token across runs")
                .env("EARLYJOBS_TOKEN_FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("EARLYJOBS_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(
            Command::new("login").about("Log in and store the access token").arg(
                Arg::new("email")
                    .short('e')
                    .long("email")
                    .help("Account email")
                    .required(true),
            )
            .arg(
                Arg::new("password")
                    .short('p')
                    .long("password")
                    .help("Account password")
                    .env("EARLYJOBS_PASSWORD")
                    .required(true),
            ),
        )
        .subcommand(
            Command::new("whoami")
                .about("Resolve a route guard against the current session")
                .arg(
                    Arg::new("path")
                        .long("path")
                        .help("Attempted location for the guard")
                        .default_value("/dashboard"),
                )
                .arg(
                    Arg::new("admin")
                        .long("admin")
                        .help("Evaluate the admin guard instead of the candidate guard")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("logout").about("Clear the session and tell the server"))
}
