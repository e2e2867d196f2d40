//! rtctoken - issue and inspect real-time channel access tokens

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use rtctoken_core::{inspect, unix_now, Privilege};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;
mod issue;
mod report;

use config::{Config, Overrides};
use report::TokenReport;

fn cli() -> Command {
    Command::new("rtctoken")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Issue and inspect real-time channel access tokens")
        .subcommand_required(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .help("Emit logs as JSON on stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("issue")
                .about("Build a signed token (certificate read from RTC_APP_CERTIFICATE)")
                .arg(
                    Arg::new("channel")
                        .long("channel")
                        .value_name("NAME")
                        .help("Channel to grant access to")
                        .required(true),
                )
                .arg(
                    Arg::new("uid")
                        .long("uid")
                        .value_name("UID")
                        .help("Subject user id, numeric or text")
                        .required(true),
                )
                .arg(
                    Arg::new("privileges")
                        .long("privileges")
                        .value_name("LIST")
                        .help("Comma-separated privileges: join, audio, video, data")
                        .default_value("join,audio,video,data"),
                )
                .arg(
                    Arg::new("app-id")
                        .long("app-id")
                        .value_name("ID")
                        .help("App id (overrides RTC_APP_ID)"),
                )
                .arg(
                    Arg::new("ttl")
                        .long("ttl")
                        .value_name("SECS")
                        .help("Privilege lifetime in seconds (overrides RTC_TOKEN_TTL_SECS)")
                        .value_parser(value_parser!(u32)),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Decode a token and print its claims (signature is not verified)")
                .arg(Arg::new("token").value_name("TOKEN").required(true)),
        )
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run_issue(matches: &ArgMatches) -> Result<()> {
    let overrides = Overrides {
        app_id: matches.get_one::<String>("app-id").cloned(),
        ttl_secs: matches.get_one::<u32>("ttl").copied(),
    };
    let config = Config::from_env(overrides)?;
    debug!(app_id = %config.app_id, ttl_secs = config.ttl_secs, "loaded issuer configuration");

    let channel = matches
        .get_one::<String>("channel")
        .context("--channel is required")?;
    let uid = matches
        .get_one::<String>("uid")
        .map(|raw| issue::parse_uid(raw))
        .context("--uid is required")?;
    let privileges: Vec<Privilege> = match matches.get_one::<String>("privileges") {
        Some(raw) => issue::parse_privileges(raw)?,
        None => Privilege::ALL.to_vec(),
    };

    let issued = issue::issue(&config, channel, uid, &privileges, unix_now())?;
    println!("{}", serde_json::to_string_pretty(&issued)?);
    Ok(())
}

fn run_inspect(matches: &ArgMatches) -> Result<()> {
    let token = matches
        .get_one::<String>("token")
        .context("token argument is required")?;
    let inspected = inspect(token).context("failed to decode token")?;
    println!("{}", serde_json::to_string_pretty(&TokenReport::from(inspected))?);
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    match matches.subcommand() {
        Some(("issue", sub)) => run_issue(sub),
        Some(("inspect", sub)) => run_inspect(sub),
        _ => unreachable!("subcommand_required is set"),
    }
}
