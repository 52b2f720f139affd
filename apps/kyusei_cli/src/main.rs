use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use kyusei::solar::{solar_terms_confidence, SolarTermKind, SolarTermsWarning};
use kyusei::{
    check_dst_transition, parse_birth_instant, CalculationInput, CalculationMethod, Calculator, DstWarning,
    NineStarKiProfile, StarNumber,
};
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Calculator settings (otherwise configs/kyusei.toml is probed, then defaults).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long, global = true, default_value_t = false)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate a full Nine Star Ki profile.
    Profile {
        /// YYYY-MM-DD or an RFC 3339 date-time.
        #[arg(long)]
        date: String,

        /// 24-hour HH:MM, local to --timezone when given.
        #[arg(long)]
        time: Option<String>,

        /// IANA timezone name, e.g. America/Los_Angeles.
        #[arg(long)]
        timezone: Option<String>,

        /// traditional or chinese-ascending.
        #[arg(long, default_value = "traditional")]
        method: String,

        /// Also check the exact DST transition dates of the zone.
        #[arg(long, default_value_t = false)]
        dst_check: bool,
    },
    /// List the yearly cycle for every year from birth onward.
    Cycles {
        #[arg(long)]
        principal: u8,

        #[arg(long)]
        birth_year: i32,

        /// Years past the current one (defaults to the configured value).
        #[arg(long)]
        years_ahead: Option<i32>,
    },
    /// Previous, current and next yearly cycle.
    Timeline {
        #[arg(long)]
        principal: u8,

        /// Reference date (default: now).
        #[arg(long)]
        date: Option<String>,
    },
    /// Solar term boundaries of one solar year.
    Terms {
        #[arg(long)]
        year: i32,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileOutput {
    shorthand: String,
    profile: NineStarKiProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    dst_check: Option<DstWarning>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TermOutput {
    term: SolarTermKind,
    name: &'static str,
    english_name: &'static str,
    date: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TermsOutput {
    solar_year: i32,
    strategy: &'static str,
    data_confidence: SolarTermsWarning,
    terms: Vec<TermOutput>,
}

fn principal_arg(value: u8) -> anyhow::Result<StarNumber> {
    StarNumber::new(value).with_context(|| format!("--principal must be 1-9, got {}", value))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = kyusei_config::load_settings(args.config.as_deref())?;
    log::info!("calculator config: {:?}", config);
    let calculator = Calculator::with_config(config);

    match args.command {
        Command::Profile {
            date,
            time,
            timezone,
            method,
            dst_check,
        } => {
            let method = CalculationMethod::from_str(&method).map_err(anyhow::Error::msg)?;
            let mut input = CalculationInput::new(date).with_method(method);
            if let Some(time) = time {
                input = input.with_time(time);
            }
            if let Some(timezone) = timezone {
                input = input.with_timezone(timezone);
            }

            let profile = calculator
                .calculate_profile(&input)
                .with_context(|| format!("Failed to calculate profile for {}", input.date))?;
            for warning in &profile.warnings {
                eprintln!("[kyusei] {}", warning.message);
            }
            let output = ProfileOutput {
                shorthand: profile.shorthand(),
                dst_check: dst_check.then(|| check_dst_transition(&input)),
                profile,
            };
            print_json(&output, args.pretty)
        }
        Command::Cycles {
            principal,
            birth_year,
            years_ahead,
        } => {
            let principal = principal_arg(principal)?;
            let years_ahead = years_ahead.unwrap_or(calculator.config().years_ahead);
            let entries = kyusei::all_year_cycles(principal, birth_year, years_ahead)?;
            print_json(&entries, args.pretty)
        }
        Command::Timeline { principal, date } => {
            let principal = principal_arg(principal)?;
            let at = match date {
                Some(date) => parse_birth_instant(&CalculationInput::new(date.clone()))
                    .with_context(|| format!("Invalid --date {}", date))?,
                None => Utc::now(),
            };
            let timeline = calculator.year_cycle_timeline(principal, at)?;
            print_json(&timeline, args.pretty)
        }
        Command::Terms { year } => {
            let table = calculator.table();
            let terms = table.terms_for_year(year);
            let output = TermsOutput {
                solar_year: year,
                strategy: table.source().name(),
                data_confidence: solar_terms_confidence(year),
                terms: terms
                    .iter()
                    .map(|(term, date)| TermOutput {
                        term,
                        name: term.display_name(),
                        english_name: term.english_name(),
                        date,
                    })
                    .collect(),
            };
            print_json(&output, args.pretty)
        }
    }
}
