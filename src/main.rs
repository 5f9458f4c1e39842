use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use failfast_lab::{run_probe, run_scenario, ProbeConfig, ScenarioConfig, ScenarioKind};
use tracing_subscriber::EnvFilter;

fn scenario_command(kind: ScenarioKind) -> Command {
    Command::new(kind.name())
        .about(kind.about())
        .arg(
            Arg::new("count")
                .long("count")
                .value_parser(value_parser!(usize))
                .help("Number of elements to populate (default depends on the scenario)"),
        )
        .arg(
            Arg::new("sample")
                .long("sample")
                .default_value("1000")
                .value_parser(value_parser!(usize))
                .help("Record a trace entry every N steps (0 disables)"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .default_value("42")
                .value_parser(value_parser!(u64))
                .help("Seed for worker start staggering"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Output the report as JSON"),
        )
}

fn probe_command() -> Command {
    Command::new("probe")
        .about("Run a racy scenario repeatedly and tally fault frequency")
        .arg(
            Arg::new("scenario")
                .long("scenario")
                .default_value("race-cursor")
                .help("Scenario to probe"),
        )
        .arg(
            Arg::new("runs")
                .long("runs")
                .default_value("100")
                .value_parser(value_parser!(u32))
                .help("Number of repeated runs"),
        )
        .arg(
            Arg::new("count")
                .long("count")
                .default_value("1000")
                .value_parser(value_parser!(usize))
                .help("Number of elements to populate per run"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .default_value("42")
                .value_parser(value_parser!(u64))
                .help("Base seed; each run derives its own"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Output the report as JSON"),
        )
}

fn run_probe_command(args: &ArgMatches) -> i32 {
    let name = args
        .get_one::<String>("scenario")
        .map(String::as_str)
        .unwrap_or("race-cursor");
    let kind = match name.parse::<ScenarioKind>() {
        Ok(kind) => kind,
        Err(err) => {
            eprintln!("{err}");
            return 2;
        }
    };

    let config = ProbeConfig {
        kind,
        runs: *args.get_one::<u32>("runs").unwrap(),
        population: *args.get_one::<usize>("count").unwrap(),
        seed: *args.get_one::<u64>("seed").unwrap(),
    };

    let report = run_probe(config);

    if args.get_flag("json") {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("failed to render report: {err}");
                return 2;
            }
        }
    } else {
        println!("{}", report.generate_text());
    }

    if report.passed() {
        0
    } else {
        2
    }
}

fn run_scenario_command(kind: ScenarioKind, args: &ArgMatches) -> i32 {
    let config = ScenarioConfig {
        population: args
            .get_one::<usize>("count")
            .copied()
            .unwrap_or_else(|| kind.default_population()),
        sample_every: *args.get_one::<usize>("sample").unwrap(),
        seed: *args.get_one::<u64>("seed").unwrap(),
    };

    let report = run_scenario(kind, &config);

    if args.get_flag("json") {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("failed to render report: {err}");
                return 2;
            }
        }
    } else {
        println!("{}", report.generate_text());
    }

    report.exit_code()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut cli = Command::new("failfast-lab")
        .version("0.1.0")
        .about("Mutation-hazard sandbox for ordered collections")
        .subcommand_required(true)
        .arg_required_else_help(true);

    for kind in ScenarioKind::ALL {
        cli = cli.subcommand(scenario_command(kind));
    }
    cli = cli.subcommand(probe_command());

    let matches = cli.get_matches();
    let Some((name, args)) = matches.subcommand() else {
        return;
    };

    let code = if name == "probe" {
        run_probe_command(args)
    } else {
        match name.parse::<ScenarioKind>() {
            Ok(kind) => run_scenario_command(kind, args),
            Err(err) => {
                eprintln!("{err}");
                2
            }
        }
    };

    std::process::exit(code);
}
