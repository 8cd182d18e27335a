use clap::{Parser, Subcommand};
use placecodec::{Direction, ErrorPolicy};
use placecodec_cli::{
    Convention, ConvertOptions, InputFormat, inspect_json,
    logging::{LogFormat, LoggingConfig, init_logging},
    render_inspect, run_convert_command,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert placeholders in localized values.
    Convert {
        /// Conversion direction: to-android, from-android, to-flash, from-flash
        #[arg(short, long)]
        direction: Direction,

        /// The input file to read values from (stdin if omitted)
        #[arg(short, long, conflicts_with = "value")]
        input: Option<String>,

        /// The output file to write the results to (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Convert this single value instead of reading input
        #[arg(long)]
        value: Option<String>,

        /// Layout of the input and output
        #[arg(long, value_enum, default_value_t = InputFormat::Lines)]
        format: InputFormat,

        /// What to do with values that cannot be converted: abort, skip or keep
        #[arg(long, default_value = "abort")]
        on_error: ErrorPolicy,
    },

    /// Show how a value is tokenized and what each conversion produces.
    Inspect {
        /// The value to inspect
        #[arg(long)]
        value: String,

        /// Grammar used to recognise specifiers
        #[arg(long, value_enum, default_value_t = Convention::Twine)]
        convention: Convention,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(&LoggingConfig::from_verbosity(args.verbose, args.log_format)) {
        eprintln!("Warning: {}", e);
    }

    let result = match args.commands {
        Commands::Convert {
            direction,
            input,
            output,
            value,
            format,
            on_error,
        } => run_convert_command(ConvertOptions {
            direction,
            input,
            output,
            value,
            format,
            on_error,
        }),
        Commands::Inspect {
            value,
            convention,
            json,
        } => {
            if json {
                inspect_json(&value, convention).map(|out| println!("{}", out))
            } else {
                print!("{}", render_inspect(&value, convention));
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}
