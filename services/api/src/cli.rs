use crate::report::{run_recommend, run_score, run_vocabulary, InputArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use major_advisor::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Major Advisor",
    about = "Recommend university majors from a RIASEC questionnaire",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a questionnaire file and print the selected majors without generating text
    Score(InputArgs),
    /// Score a questionnaire file and print the generated recommendation
    Recommend(InputArgs),
    /// List the labels accepted by each check-box question
    Vocabulary,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Recommend(args) => run_recommend(args).await,
        Command::Vocabulary => {
            run_vocabulary();
            Ok(())
        }
    }
}
