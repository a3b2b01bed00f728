use clap::Parser;
use lockdir::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => lockdir::cli::commands::init::execute(&cli),
        Commands::Add { ref file } => lockdir::cli::commands::add::execute(&cli, file),
        Commands::List => lockdir::cli::commands::list::execute(&cli),
        Commands::Extract { ref name, ref out } => {
            lockdir::cli::commands::extract::execute(&cli, name.as_deref(), out)
        }
        Commands::Drop { ref name, ref out } => {
            lockdir::cli::commands::drop::execute(&cli, name.as_deref(), out)
        }
        Commands::Remove { ref name } => lockdir::cli::commands::remove::execute(&cli, name),
        Commands::Clear { force } => lockdir::cli::commands::clear::execute(&cli, force),
        Commands::Recover {
            ref action,
            ref key,
        } => lockdir::cli::commands::recover::execute(&cli, action, key.as_deref()),
        Commands::Completions { ref shell } => lockdir::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        lockdir::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
