/// willow - worktree manager
///
/// Routes `willow <command>` to the matching command module and turns
/// errors into `error: <message>` with exit status 1.
use std::process::ExitCode;
use willow::{commands, log_error};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("help");

    let result = match command {
        "clone" => commands::clone::run(),
        "new" | "n" => commands::new::run(),
        "ls" | "l" => commands::list::run(),
        "pwd" => commands::pwd::run(),
        "rm" => commands::remove::run(),
        "run" => commands::run::run(),
        "prune" => commands::prune::run(),
        "init" => commands::init::run(),
        "config" => commands::config::run(),
        "help" | "-h" | "--help" => commands::docs::run(),
        "-V" | "--version" => {
            println!("willow {}", willow::VERSION_DISPLAY);
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!("Run 'willow help' for a list of commands.");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
