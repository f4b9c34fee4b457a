/// Help overview for `willow`, `willow help` and `willow -h`.
///
/// Descriptions are taken from the clap definitions of each command so the
/// overview never drifts from `willow <command> --help`.
use anyhow::Result;
use clap::{Command, CommandFactory};

use crate::commands::{clone, config, init, list, new, prune, pwd, remove, run};
use crate::styles;

/// A category of commands with a title and list of commands.
struct CommandCategory {
    title: &'static str,
    commands: Vec<CommandEntry>,
}

/// A single command entry with its display name and clap Command.
struct CommandEntry {
    display_name: &'static str,
    command: Command,
}

fn get_command_categories() -> Vec<CommandCategory> {
    vec![
        CommandCategory {
            title: "start working on a repository",
            commands: vec![
                CommandEntry {
                    display_name: "clone",
                    command: clone::Args::command(),
                },
                CommandEntry {
                    display_name: "init",
                    command: init::Args::command(),
                },
            ],
        },
        CommandCategory {
            title: "work on branches (each branch gets its own directory)",
            commands: vec![
                CommandEntry {
                    display_name: "new",
                    command: new::Args::command(),
                },
                CommandEntry {
                    display_name: "ls",
                    command: list::Args::command(),
                },
                CommandEntry {
                    display_name: "pwd",
                    command: pwd::Args::command(),
                },
                CommandEntry {
                    display_name: "run",
                    command: run::Args::command(),
                },
            ],
        },
        CommandCategory {
            title: "clean up",
            commands: vec![
                CommandEntry {
                    display_name: "rm",
                    command: remove::Args::command(),
                },
                CommandEntry {
                    display_name: "prune",
                    command: prune::Args::command(),
                },
            ],
        },
        CommandCategory {
            title: "configure willow",
            commands: vec![CommandEntry {
                display_name: "config",
                command: config::Args::command(),
            }],
        },
    ]
}

fn get_about(cmd: &Command) -> String {
    cmd.get_about()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "(no description)".to_string())
}

fn render_overview() -> String {
    let mut out = String::new();
    out.push_str("usage: willow <command> [<args>]\n\n");
    out.push_str("Each branch lives in its own directory under ~/.willow/worktrees.\n");

    for category in get_command_categories() {
        out.push('\n');
        out.push_str(&styles::bold(category.title));
        out.push('\n');
        for entry in &category.commands {
            out.push_str(&styles::def(entry.display_name, &get_about(&entry.command)));
            out.push('\n');
        }
    }

    out.push_str("\naliases: n (new), l (ls)\n");
    out.push_str("\n'willow <command> --help' to read about a specific command.\n");
    out
}

pub fn run() -> Result<()> {
    print!("{}", render_overview());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_lists_every_command() {
        styles::disable_colors();
        let overview = render_overview();
        for name in ["clone", "init", "new", "ls", "pwd", "run", "rm", "prune", "config"] {
            assert!(
                overview.contains(&format!("  {name} ")),
                "missing {name} in:\n{overview}"
            );
        }
        assert!(overview.contains("Create a worktree for a new or existing branch"));
    }

    #[test]
    fn test_every_command_has_about() {
        for category in get_command_categories() {
            for entry in category.commands {
                assert_ne!(get_about(&entry.command), "(no description)");
            }
        }
    }
}
