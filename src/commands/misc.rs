use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

pub fn display_banner() {
    println!(r#"
       _ _    __ _           _
  __ _(_) |_ / _(_)_ __   __| |
 / _` | | __| |_| | '_ \ / _` |
| (_| | | |_|  _| | | | | (_| |
 \__, |_|\__|_| |_|_| |_|\__,_|
 |___/
"#);

    let mut cmd = crate::Cli::command();
    let _ = cmd.print_help();
    println!();
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = crate::Cli::command();
    generate(shell, &mut cmd, "gitfind", &mut io::stdout());

    eprintln!();
    eprintln!("Save the output to the appropriate location for your shell:");
    match shell {
        Shell::Bash => {
            eprintln!("  gitfind completions bash > ~/.local/share/bash-completion/completions/gitfind");
        }
        Shell::Zsh => {
            eprintln!("  gitfind completions zsh > ~/.zsh/completions/_gitfind");
            eprintln!("  # (Add 'fpath=(~/.zsh/completions $fpath)' before 'compinit' in .zshrc)");
        }
        Shell::Fish => {
            eprintln!("  gitfind completions fish > ~/.config/fish/completions/gitfind.fish");
        }
        _ => {}
    }
}
