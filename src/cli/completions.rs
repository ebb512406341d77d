use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    reaper-theme-builder completions --shell bash > ~/.bash_completion.d/reaper-theme-builder\n\n\
                  Generate zsh completions:\n    reaper-theme-builder completions --shell zsh > ~/.zfunc/_reaper-theme-builder\n\n\
                  Generate fish completions:\n    reaper-theme-builder completions --shell fish > ~/.config/fish/completions/reaper-theme-builder.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long, short = 's')]
    pub shell: String,
}
