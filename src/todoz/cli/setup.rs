use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "todoz", bin_name = "todoz", version)]
#[command(about = "A small task list for the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new item
    #[command(alias = "a")]
    Add {
        /// Item text (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List items (default command)
    #[command(alias = "ls")]
    List {
        /// Which items to show: all, active or completed
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Mark items completed, or reopen completed ones
    #[command(aliases = ["t", "done"])]
    Toggle {
        /// Indexes of the items (e.g. 1 3 2-4)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Replace the text of an item
    #[command(alias = "e")]
    Edit {
        /// Index of the item
        index: String,

        /// New text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Delete items
    #[command(alias = "rm")]
    Delete {
        /// Indexes of the items (e.g. 1 3 2-4)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Remove all completed items
    Clear,

    /// Show or switch the color theme (no value toggles)
    Theme {
        /// light or dark
        value: Option<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (line-width, removal-delay)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },

    /// Interactive session driven by line commands on stdin
    Session,
}
