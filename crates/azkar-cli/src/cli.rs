use std::path::PathBuf;

use azkar_core::{AppIcon, ReminderSlot, ThemeMode};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "azkar")]
#[command(about = "Manage daily morning and evening azkar reminders")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Locale for time formatting (e.g. en-US, en-GB, ru)
    #[arg(long, global = true, value_name = "TAG")]
    pub locale: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show or change preferences
    Prefs {
        #[command(subcommand)]
        command: PrefsCommands,
    },
    /// List picker times for a reminder slot
    Options {
        /// Reminder slot
        #[arg(value_enum)]
        slot: SlotArg,
    },
    /// Inspect scheduled notifications (diagnostics)
    #[command(alias = "notif")]
    Notifications {
        #[command(subcommand)]
        command: NotificationCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum PrefsCommands {
    /// Show current preferences
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Turn daily reminders on
    Enable,
    /// Turn daily reminders off and clear the schedule
    Disable,
    /// Set a reminder time, e.g. `azkar prefs time morning 5:30 AM`
    Time {
        /// Reminder slot
        #[arg(value_enum)]
        slot: SlotArg,
        /// Time in the locale's short format
        #[arg(required = true, num_args = 1..)]
        time: Vec<String>,
    },
    /// Choose the home screen icon
    Icon {
        #[arg(value_enum)]
        icon: IconArg,
    },
    /// Choose the theme
    Theme {
        #[arg(value_enum)]
        theme: ThemeArg,
    },
    /// Toggle seasonal decorations
    Fun {
        #[arg(value_enum)]
        state: Toggle,
    },
}

#[derive(Subcommand)]
pub enum NotificationCommands {
    /// List pending and delivered notifications
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove every pending notification
    Clear,
    /// Deliver reminders due this minute
    Due,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SlotArg {
    Morning,
    Evening,
}

impl From<SlotArg> for ReminderSlot {
    fn from(value: SlotArg) -> Self {
        match value {
            SlotArg::Morning => Self::Morning,
            SlotArg::Evening => Self::Evening,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum IconArg {
    Gold,
    Ink,
    Light,
    Dark,
}

impl From<IconArg> for AppIcon {
    fn from(value: IconArg) -> Self {
        match value {
            IconArg::Gold => Self::Gold,
            IconArg::Ink => Self::Ink,
            IconArg::Light => Self::Light,
            IconArg::Dark => Self::Dark,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    System,
}

impl From<ThemeArg> for ThemeMode {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
            ThemeArg::System => Self::System,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
