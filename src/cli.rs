// CLI definitions using clap

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "padbridge")]
#[command(author, version, about = "Map dance-pad buttons to keyboard keys")]
pub struct Cli {
    /// Keymap file path
    #[arg(short, long, default_value = "keymap.json", value_name = "FILE")]
    pub config: PathBuf,

    /// Print button names and resolved keys on press/release
    #[arg(long)]
    pub print_buttons: bool,

    /// Listen to all HID devices and print raw reports (no mapping)
    #[arg(long)]
    pub all_hid: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
