use clap::Subcommand;

/// Audit ledger commands.
#[derive(Clone, Debug, Subcommand)]
pub enum LedgerCommands {
    /// Every entry in append order.
    List,
    /// One entry by its zero-based index.
    Get { index: u64 },
    /// Write every entry to a JSON Lines file.
    Export { path: String },
}
