//! Command line arguments.
use std::path::PathBuf;

use clap::Parser;

/// Resolve a tech attack from a world catalog.
#[derive(Debug, Parser)]
#[command(name = "mechflow", version, about)]
pub struct Args {
    /// World catalog to load; defaults to `world.ron` in the data directory.
    pub world: Option<PathBuf>,

    /// Directory holding `world.ron`.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Acting actor id.
    #[arg(short, long)]
    pub attacker: String,

    /// Item to attack with. Its owner must be the attacker.
    #[arg(short, long)]
    pub item: Option<String>,

    /// Item action to use, e.g. `system.actions.0`.
    #[arg(long)]
    pub action: Option<String>,

    /// Target actor id (repeatable).
    #[arg(short, long = "target")]
    pub targets: Vec<String>,

    /// Accept the accuracy/difficulty prompt without asking.
    #[arg(short, long)]
    pub yes: bool,

    /// Dice seed; overrides `MECHFLOW_DICE_SEED`.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the attacker's inventory instead of attacking.
    #[arg(long)]
    pub inventory: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_targets() {
        let args = Args::parse_from([
            "mechflow", "-a", "mech", "--item", "scanner", "-t", "a", "-t", "b", "--yes",
        ]);
        assert_eq!(args.attacker, "mech");
        assert_eq!(args.item.as_deref(), Some("scanner"));
        assert_eq!(args.targets, vec!["a", "b"]);
        assert!(args.yes);
        assert_eq!(args.data_dir, PathBuf::from("data"));
        assert!(args.world.is_none());
    }
}
