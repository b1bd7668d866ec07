//! History command implementation

use console::Style;

use crate::cli::{HistoryArgs, HistorySubcommand};
use crate::error::Result;
use crate::history::HistoryStore;
use crate::ui;

/// Run history command
pub fn run(args: HistoryArgs) -> Result<()> {
    let store = HistoryStore::open_default()?;
    match args.command {
        HistorySubcommand::List(list) => {
            let items = store.load()?;
            if list.json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                ui::print_history(&items);
            }
        }
        HistorySubcommand::Clear => {
            store.clear()?;
            println!("{}", Style::new().green().apply_to("Download history cleared"));
        }
    }
    Ok(())
}
