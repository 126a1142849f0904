use std::path::Path;

use sk_core::narrate_all;

pub fn run(events: &Path, strict: bool) -> Result<(), String> {
    let log = super::load_events(events, strict)?;

    for line in narrate_all(log.chronological()) {
        println!("{line}");
    }

    Ok(())
}
