use anyhow::Result;

use crate::db::Store;

/// Dumps every tracking record for inspection.
pub fn run(store: &Store) -> Result<()> {
    let records = store.records()?;

    if records.is_empty() {
        println!("Database is empty. Run 'build_db' first.");
        return Ok(());
    }

    for record in records {
        println!("{:#?}", record);
    }

    Ok(())
}
