use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::sample;
use crate::store::{Collection, SnapshotBackend, Stores};

/// Copy the sample users and donations into their stores. A store that
/// already has records is left alone.
pub fn run<B: SnapshotBackend + Clone>(stores: &mut Stores<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    seed_into(stores, sample::users(), &mut result)?;
    seed_into(stores, sample::donations(), &mut result)?;
    Ok(result)
}

fn seed_into<T, B>(stores: &mut Stores<B>, rows: Vec<T>, result: &mut CmdResult) -> Result<()>
where
    T: Collection,
    B: SnapshotBackend + Clone,
{
    let store = stores.of_mut::<T>();
    if !store.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "{} store already has {} records, skipped",
            T::KIND,
            store.len()
        )));
        return Ok(());
    }

    let count = rows.len();
    for row in rows {
        store.add(row)?;
    }
    result.add_message(CmdMessage::success(format!(
        "Seeded {} {} records",
        count,
        T::KIND.to_lowercase()
    )));
    Ok(())
}
