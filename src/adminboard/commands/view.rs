use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{Collection, SnapshotBackend, Stores};
use uuid::Uuid;

/// Look up one record; a missing id is `NotFound`.
pub fn run<T, B>(stores: &Stores<B>, id: &Uuid) -> Result<CmdResult<T>>
where
    T: Collection,
    B: SnapshotBackend + Clone,
{
    let record = stores.of::<T>().require(id)?.clone();
    Ok(CmdResult::default().with_affected(vec![record]))
}
