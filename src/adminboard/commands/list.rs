use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{Collection, SnapshotBackend, Stores};
use crate::view::{list_view, ListFilter, Paging};

pub fn run<T, F, B>(stores: &Stores<B>, filter: &F, paging: Paging) -> Result<CmdResult<T>>
where
    T: Collection,
    F: ListFilter<T>,
    B: SnapshotBackend + Clone,
{
    let view = list_view(stores.of::<T>().all(), filter, paging);

    let mut result = CmdResult::default();
    if view.is_empty() && view.total_items > 0 {
        result.add_message(CmdMessage::warning(format!(
            "Page {} is past the last page ({}).",
            view.number, view.total_pages
        )));
    }
    Ok(result.with_listed(view))
}
