use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::forms::{Form, FormController};
use crate::model::Entity;
use crate::store::{Collection, SnapshotBackend, Stores};
use std::time::Duration;
use uuid::Uuid;

/// Open the edit form for `id`, apply `change`, submit.
pub fn run<F, B>(
    stores: &mut Stores<B>,
    id: &Uuid,
    change: impl FnOnce(&mut F),
    submit_delay: Duration,
) -> Result<CmdResult<F::Output>>
where
    F: Form,
    F::Output: Collection,
    B: SnapshotBackend + Clone,
{
    let store = stores.of_mut::<F::Output>();
    let mut form = FormController::<F>::edit(store, id)?.with_submit_delay(submit_delay);
    form.update(change);
    let record = form.submit(store)?;

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "{} updated: {}",
            F::Output::KIND,
            record.label()
        )))
        .with_affected(vec![record]))
}
