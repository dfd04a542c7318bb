use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::forms::{Form, FormController};
use crate::model::Entity;
use crate::store::{Collection, SnapshotBackend, Stores};
use std::time::Duration;

pub fn run<F, B>(
    stores: &mut Stores<B>,
    input: F,
    submit_delay: Duration,
) -> Result<CmdResult<F::Output>>
where
    F: Form,
    F::Output: Collection,
    B: SnapshotBackend + Clone,
{
    let mut form = FormController::create(input).with_submit_delay(submit_delay);
    let record = form.submit(stores.of_mut::<F::Output>())?;

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "{} added: {}",
            F::Output::KIND,
            record.label()
        )))
        .with_affected(vec![record]))
}
