use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{Collection, SnapshotBackend, Stores};
use uuid::Uuid;

pub fn run<T, B>(stores: &mut Stores<B>, id: &Uuid) -> Result<CmdResult<T>>
where
    T: Collection,
    B: SnapshotBackend + Clone,
{
    let removed = stores.of_mut::<T>().delete(id)?;

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "{} deleted: {}",
            T::KIND,
            removed.label()
        )))
        .with_affected(vec![removed]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Blog;
    use crate::store::mem_backend::MemBackend;
    use crate::test_utils::blog;

    #[test]
    fn deletes_by_id() {
        let mut stores = Stores::open(MemBackend::new()).unwrap();
        let a = stores.blogs.add(blog("A post", None)).unwrap();
        stores.blogs.add(blog("B post", None)).unwrap();

        let result = run::<Blog, _>(&mut stores, &a.id).unwrap();
        assert_eq!(result.messages[0].content, "Blog deleted: A post");
        assert_eq!(stores.blogs.len(), 1);
        assert!(stores.blogs.get(&a.id).is_none());
    }

    #[test]
    fn deleting_twice_reports_not_found() {
        let mut stores = Stores::open(MemBackend::new()).unwrap();
        let a = stores.blogs.add(blog("A post", None)).unwrap();
        run::<Blog, _>(&mut stores, &a.id).unwrap();

        let err = run::<Blog, _>(&mut stores, &a.id).unwrap_err();
        assert!(err.is_not_found());
        assert!(stores.blogs.is_empty());
    }
}
