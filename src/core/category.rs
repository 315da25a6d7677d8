//! Category hierarchy helpers.
//!
//! Parent references are not enforced by storage, so both walks stop on
//! dangling parents and never revisit a category.

use crate::{
    db::{Filter, Repository},
    errors::Result,
    models::{Category, CategoryField},
};
use std::collections::{HashSet, VecDeque};

/// Looks up a category by its display name.
pub async fn find_category_by_name<C>(categories: &C, name: &str) -> Result<Option<Category>>
where
    C: Repository<Category>,
{
    Ok(categories
        .get_all(&Filter::new().eq(CategoryField::Name, name))
        .await?
        .into_iter()
        .next())
}

/// Ancestors of `category`, nearest first.
pub async fn parent_chain<C>(categories: &C, category: &Category) -> Result<Vec<Category>>
where
    C: Repository<Category>,
{
    let mut chain = Vec::new();
    let mut seen = HashSet::from([category.pk]);
    let mut next = category.parent;

    while let Some(pk) = next {
        if !seen.insert(pk) {
            break;
        }
        let Some(parent) = categories.get(pk).await? else {
            break;
        };
        next = parent.parent;
        chain.push(parent);
    }
    Ok(chain)
}

/// Every descendant of the category `pk`, breadth first.
pub async fn subcategories<C>(categories: &C, pk: i64) -> Result<Vec<Category>>
where
    C: Repository<Category>,
{
    let mut found = Vec::new();
    let mut seen = HashSet::from([pk]);
    let mut queue = VecDeque::from([pk]);

    while let Some(parent) = queue.pop_front() {
        let children = categories
            .get_all(&Filter::new().eq(CategoryField::Parent, parent))
            .await?;
        for child in children {
            if seen.insert(child.pk) {
                queue.push_back(child.pk);
                found.push(child);
            }
        }
    }
    Ok(found)
}
