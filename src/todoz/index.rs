//! # Display Indexes
//!
//! Item ids are opaque UUID strings, which nobody wants to type. Terminal
//! clients refer to items by their 1-based position in the full collection
//! instead: the third item ever added (and not yet deleted) is `3`, no matter
//! which filter is showing.
//!
//! Selectors accept:
//! - a single index: `3`
//! - a range: `2-4` (expands to 2, 3, 4)
//! - a full item id, for scripts that stored one

use crate::error::{Result, TodozError};
use crate::model::{Item, ItemId};
use std::str::FromStr;

/// A user input that selects one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSelector {
    Index(usize),
    Id(ItemId),
}

impl std::fmt::Display for ItemSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemSelector::Index(i) => write!(f, "{}", i),
            ItemSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for ItemSelector {
    type Err = TodozError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TodozError::Api("Empty item selector".to_string()));
        }
        if let Ok(n) = s.parse::<usize>() {
            if n == 0 {
                return Err(TodozError::Api("Indexes start at 1".to_string()));
            }
            return Ok(ItemSelector::Index(n));
        }
        Ok(ItemSelector::Id(ItemId::from(s)))
    }
}

/// Parses selector arguments, expanding `a-b` ranges.
pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<ItemSelector>> {
    let mut selectors = Vec::new();
    for input in inputs {
        let input = input.as_ref().trim();
        match parse_range(input)? {
            Some((start, end)) => selectors.extend((start..=end).map(ItemSelector::Index)),
            None => selectors.push(input.parse()?),
        }
    }
    Ok(selectors)
}

fn parse_range(input: &str) -> Result<Option<(usize, usize)>> {
    let Some((start, end)) = input.split_once('-') else {
        return Ok(None);
    };
    let (Ok(start), Ok(end)) = (start.parse::<usize>(), end.parse::<usize>()) else {
        // Ids are UUIDs and contain dashes
        return Ok(None);
    };
    if start == 0 || end < start {
        return Err(TodozError::Api(format!("Invalid range: {}", input)));
    }
    Ok(Some((start, end)))
}

/// Resolves a selector to the id of an existing item.
pub fn resolve(items: &[Item], selector: &ItemSelector) -> Result<ItemId> {
    let found = match selector {
        ItemSelector::Index(n) => items.get(n - 1),
        ItemSelector::Id(id) => items.iter().find(|item| &item.id == id),
    };
    found
        .map(|item| item.id.clone())
        .ok_or_else(|| TodozError::Api(format!("Item {} not found", selector)))
}

pub fn resolve_all(items: &[Item], selectors: &[ItemSelector]) -> Result<Vec<ItemId>> {
    let mut ids: Vec<ItemId> = Vec::with_capacity(selectors.len());
    for selector in selectors {
        let id = resolve(items, selector)?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<Item> {
        ["A", "B", "C"]
            .iter()
            .enumerate()
            .map(|(i, t)| Item {
                id: ItemId::from(format!("id-{}", i + 1)),
                text: t.to_string(),
                completed: false,
            })
            .collect()
    }

    #[test]
    fn parses_indexes_and_ids() {
        assert_eq!("2".parse::<ItemSelector>().unwrap(), ItemSelector::Index(2));
        assert_eq!(
            "abc".parse::<ItemSelector>().unwrap(),
            ItemSelector::Id(ItemId::from("abc"))
        );
        assert!("0".parse::<ItemSelector>().is_err());
        assert!("".parse::<ItemSelector>().is_err());
    }

    #[test]
    fn expands_ranges() {
        let parsed = parse_selectors(&["1", "3-4"]).unwrap();
        assert_eq!(
            parsed,
            vec![
                ItemSelector::Index(1),
                ItemSelector::Index(3),
                ItemSelector::Index(4)
            ]
        );
        assert!(parse_selectors(&["4-2"]).is_err());
    }

    #[test]
    fn uuid_is_not_mistaken_for_a_range() {
        let uuid = "0b6c2f51-8a3e-4d2a-9c57-3d1c9c5b9e10";
        assert_eq!(
            parse_selectors(&[uuid]).unwrap(),
            vec![ItemSelector::Id(ItemId::from(uuid))]
        );
    }

    #[test]
    fn resolves_against_collection_positions() {
        let items = items();
        assert_eq!(
            resolve(&items, &ItemSelector::Index(2)).unwrap(),
            ItemId::from("id-2")
        );
        assert_eq!(
            resolve(&items, &ItemSelector::Id(ItemId::from("id-3"))).unwrap(),
            ItemId::from("id-3")
        );
        assert!(resolve(&items, &ItemSelector::Index(4)).is_err());
        assert!(resolve(&items, &ItemSelector::Id(ItemId::from("x"))).is_err());
    }

    #[test]
    fn resolve_all_drops_duplicates() {
        let items = items();
        let ids = resolve_all(
            &items,
            &[ItemSelector::Index(1), ItemSelector::Id(ItemId::from("id-1"))],
        )
        .unwrap();
        assert_eq!(ids, vec![ItemId::from("id-1")]);
    }
}
