//! Path assignment policy.
//!
//! A path is `parent_path + "/" + tag + suffix`. The suffix is `[n]` for the
//! n-th same-tag sibling when n > 1. The first occurrence is bracketed as
//! `[1]` only when the tag repeats among its siblings (and is not listed in
//! `elements_array`), or when it is a lone leaf and `leaf_omit` is off.
//!
//! Turning `leaf_omit` off overrides the single-occurrence rule for childless
//! elements: `<root><a/><b><x/></b></root>` gives `/root/a[1]`, `/root/b` and
//! `/root/b/x[1]`.

use std::collections::HashMap;

use crate::constants::PATH_SEPARATOR;
use crate::settings::BuildSettings;
use crate::xml::DomElement;

/// Sibling position of one element among its same-tag siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiblingPosition {
    /// 1-based index in document order.
    pub index: usize,
    /// Number of siblings sharing the tag.
    pub total: usize,
}

/// Computes the same-tag sibling position of every element in `siblings`.
pub fn sibling_positions<'a, I>(siblings: I) -> Vec<SiblingPosition>
where
    I: IntoIterator<Item = &'a DomElement>,
    I::IntoIter: Clone,
{
    let siblings = siblings.into_iter();

    let mut totals: HashMap<&str, usize> = HashMap::new();
    for element in siblings.clone() {
        *totals.entry(element.local_name()).or_insert(0) += 1;
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    siblings
        .map(|element| {
            let tag = element.local_name();
            let index = seen.entry(tag).or_insert(0);
            *index += 1;
            SiblingPosition {
                index: *index,
                total: totals.get(tag).copied().unwrap_or(1),
            }
        })
        .collect()
}

/// Returns the index pinned by the configured index attribute, if any.
///
/// Only positive integers are honored.
fn pinned_index(element: &DomElement, settings: &BuildSettings) -> Option<usize> {
    let attribute = settings.index_attribute.as_deref()?;
    let value = element.attribute(attribute)?;
    value.trim().parse::<usize>().ok().filter(|&n| n > 0)
}

/// Returns the bracket suffix for an element, possibly empty.
pub fn index_suffix(
    element: &DomElement,
    position: SiblingPosition,
    settings: &BuildSettings,
) -> String {
    let index = pinned_index(element, settings).unwrap_or(position.index);

    if index > 1 {
        return format!("[{}]", index);
    }
    if settings.is_array_element(element.local_name()) {
        return String::new();
    }
    if position.total > 1 {
        return "[1]".to_string();
    }
    if element.is_leaf() && !settings.leaf_omit {
        return "[1]".to_string();
    }
    String::new()
}

/// Builds the path of a child element under `parent_path`.
///
/// The root element has an empty parent path, giving `/tag`.
pub fn child_path(
    parent_path: &str,
    element: &DomElement,
    position: SiblingPosition,
    settings: &BuildSettings,
) -> String {
    let suffix = index_suffix(element, position, settings);
    let tag = element.local_name();
    let mut path = String::with_capacity(parent_path.len() + tag.len() + suffix.len() + 1);
    path.push_str(parent_path);
    path.push(PATH_SEPARATOR);
    path.push_str(tag);
    path.push_str(&suffix);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::DomNode;

    const ONCE: SiblingPosition = SiblingPosition { index: 1, total: 1 };

    fn leaf(tag: &str) -> DomElement {
        DomElement::new(tag)
    }

    fn branch(tag: &str) -> DomElement {
        DomElement::new(tag).with_child(DomNode::Element(DomElement::new("x")))
    }

    #[test]
    fn test_sibling_positions() {
        let siblings = [leaf("a"), leaf("b"), leaf("a"), leaf("a")];
        let positions = sibling_positions(siblings.iter());
        let pairs: Vec<(usize, usize)> = positions.iter().map(|p| (p.index, p.total)).collect();
        assert_eq!(pairs, vec![(1, 3), (1, 1), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_single_occurrence_has_no_suffix() {
        let settings = BuildSettings::default();
        assert_eq!(index_suffix(&leaf("a"), ONCE, &settings), "");
        assert_eq!(index_suffix(&branch("a"), ONCE, &settings), "");
    }

    #[test]
    fn test_repeated_tags_are_all_bracketed() {
        let settings = BuildSettings::default();
        let first = SiblingPosition { index: 1, total: 3 };
        let third = SiblingPosition { index: 3, total: 3 };
        assert_eq!(index_suffix(&leaf("item"), first, &settings), "[1]");
        assert_eq!(index_suffix(&leaf("item"), third, &settings), "[3]");
    }

    #[test]
    fn test_elements_array_drops_first_bracket() {
        let settings = BuildSettings {
            elements_array: vec!["item".to_string()],
            ..BuildSettings::default()
        };
        let first = SiblingPosition { index: 1, total: 2 };
        let second = SiblingPosition { index: 2, total: 2 };
        assert_eq!(index_suffix(&leaf("Item"), first, &settings), "");
        assert_eq!(index_suffix(&leaf("Item"), second, &settings), "[2]");
    }

    #[test]
    fn test_leaf_omit_disabled() {
        let settings = BuildSettings {
            leaf_omit: false,
            ..BuildSettings::default()
        };
        assert_eq!(index_suffix(&leaf("a"), ONCE, &settings), "[1]");
        assert_eq!(index_suffix(&branch("a"), ONCE, &settings), "");
    }

    #[test]
    fn test_leaf_omit_disabled_paths() {
        let settings = BuildSettings {
            leaf_omit: false,
            ..BuildSettings::default()
        };
        let b = branch("b");
        assert_eq!(child_path("/root", &leaf("a"), ONCE, &settings), "/root/a[1]");
        assert_eq!(child_path("/root", &b, ONCE, &settings), "/root/b");
        assert_eq!(child_path("/root/b", &leaf("x"), ONCE, &settings), "/root/b/x[1]");
    }

    #[test]
    fn test_index_attribute_overrides_position() {
        let settings = BuildSettings {
            index_attribute: Some("seq".to_string()),
            ..BuildSettings::default()
        };
        let pinned = leaf("row").with_attribute("seq", "7");
        assert_eq!(index_suffix(&pinned, ONCE, &settings), "[7]");

        let pinned_first = leaf("row").with_attribute("seq", "1");
        let second = SiblingPosition { index: 2, total: 2 };
        assert_eq!(index_suffix(&pinned_first, second, &settings), "[1]");
    }

    #[test]
    fn test_index_attribute_ignores_non_positive_values() {
        let settings = BuildSettings {
            index_attribute: Some("seq".to_string()),
            ..BuildSettings::default()
        };
        let second = SiblingPosition { index: 2, total: 2 };
        for value in ["0", "-3", "abc", ""] {
            let element = leaf("row").with_attribute("seq", value);
            assert_eq!(index_suffix(&element, second, &settings), "[2]", "{}", value);
        }
    }

    #[test]
    fn test_child_path() {
        let settings = BuildSettings::default();
        assert_eq!(child_path("", &leaf("root"), ONCE, &settings), "/root");
        let second = SiblingPosition { index: 2, total: 2 };
        assert_eq!(
            child_path("/root", &leaf("item"), second, &settings),
            "/root/item[2]"
        );
    }
}
