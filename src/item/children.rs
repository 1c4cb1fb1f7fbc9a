//! Insertion-ordered child collection with case-insensitive lookup.

use super::element::{DocElement, DocKind};
use ahash::AHashMap;

/// Children of an element (or of the index root), keyed by lowercased name.
///
/// Enumeration follows insertion order. Registering a name that is already
/// present (case-insensitively) replaces the earlier element in place.
#[derive(Debug, Clone, Default)]
pub struct Children {
    entries: Vec<DocElement>,
    keys: AHashMap<String, usize>,
}

impl Children {
    pub(crate) fn insert(&mut self, element: DocElement) {
        let key = element.name.to_lowercase();
        if let Some(&index) = self.keys.get(&key) {
            tracing::debug!(
                "Duplicate name '{}' ({}), keeping the later registration",
                element.name,
                element.kind()
            );
            self.entries[index] = element;
        } else {
            self.keys.insert(key, self.entries.len());
            self.entries.push(element);
        }
    }

    /// Look up a child by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&DocElement> {
        let index = match self.keys.get(name) {
            Some(index) => *index,
            None => *self.keys.get(&name.to_lowercase())?,
        };
        self.entries.get(index)
    }

    /// Resolve a query term against these children.
    ///
    /// A trailing `()` restricts the match to methods and a leading `e-` to events;
    /// when the restricted lookup fails the term is tried literally. Elements for
    /// which `excluded` returns true never match.
    pub(crate) fn find(
        &self,
        term: &str,
        excluded: impl Fn(&DocElement) -> bool,
    ) -> Option<&DocElement> {
        let term = term.to_lowercase();
        let marked = if let Some(name) = term.strip_suffix("()") {
            Some((name, DocKind::Method))
        } else {
            term.strip_prefix("e-").map(|name| (name, DocKind::Event))
        };

        if let Some((name, kind)) = marked
            && let Some(child) = self.get(name)
            && child.kind() == kind
            && !excluded(child)
        {
            return Some(child);
        }

        self.get(&term).filter(|child| !excluded(child))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocElement> {
        self.entries.iter()
    }

    /// Children of one kind, in insertion order.
    pub fn of_kind(&self, kind: DocKind) -> impl Iterator<Item = &DocElement> {
        self.entries.iter().filter(move |child| child.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Children {
    type Item = &'a DocElement;
    type IntoIter = std::slice::Iter<'a, DocElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RawElement;
    use assert2::{check, let_assert};
    use rstest::rstest;

    fn element(kind: DocKind, name: &str, description: &str) -> DocElement {
        let raw = RawElement {
            name: name.to_string(),
            description: Some(description.to_string()),
            ..RawElement::default()
        };
        DocElement::from_raw(kind, raw, None)
    }

    fn sample() -> Children {
        let mut children = Children::default();
        children.insert(element(DocKind::Prop, "owner", "prop"));
        children.insert(element(DocKind::Method, "fetch", "method"));
        children.insert(element(DocKind::Event, "guildUpdate", "event"));
        children
    }

    #[rstest]
    #[case("owner", Some("owner"))]
    #[case("OWNER", Some("owner"))]
    #[case("fetch()", Some("fetch"))]
    #[case("e-guildupdate", Some("guildUpdate"))]
    #[case("guildupdate", Some("guildUpdate"))]
    #[case("missing", None)]
    fn find_resolves_terms(#[case] term: &str, #[case] expected: Option<&str>) {
        let children = sample();
        check!(children.find(term, |_| false).map(DocElement::name) == expected);
    }

    #[test]
    fn marker_for_wrong_kind_falls_back_to_literal_term() {
        let children = sample();
        // "owner()" is not a method and no child is literally named "owner()".
        check!(children.find("owner()", |_| false).is_none());
        check!(children.find("e-owner", |_| false).is_none());
    }

    #[test]
    fn excluded_elements_do_not_match() {
        let children = sample();
        let_assert!(Some(owner) = children.get("owner"));
        let is_owner = |e: &DocElement| std::ptr::eq(e, owner);
        check!(children.find("owner", is_owner).is_none());
        check!(children.find("fetch", is_owner).is_some());
    }

    #[test]
    fn later_duplicate_replaces_earlier_in_place() {
        let mut children = sample();
        children.insert(element(DocKind::Method, "Owner", "replacement"));

        check!(children.len() == 3);
        let names: Vec<_> = children.iter().map(DocElement::name).collect();
        check!(names == ["Owner", "fetch", "guildUpdate"]);
        let_assert!(Some(owner) = children.get("owner"));
        check!(owner.description() == Some("replacement"));
    }

    #[test]
    fn of_kind_filters_in_insertion_order() {
        let children = sample();
        let methods: Vec<_> = children.of_kind(DocKind::Method).map(DocElement::name).collect();
        check!(methods == ["fetch"]);
    }
}
