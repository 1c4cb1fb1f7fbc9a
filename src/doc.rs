//! The documentation index for one source version.
//!
//! A [`Doc`] owns every element built from a docgen payload, resolves exact
//! dotted/hashed paths, runs fuzzy searches, and renders results.

use crate::config::SiteConfig;
use crate::error::SourceError;
use crate::format::renderers::{self, Embed};
use crate::format::{TypeFormatter, markup};
use crate::item::{Children, DocElement, DocKind, ElementRef};
use crate::raw::{RawDocs, RawElement};
use crate::search::{FuzzyIndex, SearchEntry, parse_query_path, split_entry_id};
use serde_json::{Map, Value};
use std::fmt::{self, Debug, Formatter};
use std::time::Instant;

const ORIGIN_PREFIX: &str = "https://raw.githubusercontent.com/";

/// Maximum number of results a search returns.
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Where a documentation payload was published: `<project>/<repo>/<ref>/<branch>.json`
/// under the raw GitHub content host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOrigin {
    url: String,
    project: String,
    repo: String,
    branch: String,
}

impl SourceOrigin {
    pub fn parse(url: &str) -> Result<Self, SourceError> {
        let invalid = |reason: &str| SourceError::InvalidOrigin {
            url: url.to_string(),
            reason: reason.to_string(),
        };

        let path = url
            .strip_prefix(ORIGIN_PREFIX)
            .ok_or_else(|| invalid("expected a raw.githubusercontent.com URL"))?;
        let segments: Vec<&str> = path.split('/').collect();
        let [project, repo, _, file, ..] = segments.as_slice() else {
            return Err(invalid("expected <project>/<repo>/<ref>/<branch>.json"));
        };
        let Some(branch) = file.strip_suffix(".json") else {
            return Err(invalid("expected a .json payload"));
        };
        if project.is_empty() || repo.is_empty() || branch.is_empty() {
            return Err(invalid("empty project, repository or branch"));
        }

        Ok(Self {
            url: url.to_string(),
            project: (*project).to_string(),
            repo: (*repo).to_string(),
            branch: branch.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }
}

/// Options shared by searches and rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupOptions {
    /// Drop private elements from search results and member listings.
    pub exclude_private: bool,
}

/// In-memory documentation tree for one source version.
///
/// Immutable once built; every element is reachable from the top-level children,
/// and the search index covers top-level elements and their direct members.
pub struct Doc {
    origin: SourceOrigin,
    site: SiteConfig,
    children: Children,
    index: FuzzyIndex,
}

impl Doc {
    /// Build the tree from an already-parsed payload.
    pub fn new(url: &str, docs: RawDocs, site: SiteConfig) -> Result<Self, SourceError> {
        let start = Instant::now();
        let origin = SourceOrigin::parse(url)?;

        let RawDocs {
            classes,
            typedefs,
            interfaces,
        } = docs;
        let mut children = Children::default();
        adopt_all(&mut children, classes, DocKind::Class);
        adopt_all(&mut children, typedefs, DocKind::Typedef);
        adopt_all(&mut children, interfaces, DocKind::Interface);

        let index = FuzzyIndex::new(search_entries(&children));

        tracing::info!(
            "Indexed {}/{}@{}: {} top-level elements, {} search entries in {:.2?}",
            origin.project,
            origin.repo,
            origin.branch,
            children.len(),
            index.len(),
            start.elapsed()
        );

        Ok(Self {
            origin,
            site,
            children,
            index,
        })
    }

    /// Parse a docgen JSON payload and build the tree.
    pub fn from_json(url: &str, json: &str, site: SiteConfig) -> Result<Self, SourceError> {
        let docs: RawDocs = serde_json::from_str(json).map_err(|e| SourceError::Malformed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Self::new(url, docs, site)
    }

    pub const fn origin(&self) -> &SourceOrigin {
        &self.origin
    }

    pub fn url(&self) -> &str {
        &self.origin.url
    }

    pub fn project(&self) -> &str {
        &self.origin.project
    }

    pub fn repo(&self) -> &str {
        &self.origin.repo
    }

    pub fn branch(&self) -> &str {
        &self.origin.branch
    }

    pub const fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Repository browse URL for this branch.
    pub fn repo_url(&self) -> String {
        format!(
            "https://github.com/{}/{}/blob/{}",
            self.origin.project, self.origin.repo, self.origin.branch
        )
    }

    /// Documentation site root for this branch.
    pub fn base_docs_url(&self) -> Option<String> {
        let base = self.site.base_url.as_deref()?;
        Some(format!("{}/#/docs/main/{}", base.trim_end_matches('/'), self.origin.branch))
    }

    pub fn icon(&self) -> Option<String> {
        let base = self.site.base_url.as_deref()?;
        Some(format!("{}/static/favicon.png", base.trim_end_matches('/')))
    }

    pub const fn color(&self) -> u32 {
        self.site.color
    }

    /// Top-level elements in registration order.
    pub fn children(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.children.iter().map(|child| ElementRef::new(self, child))
    }

    fn top_level(&self, kind: DocKind) -> impl Iterator<Item = ElementRef<'_>> {
        self.children
            .of_kind(kind)
            .map(|child| ElementRef::new(self, child))
    }

    pub fn classes(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.top_level(DocKind::Class)
    }

    pub fn typedefs(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.top_level(DocKind::Typedef)
    }

    pub fn interfaces(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.top_level(DocKind::Interface)
    }

    pub fn search_entries(&self) -> &[SearchEntry] {
        self.index.entries()
    }

    /// Resolve one term against the top-level elements.
    pub fn find_child(&self, term: &str, exclude: &[ElementRef<'_>]) -> Option<ElementRef<'_>> {
        self.children
            .find(term, |child| exclude.iter().any(|e| e.is(child)))
            .map(|child| ElementRef::new(self, child))
    }

    /// Resolve a path of terms, e.g. `["Guild", "owner", "username"]`.
    pub fn get<S: AsRef<str>>(&self, terms: &[S]) -> Option<ElementRef<'_>> {
        self.get_excluding(terms, &[])
    }

    /// Resolve a path of terms, never matching a member listed in `exclude`.
    ///
    /// The first term must name a top-level element. Each further term is looked up
    /// among the current element's children; when more terms remain and the matched
    /// child is typed by a top-level element, resolution continues in that element.
    pub fn get_excluding<S: AsRef<str>>(
        &self,
        terms: &[S],
        exclude: &[ElementRef<'_>],
    ) -> Option<ElementRef<'_>> {
        let mut terms = terms
            .iter()
            .map(S::as_ref)
            .filter(|term| !term.is_empty())
            .peekable();

        let mut element = self.find_child(terms.next()?, &[])?;
        while let Some(term) = terms.next() {
            let child = element.find_child(term, exclude)?;
            element = match child.type_element() {
                Some(ty) if terms.peek().is_some() => {
                    tracing::trace!("Descending from {} into {}", child.name(), ty.name());
                    ty
                }
                _ => child,
            };
        }
        Some(element)
    }

    /// Resolve a free-text query like `Guild.owner` or `Client#fetch()`.
    pub fn get_path(&self, query: &str) -> Option<ElementRef<'_>> {
        self.get(&parse_query_path(query))
    }

    /// Fuzzy search, best match first, at most [`MAX_SEARCH_RESULTS`] results.
    ///
    /// Private elements are dropped when `options.exclude_private` is set. Returns
    /// `None` when nothing survives filtering.
    pub fn search(&self, query: &str, options: LookupOptions) -> Option<Vec<ElementRef<'_>>> {
        let mut results: Vec<ElementRef<'_>> = Vec::new();
        for id in self.index.search(query) {
            if results.len() >= MAX_SEARCH_RESULTS {
                break;
            }
            let Some(element) = self.get_excluding(&split_entry_id(id), &results) else {
                continue;
            };
            if options.exclude_private && element.is_private() {
                continue;
            }
            if !results.contains(&element) {
                results.push(element);
            }
        }

        tracing::debug!("Search for '{}' returned {} results", query, results.len());
        (!results.is_empty()).then_some(results)
    }

    /// Exact resolution first, then a search-results card; `None` when nothing matches.
    pub fn resolve_embed(&self, query: &str, options: LookupOptions) -> Option<Embed> {
        if let Some(element) = self.get_path(query) {
            return Some(element.embed(options));
        }
        let results = self.search(query, options)?;
        Some(renderers::render_search_results(self, &results))
    }

    /// An empty card carrying this source's branding.
    pub fn base_embed(&self) -> Embed {
        renderers::base_embed(self)
    }

    /// Format a type expression, linking tokens that name top-level elements.
    pub fn format_type<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        TypeFormatter::new(self).format_type(tokens)
    }

    /// Replace `{@link Target}` spans with links to the resolved element.
    pub fn resolve_links(&self, text: &str) -> String {
        markup::resolve_links(text, |target| self.get_path(target).map(|e| e.link()))
    }

    /// Structural JSON dump of the whole tree.
    ///
    /// Keys `classes`, `typedefs` and `interfaces` appear only when non-empty.
    pub fn dump(&self) -> Value {
        let mut json = Map::new();
        for (key, kind) in [
            ("classes", DocKind::Class),
            ("typedefs", DocKind::Typedef),
            ("interfaces", DocKind::Interface),
        ] {
            let elements: Vec<Value> = self.top_level(kind).map(|e| e.dump()).collect();
            if !elements.is_empty() {
                json.insert(key.into(), Value::Array(elements));
            }
        }
        Value::Object(json)
    }
}

impl Debug for Doc {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Doc")
            .field("origin", &self.origin)
            .field("children", &self.children.len())
            .field("search_entries", &self.index.len())
            .finish_non_exhaustive()
    }
}

fn adopt_all(children: &mut Children, records: Vec<RawElement>, kind: DocKind) {
    for record in records {
        children.insert(DocElement::from_raw(kind, record, None));
    }
}

/// Flatten the tree into search entries: every top-level element, then every direct member.
fn search_entries(children: &Children) -> Vec<SearchEntry> {
    let top_level = children
        .iter()
        .map(|element| SearchEntry::new(element.name(), element.name()));
    let members = children.iter().flat_map(|parent| {
        parent.children().iter().map(move |member| {
            SearchEntry::new(format!("{}#{}", parent.name(), member.name()), member.name())
        })
    });
    top_level.chain(members).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    #[test]
    fn origin_is_dissected_from_raw_url() {
        let_assert!(
            Ok(origin) = SourceOrigin::parse(
                "https://raw.githubusercontent.com/Hypixel-API-Reborn/hypixel-api-reborn/docs/master.json"
            )
        );
        check!(origin.project() == "Hypixel-API-Reborn");
        check!(origin.repo() == "hypixel-api-reborn");
        check!(origin.branch() == "master");
    }

    #[rstest]
    #[case("https://example.com/a/b/docs/master.json")]
    #[case("https://raw.githubusercontent.com/a/b/docs")]
    #[case("https://raw.githubusercontent.com/a/b/docs/.json")]
    #[case("https://raw.githubusercontent.com//b/docs/master.json")]
    #[case("master")]
    fn malformed_origins_fail_fast(#[case] url: &str) {
        let_assert!(Err(SourceError::InvalidOrigin { url: reported, .. }) = SourceOrigin::parse(url));
        check!(reported == url);
    }

    #[test]
    fn empty_payload_builds_empty_tree() {
        let_assert!(
            Ok(doc) = Doc::from_json(
                "https://raw.githubusercontent.com/a/b/docs/v1.json",
                "{}",
                SiteConfig::default()
            )
        );
        check!(doc.children().count() == 0);
        check!(doc.search_entries().is_empty());
        check!(doc.dump() == serde_json::json!({}));
        check!(doc.search("anything", LookupOptions::default()).is_none());
    }

    #[test]
    fn payload_shape_errors_are_malformed() {
        let_assert!(
            Err(SourceError::Malformed { .. }) = Doc::from_json(
                "https://raw.githubusercontent.com/a/b/docs/v1.json",
                r#"{ "classes": 3 }"#,
                SiteConfig::default()
            )
        );
    }
}
