mod common;

use assert2::{check, let_assert};
use common::{build_doc, guild_doc};
use docgen_index::{Doc, LookupOptions, MAX_SEARCH_RESULTS};
use rstest::rstest;
use serde_json::{Value, json};
use std::collections::HashSet;

const PUBLIC_ONLY: LookupOptions = LookupOptions {
    exclude_private: true,
};

#[rstest]
fn misspelled_member_ranks_first(guild_doc: Doc) {
    let_assert!(Some(results) = guild_doc.search("ownr", LookupOptions::default()));
    check!(results[0].formatted_name() == "Guild#owner");
}

#[rstest]
fn exact_top_level_name_ranks_first(guild_doc: Doc) {
    let_assert!(Some(results) = guild_doc.search("user", LookupOptions::default()));
    check!(results[0].name() == "User");
}

#[rstest]
fn search_entries_cover_top_level_and_direct_members(guild_doc: Doc) {
    let ids: Vec<&str> = guild_doc
        .search_entries()
        .iter()
        .map(|entry| entry.id.as_str())
        .collect();

    check!(ids[..3] == ["Guild", "User", "GuildOptions"]);
    check!(ids.contains(&"Guild#owner"));
    check!(ids.contains(&"Guild#update"));
    check!(ids.contains(&"User#username"));
    check!(ids.contains(&"GuildOptions#cache"));
    // Params are reachable by path but not indexed.
    check!(!ids.contains(&"fetch#force"));
    check!(!ids.iter().any(|id| id.ends_with("#force")));
}

#[rstest]
fn private_members_are_filtered_on_request(guild_doc: Doc) {
    let_assert!(Some(all) = guild_doc.search("secret", LookupOptions::default()));
    check!(all.iter().any(|e| e.name() == "secret"));

    let filtered = guild_doc.search("secret", PUBLIC_ONLY);
    check!(
        filtered.is_none_or(|results| results.iter().all(|e| !e.is_private())),
        "private elements leaked into filtered results"
    );
}

#[rstest]
fn nothing_surviving_returns_none(guild_doc: Doc) {
    check!(guild_doc.search("zzzzqqqq", LookupOptions::default()).is_none());
    check!(guild_doc.search("", LookupOptions::default()).is_none());
}

fn crowded_doc() -> Doc {
    let props: Vec<Value> = (0..30)
        .map(|i| json!({ "name": format!("value{i}"), "access": if i % 2 == 0 { "private" } else { "public" } }))
        .collect();
    build_doc(&json!({
        "classes": [
            { "name": "Values", "props": props },
            { "name": "Value" }
        ]
    }))
}

#[test]
fn results_are_capped_unique_and_filtered() {
    let doc = crowded_doc();

    let_assert!(Some(results) = doc.search("value", LookupOptions::default()));
    check!(results.len() <= MAX_SEARCH_RESULTS);
    check!(results.len() == MAX_SEARCH_RESULTS);

    let distinct: HashSet<_> = results.iter().map(|e| e.formatted_name()).collect();
    check!(distinct.len() == results.len());

    let_assert!(Some(public) = doc.search("value", PUBLIC_ONLY));
    check!(public.len() <= MAX_SEARCH_RESULTS);
    check!(public.iter().all(|e| !e.is_private()));
}

#[rstest]
fn search_results_resolve_back_to_tree_nodes(guild_doc: Doc) {
    let_assert!(Some(results) = guild_doc.search("username", LookupOptions::default()));
    let_assert!(Some(username) = guild_doc.get(&["User", "username"]));
    check!(results[0] == username);
}
