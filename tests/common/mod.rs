//! Shared test fixtures for integration tests.
//!
//! # Available Fixtures
//!
//! - `guild_doc`: a small tree with `Guild`, `User` and a `GuildOptions` typedef
//! - `StaticFetcher`: an in-memory [`Fetch`] that counts its calls
//!
//! The payload is kept as a JSON literal so every test sees the same shape the
//! HTTP source would deliver.

use docgen_index::{Doc, Fetch, SiteConfig, SourceError};
use futures::future::BoxFuture;
use rstest::fixture;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const FIXTURE_URL: &str =
    "https://raw.githubusercontent.com/Hypixel-API-Reborn/hypixel-api-reborn/docs/master.json";

pub const DOCS_BASE: &str = "https://hypixel-api-reborn.github.io/#/docs/main/master";

/// The fixture payload.
pub fn guild_payload() -> Value {
    json!({
        "classes": [
            {
                "name": "Guild",
                "description": "See {@link Guild#owner} for details, or {@link Nope}.",
                "extends": ["Base"],
                "meta": { "line": 10, "file": "Guild.js", "path": "src/structures" },
                "props": [
                    {
                        "name": "owner",
                        "description": "The member that owns this guild",
                        "type": [[["User"]]]
                    },
                    {
                        "name": "members",
                        "description": "Everyone in the guild",
                        "type": [[["Array", "<"], ["User", ">"]]]
                    },
                    {
                        "name": "secret",
                        "access": "private",
                        "type": [[["string"]]]
                    },
                    {
                        "name": "createdAt",
                        "scope": "static",
                        "nullable": true,
                        "type": [[["Date"]]]
                    }
                ],
                "methods": [
                    {
                        "name": "fetch",
                        "description": "Fetch this guild from the API",
                        "async": true,
                        "params": [
                            {
                                "name": "force",
                                "description": "Skip the cache",
                                "optional": true,
                                "type": [[["boolean"]]]
                            }
                        ],
                        "returns": [[["Promise", "<"], ["Guild", ">"]]],
                        "examples": ["guild.fetch().then(console.log);"]
                    },
                    {
                        "name": "toString",
                        "description": "Guild name"
                    },
                    {
                        "name": "leak",
                        "access": "private"
                    }
                ],
                "events": [
                    {
                        "name": "update",
                        "description": "Emitted when the guild changes",
                        "params": [
                            { "name": "oldGuild", "type": [[["Guild"]]] },
                            { "name": "newGuild", "type": [[["Guild"]]] }
                        ]
                    }
                ]
            },
            {
                "name": "User",
                "description": "A player",
                "props": [
                    {
                        "name": "username",
                        "description": "Display name",
                        "type": [[["string"]]]
                    }
                ]
            }
        ],
        "typedefs": [
            {
                "name": "GuildOptions",
                "description": "Options for fetching guilds",
                "type": [[["Object"]]],
                "props": [
                    { "name": "cache", "type": [[["boolean"]]] }
                ]
            }
        ]
    })
}

pub fn build_doc(payload: &Value) -> Doc {
    Doc::from_json(FIXTURE_URL, &payload.to_string(), SiteConfig::default())
        .expect("fixture payload builds")
}

#[fixture]
pub fn guild_doc() -> Doc {
    build_doc(&guild_payload())
}

/// In-memory [`Fetch`] serving fixed bodies by URL.
#[allow(dead_code)] // Used by a subset of the integration test crates
#[derive(Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, String>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

#[allow(dead_code)]
impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: impl Into<String>) -> Self {
        self.bodies.insert(url.to_string(), body.into());
        self
    }

    /// Delay every response, so concurrent loads overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Fetch for StaticFetcher {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<String, SourceError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let body = self.bodies.get(url).cloned();
        let delay = self.delay;
        let url = url.to_string();
        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            body.ok_or_else(|| SourceError::Unreachable {
                url,
                reason: "HTTP 404 Not Found".to_string(),
            })
        })
    }
}
