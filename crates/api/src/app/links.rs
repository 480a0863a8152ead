//! Link catalog: static hypermedia hints per entity.
//!
//! The templates are constants and are never resolved against the request;
//! every response for an entity carries the same table. Placeholder spelling
//! (including the mismatched `{...]` brackets) is part of the published
//! output and is kept byte-for-byte.

use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Link {
    pub rel: &'static str,
    pub href: &'static str,
}

/// Ordered `rel → href` table, serialised as `{ rel: { "href": ... } }`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LinkTable(&'static [Link]);

impl LinkTable {
    pub const fn new(links: &'static [Link]) -> Self {
        Self(links)
    }
}

impl Serialize for LinkTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct Href {
            href: &'static str,
        }

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for link in self.0 {
            map.serialize_entry(link.rel, &Href { href: link.href })?;
        }
        map.end()
    }
}

pub const PROJECT_LINKS: LinkTable = LinkTable::new(&[
    Link { rel: "getAll", href: "/api/v1/projects" },
    Link { rel: "getOne", href: "/api/v1/projects/{projectId}" },
    Link { rel: "post", href: "/api/v1/projects" },
    Link { rel: "delete", href: "/api/v1/projects/{projectId}" },
    Link { rel: "update", href: "/api/v1/projects/{projectId}" },
]);

pub const MEMBER_LINKS: LinkTable = LinkTable::new(&[
    Link { rel: "getAll", href: "/api/v1/projects/{projectId]/members" },
    Link { rel: "post", href: "/api/v1/projects/{projectId]/members" },
    Link { rel: "delete", href: "/api/v1/members/{membersId]" },
]);

pub const TASK_LINKS: LinkTable = LinkTable::new(&[
    Link { rel: "getAll", href: "/api/v1/projects/{projectId]/tasks" },
    Link { rel: "getOne", href: "/api/v1/tasks/{tasksId}" },
    Link { rel: "post", href: "/api/v1/projects/{projectId]/tasks" },
    Link { rel: "delete", href: "/api/v1/tasks/{tasksId]}" },
    Link { rel: "update", href: "/api/v1/tasks/{tasksId}" },
]);

pub const COMMENT_LINKS: LinkTable = LinkTable::new(&[
    Link { rel: "get", href: "/api/v1/task/{commentId}/comments" },
    Link { rel: "post", href: "/api/v1/task/{commentId}/comments" },
    Link { rel: "delete", href: "/api/v1/comments/{commentId}" },
]);

/// The entity a route acts on; selects its link table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Resource {
    Projects,
    Members,
    Tasks,
    Comments,
}

impl Resource {
    pub const fn links(self) -> LinkTable {
        match self {
            Self::Projects => PROJECT_LINKS,
            Self::Members => MEMBER_LINKS,
            Self::Tasks => TASK_LINKS,
            Self::Comments => COMMENT_LINKS,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Members => "members",
            Self::Tasks => "tasks",
            Self::Comments => "comments",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_in_declaration_order() {
        let json = serde_json::to_string(&MEMBER_LINKS).unwrap();
        assert_eq!(
            json,
            r#"{"getAll":{"href":"/api/v1/projects/{projectId]/members"},"post":{"href":"/api/v1/projects/{projectId]/members"},"delete":{"href":"/api/v1/members/{membersId]"}}"#
        );
    }

    #[test]
    fn comment_table_uses_get_not_get_all() {
        let json = serde_json::to_value(Resource::Comments.links()).unwrap();
        let table = json.as_object().unwrap();
        assert_eq!(table.len(), 3);
        assert!(!table.contains_key("getAll"));
        assert_eq!(json["get"]["href"], "/api/v1/task/{commentId}/comments");
    }

    #[test]
    fn every_template_points_into_the_api() {
        for resource in [
            Resource::Projects,
            Resource::Members,
            Resource::Tasks,
            Resource::Comments,
        ] {
            let json = serde_json::to_value(resource.links()).unwrap();
            let table = json.as_object().unwrap();
            assert!(!table.is_empty());
            assert!(table
                .values()
                .all(|l| l["href"].as_str().unwrap().starts_with("/api/v1/")));
        }
    }
}
