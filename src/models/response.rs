//! Reduces the text-to-image response, whose layout varies between API
//! versions and sync modes, to an ordered list of image URLs.

use crate::error::{ConceptifyError, Result};
use serde_json::{Map, Value};

/// One usable element of a `result` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultEntry {
    /// `{"urls": ["...", ...]}`
    Urls(Vec<String>),
    /// `["...", ...]`
    List(Vec<String>),
}

impl ResultEntry {
    pub fn urls(&self) -> &[String] {
        match self {
            ResultEntry::Urls(urls) | ResultEntry::List(urls) => urls,
        }
    }

    pub fn first_url(&self) -> Option<&str> {
        self.urls().first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseShape {
    /// `{"result_url": "..."}`
    SingleUrl(String),
    /// `{"result_urls": ["...", ...]}`
    UrlList(Vec<String>),
    /// `{"result": [...]}` with at least one usable entry, in response order.
    Entries(Vec<ResultEntry>),
    Unrecognized,
}

type ShapeMatcher = fn(&Map<String, Value>) -> Option<ResponseShape>;

// Precedence order; the first matcher returning a shape wins.
const MATCHERS: [ShapeMatcher; 3] = [match_single_url, match_url_list, match_entries];

impl ResponseShape {
    pub fn detect(body: &Value) -> Self {
        let Some(object) = body.as_object() else {
            return ResponseShape::Unrecognized;
        };

        MATCHERS
            .iter()
            .find_map(|matcher| matcher(object))
            .unwrap_or(ResponseShape::Unrecognized)
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ResponseShape::Unrecognized)
    }

    /// The normalized URL sequence. Result entries contribute only the first
    /// URL of the first usable entry.
    pub fn urls(&self) -> Result<Vec<String>> {
        match self {
            ResponseShape::SingleUrl(url) => Ok(vec![url.clone()]),
            ResponseShape::UrlList(urls) => Ok(urls.clone()),
            ResponseShape::Entries(entries) => entries
                .iter()
                .find_map(ResultEntry::first_url)
                .map(|url| vec![url.to_string()])
                .ok_or(ConceptifyError::ResponseShapeUnrecognized),
            ResponseShape::Unrecognized => Err(ConceptifyError::ResponseShapeUnrecognized),
        }
    }

    /// URLs to download for a request of `count` images. Result entries each
    /// contribute their first URL.
    pub fn fetch_targets(&self, count: usize) -> Vec<String> {
        match self {
            ResponseShape::SingleUrl(url) => vec![url.clone()],
            ResponseShape::UrlList(urls) => urls.iter().take(count).cloned().collect(),
            ResponseShape::Entries(entries) => entries
                .iter()
                .filter_map(ResultEntry::first_url)
                .take(count)
                .map(str::to_string)
                .collect(),
            ResponseShape::Unrecognized => Vec::new(),
        }
    }
}

/// Decode a response body and normalize it in one step.
pub fn normalize(body: &Value) -> Result<Vec<String>> {
    ResponseShape::detect(body).urls()
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    let urls: Vec<String> = value
        .as_array()?
        .iter()
        .filter_map(|item| item.as_str().map(str::to_string))
        .collect();

    if urls.is_empty() {
        None
    } else {
        Some(urls)
    }
}

fn match_single_url(object: &Map<String, Value>) -> Option<ResponseShape> {
    object
        .get("result_url")
        .and_then(Value::as_str)
        .map(|url| ResponseShape::SingleUrl(url.to_string()))
}

fn match_url_list(object: &Map<String, Value>) -> Option<ResponseShape> {
    object
        .get("result_urls")
        .and_then(string_list)
        .map(ResponseShape::UrlList)
}

fn match_entries(object: &Map<String, Value>) -> Option<ResponseShape> {
    let entries: Vec<ResultEntry> = object
        .get("result")?
        .as_array()?
        .iter()
        .filter_map(|item| match item {
            Value::Object(entry) => entry.get("urls").and_then(string_list).map(ResultEntry::Urls),
            Value::Array(items) if items.first().is_some_and(Value::is_string) => {
                string_list(item).map(ResultEntry::List)
            }
            _ => None,
        })
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(ResponseShape::Entries(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_result_url() {
        let body = json!({"result_url": "http://x/a.png"});
        assert_eq!(normalize(&body).unwrap(), vec!["http://x/a.png"]);
    }

    #[test]
    fn test_result_urls_preserves_full_list() {
        let body = json!({"result_urls": ["http://x/1.png", "http://x/2.png", "http://x/3.png"]});
        assert_eq!(
            normalize(&body).unwrap(),
            vec!["http://x/1.png", "http://x/2.png", "http://x/3.png"]
        );
    }

    #[test]
    fn test_entry_with_urls_field_yields_first_url() {
        let body = json!({"result": [{"urls": ["http://x/b.png", "http://x/c.png"]}]});
        assert_eq!(normalize(&body).unwrap(), vec!["http://x/b.png"]);
    }

    #[test]
    fn test_entry_that_is_a_list_yields_first_url() {
        let body = json!({"result": [["http://x/d.png", 12345, "seed"]]});
        assert_eq!(normalize(&body).unwrap(), vec!["http://x/d.png"]);
        assert!(matches!(
            ResponseShape::detect(&body),
            ResponseShape::Entries(ref entries) if matches!(entries[0], ResultEntry::List(_))
        ));
    }

    #[test]
    fn test_precedence_single_url_wins() {
        let body = json!({
            "result": [{"urls": ["http://x/entry.png"]}],
            "result_urls": ["http://x/list.png"],
            "result_url": "http://x/single.png"
        });
        assert_eq!(normalize(&body).unwrap(), vec!["http://x/single.png"]);

        let body = json!({
            "result": [{"urls": ["http://x/entry.png"]}],
            "result_urls": ["http://x/list.png"]
        });
        assert_eq!(normalize(&body).unwrap(), vec!["http://x/list.png"]);
    }

    #[test]
    fn test_entries_scan_skips_unusable_items() {
        let body = json!({
            "result": [
                {"seed": 1},
                [],
                [42, "http://x/skip.png"],
                "not-an-entry",
                {"urls": []},
                {"urls": ["http://x/found.png"]},
                ["http://x/later.png"]
            ]
        });
        assert_eq!(normalize(&body).unwrap(), vec!["http://x/found.png"]);
    }

    #[test]
    fn test_empty_keys_fall_through_to_later_matchers() {
        let body = json!({"result_url": null, "result_urls": [], "result": [["http://x/e.png"]]});
        assert_eq!(normalize(&body).unwrap(), vec!["http://x/e.png"]);
    }

    #[test]
    fn test_unrecognized_shapes() {
        for body in [
            json!({"status": "pending"}),
            json!({"result": []}),
            json!({"result": [{"seed": 7}]}),
            json!({"result": "http://x/a.png"}),
            json!(["http://x/a.png"]),
            json!(null),
        ] {
            assert_eq!(ResponseShape::detect(&body), ResponseShape::Unrecognized);
            assert!(matches!(
                normalize(&body),
                Err(ConceptifyError::ResponseShapeUnrecognized)
            ));
        }
    }

    #[test]
    fn test_hand_built_empty_entries_do_not_panic() {
        let empty = ResponseShape::Entries(vec![ResultEntry::Urls(vec![]), ResultEntry::List(vec![])]);
        assert!(matches!(empty.urls(), Err(ConceptifyError::ResponseShapeUnrecognized)));
        assert!(empty.fetch_targets(4).is_empty());

        let mixed = ResponseShape::Entries(vec![
            ResultEntry::Urls(vec![]),
            ResultEntry::List(vec!["http://x/kept.png".into()]),
        ]);
        assert_eq!(mixed.urls().unwrap(), vec!["http://x/kept.png"]);
        assert_eq!(mixed.fetch_targets(1), vec!["http://x/kept.png"]);
        assert!(ResponseShape::Entries(vec![]).urls().is_err());
    }

    #[test]
    fn test_fetch_targets_follow_requested_count() {
        let list = ResponseShape::detect(&json!({"result_urls": ["a", "b", "c"]}));
        assert_eq!(list.fetch_targets(2), vec!["a", "b"]);

        let entries = ResponseShape::detect(&json!({
            "result": [{"urls": ["a1", "a2"]}, {"urls": ["b1"]}, ["c1"]]
        }));
        assert_eq!(entries.fetch_targets(4), vec!["a1", "b1", "c1"]);
        assert_eq!(entries.urls().unwrap(), vec!["a1"]);

        let single = ResponseShape::detect(&json!({"result_url": "only"}));
        assert_eq!(single.fetch_targets(3), vec!["only"]);
        assert!(ResponseShape::Unrecognized.fetch_targets(3).is_empty());
    }
}
