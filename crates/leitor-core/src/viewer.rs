use std::num::NonZeroUsize;

use lru::LruCache;

use crate::{
    error::FetchError,
    page::{tokenize, Page, WordToken},
    source::ResourceSource,
};

const CACHE_PAGES: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PageToken(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub token: PageToken,
    pub page: Page,
}

impl PageRequest {
    /// Runs the request synchronously against `source`.
    pub fn fetch(&self, source: &dyn ResourceSource) -> PageReply {
        PageReply {
            token: self.token,
            page: self.page,
            outcome: source.fetch(&self.page.resource_name()),
        }
    }
}

#[derive(Debug)]
pub struct PageReply {
    pub token: PageToken,
    pub page: Page,
    pub outcome: Result<String, FetchError>,
}

/// Current page number and its text. Fetches are described as requests and
/// applied when their replies arrive; only the reply for the latest
/// navigation is shown.
pub struct Viewer {
    page_number: i64,
    text: String,
    loading: bool,
    cache: LruCache<Page, String>,
    last_token: u64,
    pending: Option<PageToken>,
    last_prefetch: Option<Page>,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewer {
    pub fn new() -> Self {
        let capacity = NonZeroUsize::new(CACHE_PAGES).unwrap_or(NonZeroUsize::MIN);
        Self {
            page_number: 1,
            text: String::new(),
            loading: false,
            cache: LruCache::new(capacity),
            last_token: 0,
            pending: None,
            last_prefetch: None,
        }
    }

    fn issue(&mut self, page: Page) -> PageRequest {
        self.last_token += 1;
        PageRequest {
            token: PageToken(self.last_token),
            page,
        }
    }

    pub fn go_to(&mut self, page_number: i64) -> Option<PageRequest> {
        self.page_number = page_number;
        self.pending = None;
        let Some(page) = Page::new(page_number) else {
            self.text.clear();
            self.loading = false;
            return None;
        };
        match self.cache.get(&page) {
            Some(cached) => {
                self.text = cached.clone();
                self.loading = false;
            }
            None => {
                self.text.clear();
                self.loading = true;
            }
        }
        let request = self.issue(page);
        self.pending = Some(request.token);
        Some(request)
    }

    /// Unbounded above; pages past the limit read as empty.
    pub fn next(&mut self) -> Option<PageRequest> {
        self.go_to(self.page_number + 1)
    }

    pub fn previous(&mut self) -> Option<PageRequest> {
        if self.page_number <= 1 {
            return None;
        }
        self.go_to(self.page_number - 1)
    }

    /// Applies a fetch result. Successful texts are cached whichever request
    /// they answer; only the pending one replaces the displayed text.
    pub fn complete(&mut self, reply: PageReply) -> bool {
        let current = self.pending == Some(reply.token);
        match reply.outcome {
            Ok(text) => {
                self.cache.put(reply.page, text.clone());
                if current {
                    self.text = text;
                }
            }
            Err(_) => {
                if current {
                    self.text.clear();
                }
            }
        }
        if current {
            self.pending = None;
            self.loading = false;
        }
        current
    }

    /// Next page worth loading in the background, once per page.
    pub fn prefetch(&mut self) -> Option<PageRequest> {
        let target = Page::new(self.page_number)?.next()?;
        if self.cache.contains(&target) || self.last_prefetch == Some(target) {
            return None;
        }
        self.last_prefetch = Some(target);
        Some(self.issue(target))
    }

    pub fn current_text(&self) -> &str {
        &self.text
    }

    pub fn current_page_number(&self) -> i64 {
        self.page_number
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn can_go_back(&self) -> bool {
        self.page_number > 1
    }

    pub fn tokens(&self) -> Vec<WordToken> {
        tokenize(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Mutex};

    use super::*;

    #[derive(Default)]
    struct Pages {
        texts: HashMap<String, String>,
        calls: Mutex<Vec<String>>,
    }

    impl Pages {
        fn with(pages: &[(u32, &str)]) -> Self {
            let texts = pages
                .iter()
                .map(|(n, t)| (format!("data/{n}.txt"), t.to_string()))
                .collect();
            Self {
                texts,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl ResourceSource for Pages {
        fn fetch(&self, name: &str) -> Result<String, FetchError> {
            self.calls.lock().unwrap().push(name.to_string());
            self.texts
                .get(name)
                .cloned()
                .ok_or_else(|| FetchError::NotFound(name.into()))
        }
    }

    fn drive(viewer: &mut Viewer, source: &Pages, req: Option<PageRequest>) {
        if let Some(req) = req {
            viewer.complete(req.fetch(source));
        }
    }

    #[test]
    fn go_to_loads_text() {
        let source = Pages::with(&[(1, "The cat"), (2, "A dog")]);
        let mut viewer = Viewer::new();
        let req = viewer.go_to(2);
        assert!(viewer.is_loading());
        drive(&mut viewer, &source, req);
        assert_eq!(viewer.current_text(), "A dog");
        assert!(!viewer.is_loading());
    }

    #[test]
    fn out_of_range_pages_are_empty_without_fetch() {
        let source = Pages::with(&[(1, "The cat")]);
        let mut viewer = Viewer::new();
        let req = viewer.go_to(1);
        drive(&mut viewer, &source, req);
        for p in [0, -5, 100, 250] {
            assert!(viewer.go_to(p).is_none());
            assert_eq!(viewer.current_text(), "");
        }
        assert_eq!(source.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn missing_page_is_empty() {
        let source = Pages::with(&[(1, "The cat")]);
        let mut viewer = Viewer::new();
        let req = viewer.go_to(5);
        drive(&mut viewer, &source, req);
        assert_eq!(viewer.current_text(), "");
        assert!(!viewer.is_loading());
    }

    #[test]
    fn round_trip_returns_to_same_text() {
        let pages: Vec<(u32, String)> = (1..100).map(|n| (n, format!("page {n}"))).collect();
        let refs: Vec<(u32, &str)> = pages.iter().map(|(n, t)| (*n, t.as_str())).collect();
        let source = Pages::with(&refs);
        let mut viewer = Viewer::new();
        for p in 2..100i64 {
            let req = viewer.go_to(p);
            drive(&mut viewer, &source, req);
            let req = viewer.previous();
            drive(&mut viewer, &source, req);
            assert_eq!(viewer.current_text(), format!("page {}", p - 1));
            let req = viewer.next();
            // cached text shows before the refetch lands
            assert_eq!(viewer.current_text(), format!("page {p}"));
            drive(&mut viewer, &source, req);
            assert_eq!(viewer.current_text(), format!("page {p}"));
        }
    }

    #[test]
    fn previous_stops_at_first_page() {
        let mut viewer = Viewer::new();
        assert!(viewer.previous().is_none());
        assert_eq!(viewer.current_page_number(), 1);
        assert!(!viewer.can_go_back());
    }

    #[test]
    fn next_runs_past_the_limit_with_empty_text() {
        let source = Pages::with(&[(99, "last")]);
        let mut viewer = Viewer::new();
        let req = viewer.go_to(99);
        drive(&mut viewer, &source, req);
        assert_eq!(viewer.current_text(), "last");
        assert!(viewer.next().is_none());
        assert_eq!(viewer.current_page_number(), 100);
        assert_eq!(viewer.current_text(), "");
        assert!(viewer.previous().is_some());
        assert_eq!(viewer.current_page_number(), 99);
        assert_eq!(viewer.current_text(), "last");
    }

    #[test]
    fn stale_page_reply_does_not_replace_current() {
        let source = Pages::with(&[(1, "one"), (2, "two")]);
        let mut viewer = Viewer::new();
        let first = viewer.go_to(1).unwrap();
        let second = viewer.go_to(2).unwrap();
        assert!(!viewer.complete(first.fetch(&source)));
        assert_eq!(viewer.current_text(), "");
        assert!(viewer.complete(second.fetch(&source)));
        assert_eq!(viewer.current_text(), "two");
        // the stale reply still warmed the cache
        viewer.go_to(1);
        assert_eq!(viewer.current_text(), "one");
    }

    #[test]
    fn prefetch_requests_next_page_once() {
        let source = Pages::with(&[(1, "one"), (2, "two")]);
        let mut viewer = Viewer::new();
        let req = viewer.go_to(1);
        drive(&mut viewer, &source, req);
        let pre = viewer.prefetch().unwrap();
        assert_eq!(pre.page.number(), 2);
        assert!(viewer.prefetch().is_none());
        assert!(!viewer.complete(pre.fetch(&source)));
        assert_eq!(viewer.current_text(), "one");
        viewer.next();
        assert_eq!(viewer.current_text(), "two");
        assert!(!viewer.is_loading());
    }

    #[test]
    fn tokens_follow_current_text() {
        let source = Pages::with(&[(1, "The  cat")]);
        let mut viewer = Viewer::new();
        let req = viewer.go_to(1);
        drive(&mut viewer, &source, req);
        let tokens = viewer.tokens();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2].text, "cat");
    }
}
