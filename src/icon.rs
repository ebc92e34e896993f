// Icon lookup (`icon:[iconset/]category[#state]`)
//
// Resolves to `icon/<iconset>/<category>-<state>.png`, falling back to
// `icon/<iconset>/<category>.png`. The state is matched lower-case.

use crate::error::HandlerError;
use crate::rendering::ResourceStore;
use crate::scheme::{SchemeHandler, SchemeType};
use std::rc::Rc;
use url::Url;

pub const DEFAULT_ICONSET: &str = "classic";

/// Handler for the ICON category
pub struct IconHandler {
    store: Rc<dyn ResourceStore>,
    default_set: String,
}

impl IconHandler {
    #[cfg(test)]
    pub fn new(store: Rc<dyn ResourceStore>) -> Self {
        Self::with_default_set(store, DEFAULT_ICONSET)
    }

    pub fn with_default_set(store: Rc<dyn ResourceStore>, default_set: impl Into<String>) -> Self {
        Self {
            store,
            default_set: default_set.into(),
        }
    }

    /// Candidate resource paths for a URI, most specific first
    pub fn candidates(&self, uri: &Url) -> Result<Vec<String>, HandlerError> {
        if !uri.cannot_be_a_base() || uri.path().is_empty() {
            return Err(HandlerError::validation(
                uri,
                "expected icon:[iconset/]category[#state]",
            ));
        }

        let path = match uri.path().matches('/').count() {
            0 => format!("{}/{}", self.default_set, uri.path()),
            1 => uri.path().to_string(),
            _ => {
                return Err(HandlerError::validation(
                    uri,
                    "cannot contain more than one slash",
                ))
            }
        };

        let mut candidates = Vec::with_capacity(2);
        if let Some(state) = uri.fragment().filter(|s| !s.is_empty()) {
            candidates.push(format!("icon/{}-{}.png", path, state.to_lowercase()));
        }
        candidates.push(format!("icon/{}.png", path));
        Ok(candidates)
    }
}

impl SchemeHandler for IconHandler {
    type Output = Option<Vec<u8>>;

    fn accepted_categories(&self) -> &'static [SchemeType] {
        &[SchemeType::Icon]
    }

    fn handle(&self, uri: &Url) -> Result<Option<Vec<u8>>, HandlerError> {
        self.validate(uri)?;

        for candidate in self.candidates(uri)? {
            if let Some(bytes) = self.store.open(&candidate)? {
                return Ok(Some(bytes));
            }
        }
        tracing::debug!("No icon found for {}", uri);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::MemoryStore;

    fn handler(paths: &[&str]) -> IconHandler {
        let store = paths.iter().fold(MemoryStore::new(), |store, path| {
            store.with(*path, path.as_bytes().to_vec())
        });
        IconHandler::new(Rc::new(store))
    }

    fn resolve(handler: &IconHandler, uri: &str) -> Result<Option<String>, HandlerError> {
        handler
            .handle_text(uri)
            .map(|found| found.map(|bytes| String::from_utf8(bytes).unwrap()))
    }

    #[test]
    fn test_plain_category_uses_default_set() {
        let h = handler(&["icon/classic/switch.png"]);
        assert_eq!(
            resolve(&h, "icon:switch").unwrap().as_deref(),
            Some("icon/classic/switch.png")
        );
    }

    #[test]
    fn test_state_variant_is_preferred() {
        let h = handler(&["icon/classic/switch.png", "icon/classic/switch-on.png"]);
        assert_eq!(
            resolve(&h, "icon:switch#on").unwrap().as_deref(),
            Some("icon/classic/switch-on.png")
        );
        assert_eq!(
            resolve(&h, "icon:switch#ON").unwrap().as_deref(),
            Some("icon/classic/switch-on.png")
        );
    }

    #[test]
    fn test_missing_state_falls_back_to_category() {
        let h = handler(&["icon/classic/switch.png"]);
        assert_eq!(
            resolve(&h, "icon:switch#on").unwrap().as_deref(),
            Some("icon/classic/switch.png")
        );
    }

    #[test]
    fn test_explicit_iconset() {
        let h = handler(&["icon/material/switch.png"]);
        let uri = Url::parse("icon:material/switch#on").unwrap();
        assert_eq!(
            h.candidates(&uri).unwrap(),
            vec!["icon/material/switch-on.png", "icon/material/switch.png"]
        );
        assert_eq!(
            resolve(&h, "icon:material/switch#on").unwrap().as_deref(),
            Some("icon/material/switch.png")
        );
    }

    #[test]
    fn test_more_than_one_slash_fails_validation() {
        let h = handler(&[]);
        assert!(matches!(
            resolve(&h, "icon:a/b/c"),
            Err(HandlerError::Validation { .. })
        ));
    }

    #[test]
    fn test_unknown_icon_is_none() {
        let h = handler(&[]);
        assert_eq!(resolve(&h, "icon:unicorn").unwrap(), None);
    }

    #[test]
    fn test_configured_default_set() {
        let store = MemoryStore::new().with("icon/material/switch.png", b"m".to_vec());
        let h = IconHandler::with_default_set(Rc::new(store), "material");
        assert_eq!(h.handle_text("icon:switch").unwrap(), Some(b"m".to_vec()));
    }

    #[test]
    fn test_bundled_iconsets() {
        let h = IconHandler::new(Rc::new(crate::rendering::bundled_store()));
        assert!(h.handle_text("icon:light#ON").unwrap().is_some());
        assert!(h.handle_text("icon:material/navigate-next").unwrap().is_some());
        assert!(h.handle_text("icon:material/light").unwrap().is_none());
    }
}
