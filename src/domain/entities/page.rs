use actix_web::HttpResponse;
use serde::Serialize;

/// Where the data of a ready page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Fallback,
    Static,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Link { label: label.into(), href: href.into() }
    }
}

/// Outcome of a page read. There is no loading state: responses are only
/// produced once every read has settled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PageState<T> {
    NotFound { message: String, back_link: Link },
    Ready { data: T, source: DataSource },
    Empty,
}

impl<T> PageState<T> {
    pub fn live(data: T) -> Self {
        PageState::Ready { data, source: DataSource::Live }
    }

    pub fn fallback(data: T) -> Self {
        PageState::Ready { data, source: DataSource::Fallback }
    }

    pub fn not_found(message: impl Into<String>, back_link: Link) -> Self {
        PageState::NotFound { message: message.into(), back_link }
    }

    pub fn source(&self) -> Option<DataSource> {
        match self {
            PageState::Ready { source, .. } => Some(*source),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            PageState::Ready { data, .. } => Some(data),
            _ => None,
        }
    }
}

impl<T: Serialize> PageState<T> {
    pub fn into_response(self) -> HttpResponse {
        if matches!(self, PageState::NotFound { .. }) {
            HttpResponse::NotFound().json(self)
        } else {
            HttpResponse::Ok().json(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn states_serialize_with_tag() {
        let ready = serde_json::to_value(PageState::live(vec![1, 2])).unwrap();
        assert_eq!(ready, json!({"state": "ready", "data": [1, 2], "source": "live"}));

        let empty = serde_json::to_value(PageState::<Vec<i32>>::Empty).unwrap();
        assert_eq!(empty, json!({"state": "empty"}));

        let missing = serde_json::to_value(PageState::<()>::not_found(
            "Project not found",
            Link::new("Back to Projects", "/projects"),
        ))
        .unwrap();
        assert_eq!(missing["state"], "not_found");
        assert_eq!(missing["back_link"]["href"], "/projects");
    }

    #[test]
    fn only_ready_pages_expose_data_and_source() {
        let fallback = PageState::fallback("cached");
        assert_eq!(fallback.source(), Some(DataSource::Fallback));
        assert_eq!(fallback.data(), Some(&"cached"));

        let missing = PageState::<&str>::not_found("gone", Link::new("Back", "/"));
        assert_eq!(missing.source(), None);
        assert!(missing.data().is_none());
        assert!(PageState::<&str>::Empty.data().is_none());
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = PageState::<()>::not_found("gone", Link::new("Back", "/")).into_response();
        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
