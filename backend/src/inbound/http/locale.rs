//! Request locale taken from `Accept-Language`.

use actix_web::http::header::{AcceptLanguage, Header, Preference};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

/// Most preferred language tag of the request, if the client sent one.
///
/// A missing or unparsable header, or a bare `*`, yields no locale so the
/// message source falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestLocale(Option<String>);

impl RequestLocale {
    /// Wrap an explicit tag.
    pub fn new(tag: Option<String>) -> Self {
        Self(tag)
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    fn from_http(req: &HttpRequest) -> Self {
        let tag = AcceptLanguage::parse(req)
            .ok()
            .and_then(|header| match header.preference() {
                Preference::Specific(tag) => Some(tag.to_string()),
                Preference::Any => None,
            });
        Self(tag)
    }
}

impl FromRequest for RequestLocale {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_http(req)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::ACCEPT_LANGUAGE;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    #[case(Some("ko-KR,ko;q=0.9,en;q=0.8"), Some("ko-KR"))]
    #[case(Some("en;q=0.5, ko"), Some("ko"))]
    #[case(Some("*"), None)]
    #[case(None, None)]
    fn picks_the_highest_quality_tag(#[case] header: Option<&str>, #[case] expected: Option<&str>) {
        let mut request = TestRequest::default();
        if let Some(value) = header {
            request = request.insert_header((ACCEPT_LANGUAGE, value));
        }
        let locale = RequestLocale::from_http(&request.to_http_request());
        assert_eq!(locale.as_deref(), expected);
    }
}
