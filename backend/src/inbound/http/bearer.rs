//! Bearer token helpers to keep HTTP handlers free of header parsing.
//!
//! Provides a [`FromRequest`] extractor that reads the `Authorization`
//! header, so handlers only deal with domain-friendly operations such as
//! resolving the presented token to a caller identity.

use std::future::{Ready, ready};

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload};

use crate::domain::ports::IdentityResolver;
use crate::domain::{BearerToken, Error, Identity};

/// The bearer token a request presented, if any.
///
/// An absent `Authorization` header extracts as an anonymous caller so open
/// endpoints keep working; a header that is present but unusable fails
/// extraction with `401 Unauthorized`.
#[derive(Debug, Clone)]
pub struct BearerAuth(Option<BearerToken>);

impl BearerAuth {
    /// The raw token, when one was presented.
    pub fn token(&self) -> Option<&BearerToken> {
        self.0.as_ref()
    }

    /// Resolve the presented token to a caller identity.
    ///
    /// Anonymous requests resolve to `None`. Resolution failures surface as
    /// the resolver's error, so an unknown token and a token whose account
    /// has gone look alike to clients.
    pub async fn resolve(
        &self,
        resolver: &dyn IdentityResolver,
    ) -> Result<Option<Identity>, Error> {
        match &self.0 {
            None => Ok(None),
            Some(token) => resolver.resolve(token).await.map(Some),
        }
    }
}

fn unusable_header_error() -> Error {
    Error::unauthorized("Authorization header must carry a bearer token")
}

fn parse_authorization(raw: &str) -> Result<BearerToken, Error> {
    let (scheme, token) = raw
        .trim()
        .split_once(' ')
        .ok_or_else(unusable_header_error)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(unusable_header_error());
    }
    BearerToken::new(token.trim()).map_err(|_| unusable_header_error())
}

impl FromRequest for BearerAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(value) = req.headers().get(header::AUTHORIZATION) else {
            return ready(Ok(Self(None)));
        };

        let result = value
            .to_str()
            .map_err(|_| unusable_header_error())
            .and_then(parse_authorization)
            .map(|token| Self(Some(token)));
        ready(result)
    }
}
