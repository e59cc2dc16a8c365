use std::sync::Arc;

use crate::http_client::{Error, Headers, HttpClient, Method, RequestBuilder, Response, StatusCode};

/// [`HttpClient`] over a shared [`reqwest::Client`].
#[derive(Clone, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn builder(&self, method: Method, url: &str) -> RequestBuilder {
        RequestBuilder::new(Arc::new(self.clone()), method, url)
    }
}

impl From<Method> for reqwest::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> RequestBuilder {
        self.builder(Method::Get, url)
    }

    fn post(&self, url: &str) -> RequestBuilder {
        self.builder(Method::Post, url)
    }

    fn patch(&self, url: &str) -> RequestBuilder {
        self.builder(Method::Patch, url)
    }

    async fn send(
        &self,
        url: &str,
        body: Option<Vec<u8>>,
        headers: Option<Headers>,
        method: Method,
    ) -> Result<Response, Error> {
        tracing::debug!(%url, ?method, "sending request");

        let mut request = self.client.request(method.into(), url);
        for (name, value) in headers.unwrap_or_default() {
            request = request.header(name, value);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| Error::HttpError(err.to_string()))?;

        let status = StatusCode(response.status().as_u16());
        tracing::debug!(%url, %status, "received response");

        let body = response
            .bytes()
            .await
            .map_err(|err| Error::HttpError(err.to_string()))?;

        Ok(Response {
            body: body.to_vec(),
            status,
        })
    }
}
