use crate::http_client;
use isahc::Request;
use std::io;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{msg}")]
pub struct FetchError {
    pub msg: String,
}

/// Retrieves the raw body of a feed. Implementations perform one request per
/// call and never retry.
#[cfg_attr(test, automock)]
pub trait FetchFeed {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HttpFetcher;

impl FetchFeed for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        read_url(url)
    }
}

pub fn read_url(url: &str) -> Result<Vec<u8>, FetchError> {
    let client = http_client::client().map_err(|error| FetchError {
        msg: format!("Failed to build http client: {error:?}"),
    })?;

    let request = match Request::get(url).body(()) {
        Ok(request) => request,
        Err(_error) => {
            return Err(FetchError {
                msg: format!("Invalid URL {url}"),
            })
        }
    };

    match client.send(request) {
        Ok(mut response) => {
            let status = response.status();

            if !status.is_success() {
                return Err(FetchError {
                    msg: format!("HTTP {status} when fetching {url}"),
                });
            }

            let mut writer: Vec<u8> = vec![];

            if let Err(err) = io::copy(response.body_mut(), &mut writer) {
                let msg = format!("{err:?}");

                return Err(FetchError { msg });
            }

            Ok(writer)
        }
        Err(error) => {
            let msg = format!("{error:?}");

            Err(FetchError { msg })
        }
    }
}
