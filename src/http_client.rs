use crate::config::Config;
use isahc::config::RedirectPolicy;
use isahc::prelude::*;
use isahc::HttpClient;
use once_cell::sync::OnceCell;
use std::time::Duration;

const MAX_REDIRECTS: u32 = 10;

static CLIENT: OnceCell<HttpClient> = OnceCell::new();

pub fn client() -> Result<&'static HttpClient, isahc::Error> {
    CLIENT.get_or_try_init(init_client)
}

fn init_client() -> Result<HttpClient, isahc::Error> {
    HttpClient::builder()
        .redirect_policy(RedirectPolicy::Limit(MAX_REDIRECTS))
        .timeout(request_timeout_seconds())
        .default_header("User-Agent", Config::user_agent())
        .build()
}

fn request_timeout_seconds() -> Duration {
    let secs = Config::request_timeout_in_seconds();

    Duration::from_secs(secs)
}
