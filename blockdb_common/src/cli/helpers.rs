//! Helper functions that are common to CLI apps

use crate::cli::constants::DEFAULT_LOG_FILTER;
use crate::errors::SetupError;
use std::env;
use url::Url;

/// **Sets up `pretty_env_logger`**
///
/// `RUST_LOG` wins if it's set; otherwise [`DEFAULT_LOG_FILTER`] is used.
pub fn init_logging() {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", DEFAULT_LOG_FILTER);
    }
    pretty_env_logger::init();
}

/// **Get base URL**
///
/// Tries to create a URL from the provided argument.
///
/// If that is not possible, falls back to `default`.
///
/// - If the provided argument is the `None` variant,
///   returns the default value as the base URL.
/// - If it's a `String`, tries to parse it into URL.
///   - If it's a valid URL string, returns it as URL.
///   - If it's a malformed URL string, returns the default.
///
/// The path is forced to end with a `/`, so that [`Url::join`]
/// appends to it rather than replacing its last segment.
///
/// # Errors
/// Only if `default` itself can't be parsed.
pub fn get_base_url(base_url: Option<&str>, default: &str) -> Result<Url, url::ParseError> {
    let mut url = match base_url {
        None => {
            log::info!("No base URL provided; using default: {}", default);
            Url::parse(default)?
        }
        Some(candidate) => match Url::parse(candidate) {
            Ok(url) if !url.cannot_be_a_base() => url,
            _ => {
                log::warn!(
                    "Provided base URL \"{}\" could not be parsed; using default: {}",
                    candidate,
                    default
                );
                Url::parse(default)?
            }
        },
    };

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// **Get every base URL, stopping at the first one that doesn't parse**
///
/// Falls back to `defaults` when `base_urls` is empty.
///
/// # Errors
/// - A candidate isn't a URL, `SetupError::BadBaseUrl`;
/// - A candidate can't take a path (e.g. `mailto:`), `SetupError::NotABase`.
pub fn get_base_urls(base_urls: &[String], defaults: &[&str]) -> Result<Vec<Url>, SetupError> {
    if base_urls.is_empty() {
        return defaults
            .iter()
            .map(|url| Ok(get_base_url(Some(url), url)?))
            .collect();
    }

    let mut urls = Vec::with_capacity(base_urls.len());
    for candidate in base_urls {
        match Url::parse(candidate) {
            Ok(url) if url.cannot_be_a_base() => {
                return Err(SetupError::NotABase(candidate.to_string()))
            }
            Ok(_) => urls.push(get_base_url(Some(candidate), candidate)?),
            Err(err) => return Err(SetupError::BadBaseUrl(candidate.to_string(), err)),
        }
    }
    Ok(urls)
}
