use url::Url;

/// Returns the network location of a URL: `[user[:password]@]host[:port]`
///
/// This is the identity the same-domain filter compares. The scheme is not
/// part of it, so `http://example.com/` and `https://example.com/` share a
/// netloc. Default ports are dropped and hosts lowercased by URL parsing, so
/// `:443` on an `https` URL or an uppercase host does not make a distinct netloc.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use frontier_ripple::url::netloc;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(netloc(&url), "example.com");
///
/// let url = Url::parse("http://user:pw@example.com:8080/").unwrap();
/// assert_eq!(netloc(&url), "user:pw@example.com:8080");
/// ```
pub fn netloc(url: &Url) -> String {
    let mut out = String::new();

    if !url.username().is_empty() || url.password().is_some() {
        out.push_str(url.username());
        if let Some(password) = url.password() {
            out.push(':');
            out.push_str(password);
        }
        out.push('@');
    }

    if let Some(host) = url.host_str() {
        out.push_str(host);
    }

    if let Some(port) = url.port() {
        out.push(':');
        out.push_str(&port.to_string());
    }

    out
}

/// Returns true if both URLs have the same, non-empty netloc
pub fn same_netloc(a: &Url, b: &Url) -> bool {
    let left = netloc(a);
    !left.is_empty() && left == netloc(b)
}
