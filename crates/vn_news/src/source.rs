use url::Url;

/// Derive a human-readable source name from an article URL: hostname minus a
/// leading `www.`, second-to-last dot label, first letter capitalized.
pub fn resolve_source(raw: &str) -> String {
    let parsed = match Url::parse(raw) {
        Ok(url) => url,
        Err(_) => return "Unknown Source".to_string(),
    };
    let hostname = match parsed.host_str() {
        Some(host) => host.trim_start_matches("www."),
        None => return "Unknown Source".to_string(),
    };

    let labels: Vec<&str> = hostname.split('.').collect();
    if labels.len() >= 2 {
        let name = labels[labels.len() - 2];
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => hostname.to_string(),
        }
    } else {
        hostname.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_name_from_domain() {
        assert_eq!(
            resolve_source("https://www.dentistrytoday.com/x"),
            "Dentistrytoday"
        );
        assert_eq!(
            resolve_source("https://news.medscape.co.uk/article/1"),
            "Co"
        );
        assert_eq!(resolve_source("https://blog.modernaesthetics.com/post"), "Modernaesthetics");
    }

    #[test]
    fn falls_back_on_bad_input() {
        assert_eq!(resolve_source("not a url"), "Unknown Source");
        assert_eq!(resolve_source(""), "Unknown Source");
        assert_eq!(resolve_source("http://localhost/x"), "localhost");
    }
}
