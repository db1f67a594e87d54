use md5::{Digest, Md5};

/// Gravatar URL for `email`: 200px, PG-rated, "mystery man" fallback.
pub fn gravatar_url(email: &str) -> String {
    let digest = Md5::digest(email.trim().to_lowercase().as_bytes());
    format!("//www.gravatar.com/avatar/{digest:x}?s=200&r=pg&d=mm")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravatar_url_known_digest() {
        // md5("myemailaddress@example.com"), from the Gravatar docs
        assert_eq!(
            gravatar_url(" MyEmailAddress@example.com "),
            "//www.gravatar.com/avatar/0bc83cb571cd1c50ba6f3e8a78ef1346?s=200&r=pg&d=mm"
        );
    }
}
