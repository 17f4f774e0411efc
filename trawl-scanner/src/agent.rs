use rand::seq::SliceRandom;

/// How the User-Agent header is chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UserAgent {
    /// A different browser agent for every request.
    Rotating,
    /// One browser agent picked at random when the crawler is built.
    #[default]
    Fixed,
    /// Exactly this string. Takes precedence over rotation.
    Custom(String),
}

const BROWSER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.4; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.2478.51",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.6367.82 Mobile Safari/537.36",
    "Mozilla/5.0 (iPad; CPU OS 17_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1",
];

pub fn random_user_agent() -> &'static str {
    BROWSER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(BROWSER_AGENTS[0])
}

/// Resolves the agent used for one request. `fixed` is the per-run pick.
pub(crate) fn agent_for_request<'a>(policy: &'a UserAgent, fixed: &'a str) -> &'a str {
    match policy {
        UserAgent::Custom(agent) => agent,
        UserAgent::Rotating => random_user_agent(),
        UserAgent::Fixed => fixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_agent_wins() {
        let policy = UserAgent::Custom("trawl-test".to_string());
        assert_eq!(agent_for_request(&policy, "ignored"), "trawl-test");
    }

    #[test]
    fn test_fixed_agent_is_stable() {
        let fixed = random_user_agent();
        for _ in 0..5 {
            assert_eq!(agent_for_request(&UserAgent::Fixed, fixed), fixed);
        }
    }

    #[test]
    fn test_rotating_agent_is_a_browser() {
        let agent = agent_for_request(&UserAgent::Rotating, "");
        assert!(BROWSER_AGENTS.contains(&agent));
    }
}
