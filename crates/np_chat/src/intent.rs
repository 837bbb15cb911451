//! Keyword rules deciding which canned reply a chat message gets.
//!
//! Matching is plain substring containment on the lower-cased message. Rules
//! are tried in order and the first hit wins, so "new" catches "news" before
//! any topic rule gets a chance.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Latest,
    Technology,
    Summary,
    Count,
    Sources,
    Greeting,
    Help,
    Fallback,
}

#[derive(Debug)]
pub struct Rule {
    pub intent: Intent,
    pub keywords: &'static [&'static str],
}

impl Rule {
    pub fn matches(&self, message: &str) -> bool {
        self.keywords.iter().any(|keyword| message.contains(keyword))
    }
}

pub const RULES: &[Rule] = &[
    Rule {
        intent: Intent::Latest,
        keywords: &["latest", "recent", "new", "today", "current"],
    },
    Rule {
        intent: Intent::Technology,
        keywords: &["technology", "tech", "ai", "computer"],
    },
    Rule {
        intent: Intent::Summary,
        keywords: &["summar", "brief", "overview", "top"],
    },
    Rule {
        intent: Intent::Count,
        keywords: &["how many", "count", "number"],
    },
    Rule {
        intent: Intent::Sources,
        keywords: &["source", "from where", "which website"],
    },
    Rule {
        intent: Intent::Greeting,
        keywords: &["hello", "hi", "hey", "greetings"],
    },
    Rule {
        intent: Intent::Help,
        keywords: &["help", "what can you do", "commands"],
    },
];

pub fn detect(user_message: &str) -> Intent {
    let message = user_message.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&message))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Fallback)
}
