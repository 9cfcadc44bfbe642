//! Fixed keyword tables driving the extractor
//!
//! Table order is load-bearing: domain ties resolve to the earliest entry.

pub const GENERAL_DOMAIN: &str = "general";

pub struct DomainSpec {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    /// Tokens that flag uncertainty inside this domain even when the
    /// domain does not win the classification.
    pub uncertainty_indicators: &'static [&'static str],
}

pub const DOMAINS: &[DomainSpec] = &[
    DomainSpec {
        name: "technology",
        keywords: &[
            "code", "software", "programming", "bug", "server", "database", "api", "deploy",
            "install", "computer", "app", "error", "script",
        ],
        uncertainty_indicators: &["broken", "crash", "glitch", "weird"],
    },
    DomainSpec {
        name: "finance",
        keywords: &[
            "money", "budget", "invest", "investment", "price", "cost", "tax", "payment", "loan",
            "salary", "savings",
        ],
        uncertainty_indicators: &["afford", "risky", "roughly"],
    },
    DomainSpec {
        name: "health",
        keywords: &[
            "health", "doctor", "medicine", "symptom", "symptoms", "diet", "exercise", "sleep",
            "pain", "injury",
        ],
        uncertainty_indicators: &["worried", "unsure", "severe"],
    },
    DomainSpec {
        name: "travel",
        keywords: &[
            "travel", "trip", "flight", "hotel", "booking", "destination", "itinerary", "visa",
            "luggage",
        ],
        uncertainty_indicators: &["somewhere", "anywhere", "wherever"],
    },
    DomainSpec {
        name: "creative",
        keywords: &[
            "story", "design", "music", "art", "poem", "draw", "sketch", "novel", "lyrics",
            "creative",
        ],
        uncertainty_indicators: &["inspiration", "artsy"],
    },
];

pub(crate) const INTERROGATIVES: &[&str] = &[
    "what", "how", "why", "when", "where", "who", "which", "can", "could", "would", "should",
    "is", "are", "do", "does",
];

pub(crate) const REQUEST_VERBS: &[&str] = &[
    "create", "make", "build", "write", "generate", "add", "update", "delete", "remove", "fix",
    "run", "send", "show", "help",
];

pub(crate) const HEDGING_TOKENS: &[&str] = &["any", "some", "maybe", "possibly", "about"];

pub(crate) const TEMPORAL_BACKREFS: &[&str] = &[
    "before", "previous", "previously", "earlier", "again", "last", "yesterday",
];

pub(crate) const RECALL_TOKENS: &[&str] = &["remember", "recall", "mentioned", "discussed", "said"];
