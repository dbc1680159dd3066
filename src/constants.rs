/// Fixed vocabulary and thresholds used by the extraction rules.
/// Everything here is read-only data compiled into `RuleSet` once per process.

// Sentinel rendered for a document with no recognizable insured entity
pub const UNKNOWN: &str = "UNKNOWN";

// Degenerate input: PDF viewer metadata leaked in place of page text
pub const PDF_METADATA_MARKER: &str = "FitH null";
pub const PDF_PARSING_ERROR_REASON: &str = "PDF parsing error";
pub const SHORT_DOCUMENT_CHARS: usize = 50;

/// Characters allowed inside a matched entity run (letters, digits, whitespace, `.,&'-`).
pub const ENTITY_CHARS: &str = r"[A-Za-z0-9\s.,&'-]";

/// A run ends at a period, a line break, or the end of the text.
pub const ENTITY_TERMINATOR: &str = r"(?:\.|\n|\r|$)";

/// T1: explicit primary/principal insured phrasing. Capture group 1 holds the name.
pub const PRIMARY_ENTITY_PATTERNS: &[(&str, &str)] = &[
    ("primary_entity_parenthetical", r"(\w+(?:\s+\w+)+)\s*\((?:primary|main)\s+entity\)"),
    ("primary_insured_label", r"primary\s+insured\s*[:\-]\s*(\w+(?:\s+\w+)+)"),
    ("primary_insured_is", r"primary\s+insured\s+(?:is|being)\s+(\w+(?:\s+\w+)+)"),
    ("refer_to_as_primary", r"refer\s+to\s+(\w+(?:\s+\w+)+)\s+as\s+(?:the\s+)?primary"),
    ("principal_insured_label", r"principal\s+insured\s*[:\-]\s*(\w+(?:\s+\w+)+)"),
];

/// T2: section labels that usually precede the insured's name.
pub const SECTION_MARKERS: &[(&str, &str)] = &[
    ("named_insured", r"(?:named\s+)?insured(?:\s+party)?[:\s]+"),
    ("policy_holder", r"policy\s+holder[:\s]+"),
    ("certificate_holder", r"certificate\s+holder[:\s]+"),
    ("insurance_holder", r"insurance\s+holder[:\s]+"),
    ("insured_entity", r"(?:primary|insured)\s+(?:entity|company)[:\s]+"),
    ("coverage_for", r"coverage\s+for[:\s]+"),
    ("issued_to", r"issued\s+to[:\s]+"),
];

/// Marker matches with fewer characters than this (after trimming) are too weak a signal.
pub const MIN_MARKER_MATCH_CHARS: usize = 5;

/// T3 family (a): legal-entity suffixes, as (token, regex fragment).
pub const COMPANY_SUFFIXES: &[(&str, &str)] = &[
    ("LLC", r"LLC"),
    ("Inc", r"Inc\.?"),
    ("Ltd", r"Ltd\.?"),
    ("Corporation", r"Corporation"),
    ("Corp", r"Corp\.?"),
    ("Company", r"Company"),
    ("Co", r"Co\.?"),
    ("Group", r"Group"),
    ("Partners", r"Partners"),
    ("Farms", r"Farms"),
    ("Industries", r"Industries"),
    ("Holdings", r"Holdings"),
    ("Associates", r"Associates"),
    ("Services", r"Services"),
    ("Solutions", r"Solutions"),
    ("Systems", r"Systems"),
    ("Technologies", r"Technologies"),
    ("Properties", r"Properties"),
];

/// T3 family (b): words that mark a phrase as a business name.
pub const BUSINESS_INDICATORS: &[&str] = &[
    "Healthcare",
    "Medical",
    "Financial",
    "Insurance",
    "Bank",
    "Construction",
    "Manufacturing",
    "Retail",
    "Software",
    "Consulting",
    "Development",
    "Resources",
    "Energy",
    "Foods",
    "Products",
    "Enterprises",
    "Global",
    "International",
    "National",
];

/// T4: lowercase header words that disqualify a capitalized phrase.
pub const HEADER_DENYLIST: &[&str] = &["report", "certificate", "policy", "document", "claim", "loss"];

/// Short trailing tokens that are legitimate suffixes, not truncation debris.
pub const SHORT_SUFFIX_TOKENS: &[&str] = &["inc", "llc", "ltd", "co"];
pub const TRUNCATED_WORD_MAX_CHARS: usize = 3;

/// Suffixes `extend` looks for right after a T1 name, in priority order.
pub const EXTENSION_SUFFIXES: &[&str] = &["LLC", "Inc", "Ltd", "Corporation", "Corp", "Co", "Group"];
pub const EXTENSION_LOOKAHEAD_CHARS: usize = 30;

// Candidate ranker vocabulary and weights
pub const RANKER_MIN_RUN_CHARS: usize = 5;
pub const RANKER_MAX_RUN_CHARS: usize = 50;
pub const RANKER_SUFFIXES: &[&str] = &["llc", "inc", "ltd", "corporation", "corp", "co", "group"];
pub const RANKER_BUSINESS_WORDS: &[&str] = &[
    "healthcare",
    "medical",
    "financial",
    "insurance",
    "construction",
    "manufacturing",
    "retail",
    "software",
    "consulting",
    "solutions",
    "services",
    "systems",
    "technologies",
];
pub const RANKER_NON_ENTITY_PHRASES: &[&str] = &[
    "report of",
    "certificate of",
    "policy number",
    "claim form",
    "page",
    "date",
    "time",
];
pub const SCORE_WORD_COUNT: f64 = 0.3;
pub const SCORE_SUFFIX: f64 = 0.4;
pub const SCORE_BUSINESS_WORD: f64 = 0.3;
pub const SCORE_NON_ENTITY_PENALTY: f64 = -0.5;

// Insured registry matching
pub const NO_MATCH_NAME: &str = "No match found";
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.8;

// Service adapter limits and legacy knob defaults
pub const DEFAULT_MAX_INPUT_CHARS: usize = 1_000_000;
pub const DEFAULT_MAX_LENGTH: u32 = 200;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
