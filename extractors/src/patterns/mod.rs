//! Compiled matchers and multi-locale heuristics for contact-field
//! classification. Every pattern is compiled exactly once into the shared
//! [`PatternLibrary`]; locale keyword lists are data tables so new locales
//! stay additive.

use once_cell::sync::Lazy;
use regex::Regex;
use shared_types::LabeledValue;

use crate::values::unique_strings;

/// Bare hosts are only promoted to websites when their TLD is on this list.
const KNOWN_TLDS: &[&str] = &[
    "com", "net", "org", "de", "at", "ch", "eu", "io", "co", "us", "uk", "fr", "it", "es", "nl",
    "be", "jp", "cn", "ru", "pl", "se", "no", "fi", "dk", "pt", "br", "mx", "ca", "au", "nz",
];

const OFFICE_HINTS: &[&str] = &["office", "văn phòng"];
const BRANCH_HINTS: &[&str] = &["branch", "chi nhánh", "cn"];

// Checked in order; a later match overrides an earlier one.
const LOCATION_HINTS: &[(&str, &[&str])] = &[
    ("hcm", &["hcm", "ho chi minh", "sai gon"]),
    ("hanoi", &["ha noi", "hà nội"]),
    ("china", &["china", "trung quoc", "trung quốc"]),
    ("vietnam", &["viet nam", "vietnam"]),
];

static LIBRARY: Lazy<PatternLibrary> = Lazy::new(PatternLibrary::new);

/// Process-wide pattern library, compiled on first use.
pub fn library() -> &'static PatternLibrary {
    &LIBRARY
}

pub struct PatternLibrary {
    pub email: Regex,
    pub phone: Regex,
    pub url: Regex,
    pub image_artifact: Regex,
    pub bullet: Regex,
    pub arrow: Regex,
    pub label_phone: Regex,
    pub label_fax: Regex,
    pub label_email: Regex,
    pub label_web: Regex,
    pub label_office: Regex,
    pub label_branch: Regex,
    pub address_label_line: Regex,
    pub company_hint: Regex,
    pub corporate_suffix: Regex,
    pub title_hint: Regex,
    pub person_hint: Regex,
    pub company_marker: Regex,
    pub street: Regex,
    pub postal: Regex,
    pub letter: Regex,
    pub hours_header: Regex,
    pub hours_line: Regex,
    pub time_token: Regex,
    pub marketing: Regex,
    pub contact_inline: Regex,
    pub inline_short_label: Regex,
    short_label: Regex,
    capitalized_word: Regex,
    image_extension: Regex,
    non_alphanumeric_prefix: Regex,
    whitespace: Regex,
}

impl PatternLibrary {
    pub fn new() -> Self {
        Self {
            email: Regex::new(r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}").unwrap(),
            phone: Regex::new(r"\+?[0-9][0-9()\-.\s]{6,}[0-9]").unwrap(),
            url: Regex::new(r"(?i)(https?://[^\s]+|www\.[^\s]+|[A-Z0-9.-]+\.[A-Z]{2,})(/[^\s]*)?")
                .unwrap(),
            image_artifact: Regex::new(r"(?i)!\[[^\]]*\]\([^)]*\)|img-\d+\.(png|jpe?g|gif)")
                .unwrap(),
            bullet: Regex::new(r"^[\s#•*\-–—·>]+").unwrap(),
            arrow: Regex::new(r"[🢐🡆➔➤➜]+").unwrap(),
            label_phone: Regex::new(
                r"(?i)^(tel|telephone|telefon|phone|mob|mobile|đt|điện thoại)\s*[:：]",
            )
            .unwrap(),
            label_fax: Regex::new(r"(?i)^(fax)\s*[:：]").unwrap(),
            label_email: Regex::new(r"(?i)^(e-?mail)\s*[:：]").unwrap(),
            label_web: Regex::new(r"(?i)^(web|website|site|url)\s*[:：]").unwrap(),
            label_office: Regex::new(r"(?i)^(văn phòng|vp|office)\s*[:：]").unwrap(),
            label_branch: Regex::new(r"(?i)^(cn|chi nhánh|branch)\s*[:：]").unwrap(),
            address_label_line: Regex::new(
                r"(?i)^(văn phòng|vp|office|cn|chi nhánh|branch)\s*[:：]",
            )
            .unwrap(),
            company_hint: Regex::new(
                r"(?i)(co\.?\s*ltd|ltd|inc\.?|corp\.?|gmbh|s\.a\.?|company|tnhh|jsc|công ty|praxis|clinic|studio|atelier|zentrum|büro|office)",
            )
            .unwrap(),
            corporate_suffix: Regex::new(r"(?i)(group|se|ag|gmbh)").unwrap(),
            title_hint: Regex::new(
                r"(?i)(phòng\s+(kinh doanh|marketing|sales|nhân sự|kỹ thuật)|department|sales|marketing|business|manager|director|lead|vice president|president|engineer|research|entwicklung|development)",
            )
            .unwrap(),
            person_hint: Regex::new(r"(?i)^(dr\.?|prof\.?|mr\.?|ms\.?|mrs\.?|herr|frau)\b")
                .unwrap(),
            company_marker: Regex::new(r"(?i)công ty").unwrap(),
            street: Regex::new(r"(?i)(straße|strasse|str\.|street|st\.|road|rd\.|platz|allee)")
                .unwrap(),
            postal: Regex::new(r"\b\d{4,6}\b").unwrap(),
            letter: Regex::new(r"[A-Za-zÄÖÜäöüß]").unwrap(),
            hours_header: Regex::new(r"(?i)(öffnungszeiten|opening hours)").unwrap(),
            hours_line: Regex::new(r"(?i)(mo|di|mi|do|fr|sa|so)\b").unwrap(),
            time_token: Regex::new(r"\b\d{1,2}:\d{2}\b").unwrap(),
            marketing: Regex::new(r"(?i)(wir helfen|we help|call us|reach us|kontaktieren)")
                .unwrap(),
            contact_inline: Regex::new(r"(?i)(telefon|tel\.?|phone|fax|e-?mail|web(site)?|www\.|http)")
                .unwrap(),
            inline_short_label: Regex::new(r"\bT\b|\bM\b").unwrap(),
            short_label: Regex::new(r"(?i)^(t|m|f|tel|telefon|mobile)\b\s*[:：]?\s*(.+)$").unwrap(),
            capitalized_word: Regex::new(r"^[A-ZÄÖÜ][a-zäöüß-]+$").unwrap(),
            image_extension: Regex::new(r"(?i)\.(png|jpe?g|gif)$").unwrap(),
            non_alphanumeric_prefix: Regex::new(r"(?i)^[^a-z0-9]+").unwrap(),
            whitespace: Regex::new(r"\s+").unwrap(),
        }
    }

    /// Everything after the first `:`/`：` separator, or empty when the line
    /// has no separator.
    pub fn parse_label_value(&self, line: &str) -> String {
        let parts: Vec<&str> = line.split([':', '：']).collect();
        if parts.len() < 2 {
            return String::new();
        }
        parts[1..].join(":").trim().to_string()
    }

    /// All phone-shaped digit sequences in a line, deduplicated.
    pub fn parse_numbers(&self, line: &str) -> Vec<String> {
        unique_strings(self.phone.find_iter(line).map(|m| m.as_str()))
    }

    /// Split an inline multi-field line ("T 123 • M 456") on bullet/pipe
    /// separators and pull short-labeled numbers out of each segment.
    /// `Tel`/`Telefon` normalize to `T`, `Mobile` to `M`.
    pub fn extract_labeled_numbers(&self, line: &str) -> Vec<LabeledValue> {
        let mut results = Vec::new();
        for part in line.split(['•', '·', '|']) {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }
            let Some(captures) = self.short_label.captures(trimmed) else {
                continue;
            };
            let raw = captures[1].to_uppercase();
            let label = match raw.as_str() {
                "TEL" | "TELEFON" => "T".to_string(),
                "MOBILE" => "M".to_string(),
                _ => raw,
            };
            for value in self.parse_numbers(&captures[2]) {
                results.push(LabeledValue {
                    label: Some(label.clone()),
                    value,
                });
            }
        }
        results
    }

    /// A line of at least six letters that is identical to its own uppercase
    /// form is a candidate name/title line.
    pub fn is_mostly_uppercase(&self, line: &str) -> bool {
        let letters: String = line.chars().filter(|c| c.is_alphabetic()).collect();
        if letters.is_empty() {
            return false;
        }
        letters == letters.to_uppercase() && letters.chars().count() >= 6
    }

    /// Honorific prefix, or 2-4 capitalized letter-only words with no digits.
    pub fn is_likely_person_name(&self, line: &str) -> bool {
        if self.company_hint.is_match(line) {
            return false;
        }
        if self.person_hint.is_match(line) {
            return true;
        }
        if line.chars().any(|c| c.is_ascii_digit()) {
            return false;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.len() < 2 || words.len() > 4 {
            return false;
        }
        let caps = words
            .iter()
            .filter(|word| self.capitalized_word.is_match(word))
            .count();
        caps >= 2
    }

    /// Context label for an office/branch marker line, combining the marker
    /// kind with any recognized city/country token ("office-hcm").
    pub fn derive_label(&self, line: &str) -> String {
        let lower = line.to_lowercase();

        let mut base = "";
        if self.label_office.is_match(line) {
            base = "office";
        }
        if self.label_branch.is_match(line) {
            base = "branch";
        }
        if base.is_empty() && OFFICE_HINTS.iter().any(|hint| lower.contains(hint)) {
            base = "office";
        }
        if base.is_empty() && BRANCH_HINTS.iter().any(|hint| lower.contains(hint)) {
            base = "branch";
        }

        let mut loc = "";
        for (location, hints) in LOCATION_HINTS {
            if hints.iter().any(|hint| lower.contains(hint)) {
                loc = location;
            }
        }

        match (base.is_empty(), loc.is_empty()) {
            (false, false) => format!("{}-{}", base, loc),
            (false, true) => base.to_string(),
            (true, false) => loc.to_string(),
            (true, true) => String::new(),
        }
    }

    /// Keep only values that look like real websites: no image files, and a
    /// scheme, `www.` prefix, or bare host with a known TLD.
    pub fn clean_urls<I, S>(&self, values: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        unique_strings(
            values
                .into_iter()
                .filter(|value| {
                    let value = value.as_ref();
                    !self.image_extension.is_match(value) && self.is_likely_url(value)
                })
                .map(|value| value.as_ref().to_string())
                .collect::<Vec<_>>(),
        )
    }

    fn is_likely_url(&self, value: &str) -> bool {
        let cleaned = self.non_alphanumeric_prefix.replace(value, "");
        let lower = cleaned.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("www.")
        {
            return true;
        }
        let host = cleaned.split('/').next().unwrap_or("");
        if !host.contains('.') {
            return false;
        }
        match host.rsplit('.').next() {
            Some(tld) => KNOWN_TLDS.contains(&tld.to_lowercase().as_str()),
            None => false,
        }
    }

    /// Drop any trailing contact-channel fragment from an address line.
    pub fn strip_contact_from_address_line(&self, line: &str) -> String {
        match self.contact_inline.find(line) {
            Some(m) => line[..m.start()].trim().to_string(),
            None => line.trim().to_string(),
        }
    }

    /// A line that carries contact-channel content in any recognized form,
    /// used to terminate address blocks.
    pub fn looks_like_contact_line(&self, line: &str) -> bool {
        self.label_phone.is_match(line)
            || self.label_fax.is_match(line)
            || self.label_email.is_match(line)
            || self.label_web.is_match(line)
            || self.phone.is_match(line)
            || self.contact_inline.is_match(line)
    }

    /// Collapse runs of whitespace to single spaces.
    pub fn collapse_whitespace(&self, line: &str) -> String {
        self.whitespace.replace_all(line, " ").to_string()
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::new()
    }
}
