//! Extracts loan figures from free-form citizen text.
//!
//! Citizens mix scripts and units freely: "५ लाख का लोन", "5% per month",
//! "Rs. 50,000 for 2 saal". The parser normalizes Devanagari digits,
//! applies lakh/crore/hazaar multipliers, annualizes monthly rates, and
//! reads tenure from month/year words. It is deliberately first-match:
//! the first rate, the first principal, the first tenure mention win.

use serde::{Deserialize, Serialize};

use super::emi::LoanTerms;

/// Assumed tenure when the citizen names an amount and rate but no
/// duration. Replies that rely on it must state the assumption.
pub const DEFAULT_TENURE_MONTHS: u32 = 12;

const MAX_TENURE_MONTHS: u32 = 600;

const MONTHLY_CUES: &[&str] = &[
    "per month",
    "monthly",
    "/month",
    "mahina",
    "mahine",
    "महीना",
    "महीने",
    "माह",
    "हर महीने",
    "प्रति माह",
];

const ANNUAL_CUES: &[&str] = &[
    "annual",
    "per annum",
    "p.a",
    "yearly",
    "per year",
    "saal",
    "साल",
    "सालाना",
    "वार्षिक",
    "वर्ष",
];

/// Loan figures recovered from one turn of text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoanMention {
    principal_rupees: Option<f64>,
    rate_percent: Option<f64>,
    rate_stated_monthly: bool,
    tenure_months: Option<u32>,
}

impl LoanMention {
    /// Scans the text for principal, interest rate, and tenure mentions.
    pub fn parse(text: &str) -> Self {
        let chars = normalize(text);
        let spans = scan_numbers(&chars);

        let mut mention = LoanMention::default();
        for span in &spans {
            if let Some(marker_end) = rate_marker_end(&chars, span.end) {
                if mention.rate_percent.is_none() {
                    mention.rate_percent = Some(span.value);
                    mention.rate_stated_monthly = is_monthly_rate(&chars, span.start, marker_end);
                }
                continue;
            }

            let word = following_word(&chars, span.end);
            if let Some(multiplier) = scale_multiplier(&word) {
                if mention.principal_rupees.is_none() {
                    mention.principal_rupees = Some(span.value * multiplier);
                }
                continue;
            }

            if let Some(months) = tenure_months_for(&word, span.value) {
                if mention.tenure_months.is_none() {
                    mention.tenure_months = Some(months);
                }
                continue;
            }

            if mention.principal_rupees.is_none()
                && (is_currency_marked(&chars, span, &word) || span.value >= 1_000.0)
            {
                mention.principal_rupees = Some(span.value);
            }
        }
        mention
    }

    pub fn principal_rupees(&self) -> Option<f64> {
        self.principal_rupees
    }

    /// The rate exactly as stated, before annualization.
    pub fn stated_rate_percent(&self) -> Option<f64> {
        self.rate_percent
    }

    pub fn rate_stated_monthly(&self) -> bool {
        self.rate_stated_monthly
    }

    /// The annual-equivalent rate; a monthly figure is multiplied by 12.
    pub fn annual_rate_percent(&self) -> Option<f64> {
        self.rate_percent
            .map(|r| if self.rate_stated_monthly { r * 12.0 } else { r })
    }

    pub fn tenure_months(&self) -> Option<u32> {
        self.tenure_months
    }

    pub fn tenure_assumed(&self) -> bool {
        self.tenure_months.is_none()
    }

    pub fn tenure_or_default(&self) -> u32 {
        self.tenure_months.unwrap_or(DEFAULT_TENURE_MONTHS)
    }

    pub fn has_principal(&self) -> bool {
        self.principal_rupees.is_some()
    }

    pub fn has_rate(&self) -> bool {
        self.rate_percent.is_some()
    }

    /// Builds loan terms when both principal and rate were mentioned.
    pub fn terms(&self) -> Option<LoanTerms> {
        let principal = self.principal_rupees?;
        let rate = self.annual_rate_percent()?;
        LoanTerms::new(principal, rate, self.tenure_or_default()).ok()
    }

    /// Fills this mention's gaps from an earlier partial mention. The
    /// newer turn's figures win where both turns named one.
    pub fn or_parked(self, parked: LoanMention) -> LoanMention {
        LoanMention {
            principal_rupees: self.principal_rupees.or(parked.principal_rupees),
            rate_percent: self.rate_percent.or(parked.rate_percent),
            rate_stated_monthly: if self.rate_percent.is_some() {
                self.rate_stated_monthly
            } else {
                parked.rate_stated_monthly
            },
            tenure_months: self.tenure_months.or(parked.tenure_months),
        }
    }
}

struct NumberSpan {
    value: f64,
    start: usize,
    end: usize,
}

/// Lowercases and folds Devanagari digits to ASCII.
fn normalize(text: &str) -> Vec<char> {
    text.to_lowercase()
        .chars()
        .map(|c| match c as u32 {
            cp @ 0x0966..=0x096F => char::from(b'0' + (cp - 0x0966) as u8),
            _ => c,
        })
        .collect()
}

/// Finds numeric literals, accepting Indian comma grouping and one
/// decimal point ("2,00,000", "7.5").
fn scan_numbers(chars: &[char]) -> Vec<NumberSpan> {
    let mut spans = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        let mut digits = String::new();
        let mut seen_dot = false;
        while i < chars.len() {
            let c = chars[i];
            if c.is_ascii_digit() {
                digits.push(c);
                i += 1;
            } else if (c == ',' || (c == '.' && !seen_dot))
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())
            {
                if c == '.' {
                    seen_dot = true;
                    digits.push('.');
                }
                i += 1;
            } else {
                break;
            }
        }
        if let Ok(value) = digits.parse::<f64>() {
            spans.push(NumberSpan {
                value,
                start,
                end: i,
            });
        }
    }
    spans
}

/// If the number is followed by a percent marker, returns the char
/// index just past that marker.
fn rate_marker_end(chars: &[char], from: usize) -> Option<usize> {
    let mut i = from;
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    if chars.get(i) == Some(&'%') {
        return Some(i + 1);
    }
    let word = word_at(chars, i);
    if word == "percent" || word == "pratishat" || word == "प्रतिशत" {
        return Some(i + word.chars().count());
    }
    None
}

/// Decides whether a rate was stated per month.
///
/// Looks a short window after the percent marker and before the number;
/// an explicit annual cue anywhere in those windows overrides.
fn is_monthly_rate(chars: &[char], number_start: usize, marker_end: usize) -> bool {
    let after = window(chars, marker_end, marker_end + 16);
    let before_start = number_start.saturating_sub(12);
    let before = window(chars, before_start, number_start);

    if contains_any(&after, ANNUAL_CUES) || contains_any(&before, ANNUAL_CUES) {
        return false;
    }
    if contains_any(&after, MONTHLY_CUES) {
        return true;
    }
    // A digit in the before-window means the cue there belongs to some
    // other figure, like a tenure mention.
    !before.chars().any(|c| c.is_ascii_digit()) && contains_any(&before, MONTHLY_CUES)
}

fn scale_multiplier(word: &str) -> Option<f64> {
    if word.starts_with("lakh") || word.starts_with("lac") || word.starts_with("लाख") {
        Some(100_000.0)
    } else if word.starts_with("crore") || word.starts_with("करोड") {
        Some(10_000_000.0)
    } else if word.starts_with("hazaar")
        || word.starts_with("hazar")
        || word.starts_with("thousand")
        || word.starts_with("हज़ार")
        || word.starts_with("हजार")
    {
        Some(1_000.0)
    } else {
        None
    }
}

fn tenure_months_for(word: &str, value: f64) -> Option<u32> {
    let months = if word.starts_with("month")
        || word.starts_with("mahin")
        || word.starts_with("महीन")
        || word == "माह"
    {
        value
    } else if word.starts_with("year")
        || word.starts_with("saal")
        || word.starts_with("साल")
        || word.starts_with("वर्ष")
        || word.starts_with("baras")
        || word.starts_with("बरस")
    {
        value * 12.0
    } else {
        return None;
    };

    let rounded = months.round();
    if rounded >= 1.0 && rounded <= MAX_TENURE_MONTHS as f64 {
        Some(rounded as u32)
    } else {
        None
    }
}

fn is_currency_marked(chars: &[char], span: &NumberSpan, following: &str) -> bool {
    const CURRENCY_WORDS: &[&str] = &["rs", "rupee", "rupees", "rupaye", "रुपये", "रुपए", "रुपया"];

    let mut i = span.start;
    while i > 0 && chars[i - 1].is_whitespace() {
        i -= 1;
    }
    if i > 0 && chars[i - 1] == '₹' {
        return true;
    }
    let preceding = preceding_word(chars, i);
    CURRENCY_WORDS.contains(&preceding.as_str()) || CURRENCY_WORDS.contains(&following)
}

fn following_word(chars: &[char], from: usize) -> String {
    let mut i = from;
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    word_at(chars, i)
}

/// Devanagari nukta and virama are combining marks, not alphabetic,
/// yet they sit inside words like हज़ार and प्रतिशत.
fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || c == '\u{093C}' || c == '\u{094D}'
}

fn word_at(chars: &[char], at: usize) -> String {
    chars[at.min(chars.len())..]
        .iter()
        .take_while(|c| is_word_char(**c))
        .collect()
}

fn preceding_word(chars: &[char], before: usize) -> String {
    let mut end = before;
    // Skip a trailing period as in "rs." and any whitespace.
    while end > 0 && (chars[end - 1].is_whitespace() || chars[end - 1] == '.') {
        end -= 1;
    }
    let mut start = end;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    chars[start..end].iter().collect()
}

fn window(chars: &[char], from: usize, to: usize) -> String {
    let from = from.min(chars.len());
    let to = to.min(chars.len());
    chars[from..to].iter().collect()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hindi_lakh_loan_with_annual_rate() {
        let mention = LoanMention::parse("मुझे 5 लाख का लोन चाहिए, ब्याज दर 48% है");
        assert_eq!(mention.principal_rupees(), Some(500_000.0));
        assert_eq!(mention.annual_rate_percent(), Some(48.0));
        assert!(!mention.rate_stated_monthly());
        assert!(mention.tenure_assumed());

        let terms = mention.terms().unwrap();
        assert!(terms.is_predatory());
        assert_eq!(terms.tenure_months(), DEFAULT_TENURE_MONTHS);
    }

    #[test]
    fn devanagari_digits_are_folded() {
        let mention = LoanMention::parse("५ लाख चाहिए");
        assert_eq!(mention.principal_rupees(), Some(500_000.0));
    }

    #[test]
    fn monthly_rate_is_annualized() {
        let mention = LoanMention::parse("sahukar 5% per month par ₹50,000 de raha hai");
        assert_eq!(mention.stated_rate_percent(), Some(5.0));
        assert!(mention.rate_stated_monthly());
        assert_eq!(mention.annual_rate_percent(), Some(60.0));
        assert_eq!(mention.principal_rupees(), Some(50_000.0));
    }

    #[test]
    fn hindi_monthly_cue_before_rate() {
        let mention = LoanMention::parse("महीने का 3% ब्याज मांग रहा है");
        assert!(mention.rate_stated_monthly());
        assert_eq!(mention.annual_rate_percent(), Some(36.0));
    }

    #[test]
    fn tenure_word_near_rate_does_not_make_it_monthly() {
        let mention = LoanMention::parse("6 महीने के लिए 12% ब्याज पर लोन");
        assert_eq!(mention.tenure_months(), Some(6));
        assert!(!mention.rate_stated_monthly());
        assert_eq!(mention.annual_rate_percent(), Some(12.0));
    }

    #[test]
    fn explicit_annual_cue_wins_over_monthly() {
        let mention = LoanMention::parse("12% annual interest, EMI monthly dena hai");
        assert!(!mention.rate_stated_monthly());
    }

    #[test]
    fn years_convert_to_months() {
        let mention = LoanMention::parse("2 saal ke liye 2,00,000 ka loan 12% par");
        assert_eq!(mention.tenure_months(), Some(24));
        assert_eq!(mention.principal_rupees(), Some(200_000.0));
        assert_eq!(mention.annual_rate_percent(), Some(12.0));
    }

    #[test]
    fn rupee_sign_marks_small_principal() {
        let mention = LoanMention::parse("₹500 ka loan bhi milta hai kya");
        assert_eq!(mention.principal_rupees(), Some(500.0));
    }

    #[test]
    fn rs_prefix_with_period_marks_principal() {
        let mention = LoanMention::parse("rs. 50000 chahiye");
        assert_eq!(mention.principal_rupees(), Some(50_000.0));
    }

    #[test]
    fn bare_small_number_is_not_a_principal() {
        let mention = LoanMention::parse("maine 3 baar office ka chakkar lagaya");
        assert_eq!(mention.principal_rupees(), None);
    }

    #[test]
    fn crore_multiplier() {
        let mention = LoanMention::parse("1 crore ka project loan");
        assert_eq!(mention.principal_rupees(), Some(10_000_000.0));
    }

    #[test]
    fn decimal_rate_parses() {
        let mention = LoanMention::parse("7.5% interest per annum");
        assert_eq!(mention.annual_rate_percent(), Some(7.5));
    }

    #[test]
    fn no_numbers_yields_empty_mention() {
        let mention = LoanMention::parse("लोन कैसे मिलेगा?");
        assert!(!mention.has_principal());
        assert!(!mention.has_rate());
        assert_eq!(mention.tenure_or_default(), DEFAULT_TENURE_MONTHS);
        assert!(mention.terms().is_none());
    }

    #[test]
    fn parked_mention_completes_a_rate_answer() {
        let parked = LoanMention::parse("2 साल के लिए 50 हज़ार का लोन");
        let answer = LoanMention::parse("ब्याज 3% महीना है");

        let combined = answer.or_parked(parked);
        assert_eq!(combined.principal_rupees(), Some(50_000.0));
        assert_eq!(combined.tenure_months(), Some(24));
        assert!(combined.rate_stated_monthly());
        assert_eq!(combined.annual_rate_percent(), Some(36.0));
        assert!(combined.terms().is_some());
    }

    #[test]
    fn newer_figures_win_over_parked_ones() {
        let parked = LoanMention::parse("1 lakh ka loan 10% par");
        let newer = LoanMention::parse("nahi, 2 lakh chahiye");

        let combined = newer.or_parked(parked);
        assert_eq!(combined.principal_rupees(), Some(200_000.0));
        assert_eq!(combined.annual_rate_percent(), Some(10.0));
    }

    #[test]
    fn percent_word_forms_count_as_rate() {
        let mention = LoanMention::parse("byaj 10 percent hai");
        assert_eq!(mention.annual_rate_percent(), Some(10.0));
        let mention = LoanMention::parse("ब्याज 10 प्रतिशत है");
        assert_eq!(mention.annual_rate_percent(), Some(10.0));
    }
}
