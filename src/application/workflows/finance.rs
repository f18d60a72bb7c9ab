//! Financial guidance: fraud screening, EMI arithmetic, rate warnings,
//! and general money questions.
//!
//! The fraud screen runs on the raw turn text before anything else. A
//! high-severity signal replaces the whole reply; a caution signal is
//! prepended to whatever answer the rest of the turn produces. Loan
//! arithmetic is done locally and never delegated to the model.

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::info;

use crate::domain::finance::{
    LoanAlternative, LoanMention, LoanTerms, RiskBand, ScamSeverity, ScamSignal, ScamSignalSet,
};
use crate::domain::foundation::{Language, WORKING_LANGUAGE};
use crate::domain::session::Session;
use crate::ports::{CompletionError, CompletionRequest, CompletionService, MessageRole};

use super::{TurnInput, WorkflowReply, WorkflowResult};
use crate::application::prompts;

const ADVICE_MAX_TOKENS: u32 = 500;

/// Government alternatives listed alongside a predatory-rate warning.
const ALTERNATIVES_SHOWN: usize = 3;

/// Answers money questions, with the fraud screen always first in line.
pub struct FinancialAdvisor {
    completion: Arc<dyn CompletionService>,
    signals: Arc<ScamSignalSet>,
}

impl FinancialAdvisor {
    pub fn new(completion: Arc<dyn CompletionService>, signals: Arc<ScamSignalSet>) -> Self {
        Self { completion, signals }
    }

    /// Advances by one turn. Every path is terminal except a parked
    /// principal waiting for its interest rate.
    pub async fn advance(
        &self,
        session: &mut Session,
        input: &TurnInput<'_>,
    ) -> Result<WorkflowResult, CompletionError> {
        let language = prompts::canned_language(input.language);

        let mut caution: Option<&ScamSignal> = None;
        if let Some(signal) = self.signals.first_match(input.raw_text) {
            match signal.severity {
                ScamSeverity::High => {
                    info!(
                        trace_id = %input.trace_id,
                        signal = %signal.id,
                        "fraud pattern replaced the reply"
                    );
                    return Ok(WorkflowResult::Complete(WorkflowReply::text(
                        signal.alert_for(language),
                        language,
                    )));
                }
                ScamSeverity::Caution => caution = Some(signal),
            }
        }

        let mention = match session.scratch_mut().finance_mut().take_pending() {
            Some(parked) => LoanMention::parse(input.raw_text).or_parked(parked),
            None => LoanMention::parse(input.raw_text),
        };

        let mut result = self.answer(session, &mention, input, language).await?;
        if let Some(signal) = caution {
            let reply = result.reply_mut();
            reply.text = format!("{}\n\n{}", signal.alert_for(reply.language), reply.text);
        }
        Ok(result)
    }

    async fn answer(
        &self,
        session: &mut Session,
        mention: &LoanMention,
        input: &TurnInput<'_>,
        language: Language,
    ) -> Result<WorkflowResult, CompletionError> {
        if let Some(terms) = mention.terms() {
            return Ok(WorkflowResult::Complete(WorkflowReply::text(
                emi_reply(mention, &terms, language),
                language,
            )));
        }
        if let Some(annual) = mention.annual_rate_percent() {
            return Ok(WorkflowResult::Complete(WorkflowReply::text(
                rate_band_reply(mention, annual, language),
                language,
            )));
        }
        if mention.has_principal() {
            session.scratch_mut().finance_mut().park(*mention);
            return Ok(WorkflowResult::NeedsMoreInfo(WorkflowReply::text(
                prompts::rate_question(language),
                language,
            )));
        }
        let text = self.general_advice(session, input).await?;
        Ok(WorkflowResult::Complete(WorkflowReply::text(
            text,
            WORKING_LANGUAGE,
        )))
    }

    /// No figures in the turn; the question goes to the model with the
    /// profile as context.
    async fn general_advice(
        &self,
        session: &Session,
        input: &TurnInput<'_>,
    ) -> Result<String, CompletionError> {
        let mut context = String::new();
        let pairs = session.profile().known_pairs();
        if !pairs.is_empty() {
            context.push_str("What is known about the citizen:\n");
            for (field, value) in pairs {
                let _ = writeln!(context, "- {}: {value}", field.as_str());
            }
            context.push('\n');
        }
        context.push_str("Question: ");
        context.push_str(input.working_text);

        let request = CompletionRequest::new(input.trace_id)
            .with_system_prompt(prompts::FINANCE_ADVICE_SYSTEM_PROMPT)
            .with_max_tokens(ADVICE_MAX_TOKENS)
            .with_temperature(0.3)
            .with_message(MessageRole::User, context);
        self.completion.complete(request).await
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Reply assembly
// ─────────────────────────────────────────────────────────────────────────

fn emi_reply(mention: &LoanMention, terms: &LoanTerms, language: Language) -> String {
    let schedule = terms.schedule();
    let hindi = language == Language::Hindi;
    let principal = format_rupees(terms.principal_rupees() as u64);
    let emi = format_rupees(schedule.monthly_emi_rupees());
    let total = format_rupees(schedule.total_payment_rupees());
    let interest = format_rupees(schedule.total_interest_rupees());
    let rate = trim_rate(terms.annual_rate_percent());
    let months = terms.tenure_months();

    let mut text = if hindi {
        format!(
            "₹{principal} के लोन पर {rate}% सालाना ब्याज से {months} महीने की EMI \
             करीब ₹{emi} होगी। कुल ₹{total} चुकाने होंगे, जिसमें ₹{interest} ब्याज है।"
        )
    } else {
        format!(
            "A loan of ₹{principal} at {rate}% a year over {months} months means \
             an EMI of about ₹{emi}. You would repay about ₹{total} in total, of \
             which ₹{interest} is interest."
        )
    };

    if let Some(note) = annualization_note(mention, language) {
        text.push(' ');
        text.push_str(&note);
    }
    if mention.tenure_assumed() {
        let assumed = terms.tenure_months();
        let note = if hindi {
            format!("अवधि नहीं बताई गई, इसलिए {assumed} महीने मानकर हिसाब लगाया है।")
        } else {
            format!("No tenure was given, so this assumes {assumed} months.")
        };
        text.push(' ');
        text.push_str(&note);
    }
    text.push(' ');
    text.push_str(&risk_note(terms.annual_rate_percent(), language));
    text
}

/// A rate was quoted with no amount: assess the rate alone.
fn rate_band_reply(mention: &LoanMention, annual: f64, language: Language) -> String {
    let hindi = language == Language::Hindi;
    let mut text = String::new();
    if let Some(note) = annualization_note(mention, language) {
        text.push_str(&note);
        text.push(' ');
    }
    text.push_str(&risk_note(annual, language));
    text.push(' ');
    text.push_str(if hindi {
        "लोन की रक़म और अवधि बताएँ तो EMI का भी हिसाब मिल जाएगा।"
    } else {
        "Share the loan amount and tenure for an exact EMI."
    });
    text
}

/// Explains that a per-month rate was converted before judging it.
fn annualization_note(mention: &LoanMention, language: Language) -> Option<String> {
    if !mention.rate_stated_monthly() {
        return None;
    }
    let stated = trim_rate(mention.stated_rate_percent()?);
    let annual = trim_rate(mention.annual_rate_percent()?);
    Some(if language == Language::Hindi {
        format!("{stated}% महीना का मतलब {annual}% सालाना होता है।")
    } else {
        format!("{stated}% a month works out to {annual}% a year.")
    })
}

fn risk_note(annual: f64, language: Language) -> String {
    let hindi = language == Language::Hindi;
    let rate = trim_rate(annual);
    match RiskBand::for_annual_rate(annual) {
        RiskBand::High => {
            let mut note = if hindi {
                format!(
                    "चेतावनी: {rate}% सालाना ब्याज बहुत ज़्यादा है। बैंक इससे \
                     कहीं कम पर लोन देते हैं। हो सके तो यह लोन न लें।"
                )
            } else {
                format!(
                    "Warning: {rate}% a year is far above what banks charge. \
                     Avoid this loan if you can."
                )
            };
            note.push('\n');
            note.push_str(if hindi {
                "सरकारी योजनाओं से सस्ता लोन मिल सकता है:"
            } else {
                "Cheaper government loan options:"
            });
            for alternative in LoanAlternative::top(ALTERNATIVES_SHOWN) {
                note.push_str("\n- ");
                note.push_str(&alternative.summary());
            }
            note
        }
        RiskBand::Elevated => {
            if hindi {
                format!(
                    "{rate}% सालाना ब्याज ऊँचा है। बैंक या सहकारी समिति से \
                     सस्ता लोन मिल सकता है।"
                )
            } else {
                format!(
                    "{rate}% a year is on the higher side. A bank or \
                     cooperative society may lend cheaper."
                )
            }
        }
        RiskBand::Standard => {
            if hindi {
                format!("{rate}% सालाना ब्याज बैंक दरों के सामान्य दायरे में है।")
            } else {
                format!("{rate}% a year is within the normal range for bank loans.")
            }
        }
    }
}

/// Renders an amount with Indian digit grouping, as 12,34,567.
fn format_rupees(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut i = head.len();
    while i > 2 {
        groups.push(&head[i - 2..i]);
        i -= 2;
    }
    groups.push(&head[..i]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Drops a trailing `.0` from whole-number rates.
fn trim_rate(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{rate:.0}")
    } else {
        format!("{rate}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockCompletion;
    use crate::domain::foundation::{SessionKey, TraceId};
    use crate::domain::intent::Classification;

    fn signal_set() -> ScamSignalSet {
        ScamSignalSet::from_json_str(
            r#"[
                {
                    "id": "otp_share",
                    "severity": "high",
                    "keywords": ["otp"],
                    "alert_hi": "ओटीपी किसी को न बताएँ। बैंक कभी ओटीपी नहीं माँगता।",
                    "alert_en": "Never share an OTP. No bank or official ever asks for it."
                },
                {
                    "id": "advance_fee",
                    "severity": "caution",
                    "keywords": ["advance fee"],
                    "alert_hi": "लोन से पहले पैसे माँगना धोखे की निशानी हो सकती है।",
                    "alert_en": "Asking for money upfront is a common sign of loan fraud."
                }
            ]"#,
        )
        .unwrap()
    }

    fn advisor(mock: MockCompletion) -> FinancialAdvisor {
        FinancialAdvisor::new(Arc::new(mock), Arc::new(signal_set()))
    }

    fn session() -> Session {
        Session::new(SessionKey::new("s-1").unwrap())
    }

    fn input<'a>(
        classification: &'a Classification,
        text: &'a str,
        language: Language,
    ) -> TurnInput<'a> {
        TurnInput {
            raw_text: text,
            working_text: text,
            language,
            classification,
            trace_id: TraceId::new(),
        }
    }

    mod fraud_screen {
        use super::*;

        #[tokio::test]
        async fn high_severity_signal_replaces_the_reply() {
            // Given a turn that asks about sharing an OTP
            let mock = MockCompletion::new();
            let engine = advisor(mock.clone());
            let mut session = session();
            let classification = Classification::empty();

            // When the advisor takes the turn
            let result = engine
                .advance(
                    &mut session,
                    &input(
                        &classification,
                        "Bank called asking my OTP for loan approval",
                        Language::English,
                    ),
                )
                .await
                .unwrap();

            // Then the warning is the whole reply; no model is consulted
            let WorkflowResult::Complete(reply) = result else {
                panic!("expected completion");
            };
            assert_eq!(
                reply.text,
                "Never share an OTP. No bank or official ever asks for it."
            );
            assert_eq!(mock.call_count(), 0);
        }

        #[tokio::test]
        async fn hindi_speaker_gets_the_hindi_alert() {
            // Given a Hindi turn matching the same signal
            let engine = advisor(MockCompletion::new());
            let mut session = session();
            let classification = Classification::empty();

            // When the advisor takes the turn
            let result = engine
                .advance(
                    &mut session,
                    &input(&classification, "कोई फोन पर OTP मांग रहा है", Language::Hindi),
                )
                .await
                .unwrap();

            // Then the canned Hindi warning comes back directly
            assert!(result.reply().text.contains("ओटीपी किसी को न बताएँ"));
            assert_eq!(result.reply().language, Language::Hindi);
        }

        #[tokio::test]
        async fn caution_signal_prefixes_the_normal_answer() {
            // Given a caution keyword alongside full loan figures
            let engine = advisor(MockCompletion::new());
            let mut session = session();
            let classification = Classification::empty();

            // When the advisor takes the turn
            let result = engine
                .advance(
                    &mut session,
                    &input(
                        &classification,
                        "They want an advance fee for a loan of 2 lakh at 12% for 24 months",
                        Language::English,
                    ),
                )
                .await
                .unwrap();

            // Then the warning leads and the EMI answer still follows
            let text = &result.reply().text;
            assert!(text.starts_with("Asking for money upfront"));
            assert!(text.contains("EMI of about"));
            assert!(result.is_complete());
        }
    }

    mod emi_answers {
        use super::*;

        #[tokio::test]
        async fn full_mention_gets_the_schedule() {
            // Given principal, rate, and tenure in one turn
            let mock = MockCompletion::new();
            let engine = advisor(mock.clone());
            let mut session = session();
            let classification = Classification::empty();

            // When the advisor takes the turn
            let result = engine
                .advance(
                    &mut session,
                    &input(
                        &classification,
                        "I took a loan of 2 lakh at 12% for 24 months",
                        Language::English,
                    ),
                )
                .await
                .unwrap();

            // Then the locally computed EMI is in the reply
            let expected = LoanTerms::new(200_000.0, 12.0, 24)
                .unwrap()
                .schedule()
                .monthly_emi_rupees();
            let text = &result.reply().text;
            assert!(text.contains(&format!("₹{}", format_rupees(expected))));
            assert!(text.contains("24 months"));
            assert!(text.contains("normal range"));
            assert_eq!(mock.call_count(), 0);
            assert!(result.is_complete());
        }

        #[tokio::test]
        async fn monthly_rate_is_annualized_and_flagged_predatory() {
            // Given a Hindi turn quoting 4% per month
            let engine = advisor(MockCompletion::new());
            let mut session = session();
            let classification = Classification::empty();

            // When the advisor takes the turn
            let result = engine
                .advance(
                    &mut session,
                    &input(
                        &classification,
                        "50 हज़ार का लोन है, ब्याज 4% महीना लगता है",
                        Language::Hindi,
                    ),
                )
                .await
                .unwrap();

            // Then the reply annualizes the rate, warns, and lists
            // government alternatives
            let text = &result.reply().text;
            assert!(text.contains("4% महीना का मतलब 48% सालाना"));
            assert!(text.contains("चेतावनी"));
            assert!(text.contains("PM MUDRA Yojana"));
        }

        #[tokio::test]
        async fn exact_threshold_rate_is_not_called_predatory() {
            // Given a rate sitting exactly on the predatory line
            let engine = advisor(MockCompletion::new());
            let mut session = session();
            let classification = Classification::empty();

            // When the advisor takes the turn
            let result = engine
                .advance(
                    &mut session,
                    &input(
                        &classification,
                        "A loan of 1 lakh at 36% per year for 12 months",
                        Language::English,
                    ),
                )
                .await
                .unwrap();

            // Then it reads as high-side guidance, not a fraud warning
            let text = &result.reply().text;
            assert!(text.contains("on the higher side"));
            assert!(!text.contains("Warning:"));
        }
    }

    mod partial_figures {
        use super::*;

        #[tokio::test]
        async fn principal_without_rate_parks_and_asks() {
            // Given an amount with no interest rate
            let mock = MockCompletion::new();
            let engine = advisor(mock.clone());
            let mut session = session();
            let classification = Classification::empty();

            // When the advisor takes the turn
            let result = engine
                .advance(
                    &mut session,
                    &input(&classification, "I want a loan of 5 lakh", Language::English),
                )
                .await
                .unwrap();

            // Then it asks the one follow-up and parks the figures
            let WorkflowResult::NeedsMoreInfo(reply) = result else {
                panic!("expected the rate question");
            };
            assert_eq!(reply.text, prompts::rate_question(Language::English));
            let parked = session.scratch().finance().unwrap().pending().unwrap();
            assert_eq!(parked.principal_rupees(), Some(500_000.0));
            assert_eq!(mock.call_count(), 0);
        }

        #[tokio::test]
        async fn parked_principal_completes_with_the_rate_answer() {
            // Given a parked 5 lakh principal from the previous turn
            let engine = advisor(MockCompletion::new());
            let mut session = session();
            let classification = Classification::empty();
            engine
                .advance(
                    &mut session,
                    &input(&classification, "I want a loan of 5 lakh", Language::English),
                )
                .await
                .unwrap();

            // When the rate arrives on its own
            let result = engine
                .advance(
                    &mut session,
                    &input(&classification, "the rate is 2% per month", Language::English),
                )
                .await
                .unwrap();

            // Then both turns' figures combine into one schedule
            assert!(result.is_complete());
            assert!(result.reply().text.contains("₹5,00,000"));
            assert!(result.reply().text.contains("24% a year"));
            assert!(session.scratch().finance().unwrap().pending().is_none());
        }

        #[tokio::test]
        async fn rate_without_principal_gets_a_band_answer() {
            // Given only a rate, and a steep one
            let engine = advisor(MockCompletion::new());
            let mut session = session();
            let classification = Classification::empty();

            // When the advisor takes the turn
            let result = engine
                .advance(
                    &mut session,
                    &input(
                        &classification,
                        "Is 50% interest per year too much?",
                        Language::English,
                    ),
                )
                .await
                .unwrap();

            // Then the rate is judged on its own and nothing is parked
            let text = &result.reply().text;
            assert!(text.contains("Warning: 50%"));
            assert!(text.contains("Share the loan amount"));
            assert!(result.is_complete());
            assert!(session
                .scratch()
                .finance()
                .map_or(true, |f| f.pending().is_none()));
        }
    }

    mod general_questions {
        use super::*;

        #[tokio::test]
        async fn no_figures_routes_to_the_advice_model() {
            // Given a money question with no loan figures
            let mock = MockCompletion::new().with_reply("Open a post office RD account.");
            let engine = advisor(mock.clone());
            let mut session = session();
            let classification = Classification::empty();

            // When the advisor takes the turn
            let result = engine
                .advance(
                    &mut session,
                    &input(
                        &classification,
                        "How should I save for my daughter's wedding?",
                        Language::English,
                    ),
                )
                .await
                .unwrap();

            // Then the model answers, in the working language
            let WorkflowResult::Complete(reply) = result else {
                panic!("expected completion");
            };
            assert_eq!(reply.text, "Open a post office RD account.");
            assert_eq!(reply.language, Language::English);

            let calls = mock.get_calls();
            assert_eq!(calls.len(), 1);
            assert!(calls[0]
                .messages
                .last()
                .unwrap()
                .content
                .contains("daughter's wedding"));
        }
    }

    mod formatting {
        use super::*;

        #[test]
        fn rupee_grouping_follows_indian_convention() {
            assert_eq!(format_rupees(500), "500");
            assert_eq!(format_rupees(50_000), "50,000");
            assert_eq!(format_rupees(500_000), "5,00,000");
            assert_eq!(format_rupees(12_345_67), "12,34,567");
            assert_eq!(format_rupees(10_000_000), "1,00,00,000");
        }

        #[test]
        fn whole_rates_drop_the_decimal_point() {
            assert_eq!(trim_rate(36.0), "36");
            assert_eq!(trim_rate(10.5), "10.5");
        }
    }
}
