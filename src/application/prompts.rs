//! Canned citizen-facing texts and model system prompts.
//!
//! Canned texts are written in Hindi and English; every other supported
//! language is reached by translating the English rendition downstream.
//! System prompts are always English, the working language.

use crate::domain::foundation::Language;
use crate::domain::grievance::{RESPONSE_WINDOW_DAYS, STANDARD_FEE_RUPEES};
use crate::domain::profile::ProfileField;

/// The language a canned text comes out in for this citizen: Hindi for
/// Hindi speakers, English for everyone else.
pub fn canned_language(citizen: Language) -> Language {
    match citizen {
        Language::Hindi => Language::Hindi,
        _ => Language::English,
    }
}

fn is_hindi(language: Language) -> bool {
    language == Language::Hindi
}

// ─────────────────────────────────────────────────────────────────────────
// Service menu and apology
// ─────────────────────────────────────────────────────────────────────────

const MENU_HI: [&str; 3] = [
    "मैं तीन तरह से आपकी मदद कर सकता हूँ: आपके लिए सरकारी योजनाएँ खोजना, \
     किसी शिकायत के लिए RTI आवेदन बनाना, या पैसे और लोन से जुड़े सवालों के \
     जवाब देना। आपको किस चीज़ में मदद चाहिए?",
    "थोड़ा और बताइए। जैसे कहिए 'मुझे कौन सी योजना मिल सकती है', 'मुझे RTI \
     शिकायत करनी है', या 'लोन के बारे में सवाल है'।",
    "मैं समझ नहीं पाया। मैं योजना पात्रता देख सकता हूँ, RTI आवेदन तैयार कर \
     सकता हूँ, या लोन का खर्च समझा सकता हूँ। आपको क्या चाहिए?",
];

const MENU_EN: [&str; 3] = [
    "I can help you in three ways: find government schemes you may be eligible \
     for, prepare an RTI application for a complaint, or answer money and loan \
     questions. What would you like help with?",
    "Could you tell me a little more? For example, say 'which schemes can I \
     get', 'I want to file an RTI complaint', or 'I have a question about a \
     loan'.",
    "I did not follow that. I can check scheme eligibility, prepare an RTI \
     application, or explain what a loan will cost. Which one do you need?",
];

/// One of three service-selection prompts, rotated by turn count so a
/// citizen who stays unclear is not shown the same wording twice in a
/// row.
pub fn service_menu(turn_count: u64, language: Language) -> &'static str {
    let index = (turn_count % 3) as usize;
    if is_hindi(language) {
        MENU_HI[index]
    } else {
        MENU_EN[index]
    }
}

/// Sent when the model cannot be reached at all this turn.
pub fn apology(language: Language) -> &'static str {
    if is_hindi(language) {
        "माफ़ कीजिए, अभी जवाब देने में दिक्कत आ रही है। थोड़ी देर बाद फिर \
         कोशिश कीजिए।"
    } else {
        "Sorry, I am having trouble answering right now. Please try again in a \
         little while."
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Profile slot-filling questions
// ─────────────────────────────────────────────────────────────────────────

/// The question that fills one profile field.
pub fn profile_question(field: ProfileField, language: Language) -> &'static str {
    if is_hindi(language) {
        match field {
            ProfileField::Age => "आपकी उम्र कितनी है?",
            ProfileField::Gender => "आप पुरुष हैं या महिला?",
            ProfileField::State => "आप किस राज्य में रहते हैं?",
            ProfileField::District => "आप किस ज़िले में रहते हैं?",
            ProfileField::Occupation => {
                "आप क्या काम करते हैं? जैसे खेती, मज़दूरी, दुकान, या नौकरी।"
            }
            ProfileField::IncomeBracket => {
                "आपके परिवार की साल भर की कमाई लगभग कितनी है?"
            }
            ProfileField::SocialCategory => {
                "आप किस वर्ग से हैं: सामान्य, OBC, SC या ST?"
            }
            ProfileField::BplCard => "क्या आपके पास BPL राशन कार्ड है?",
            ProfileField::Disability => "क्या आपके पास विकलांगता प्रमाण पत्र है?",
            ProfileField::MaritalStatus => "आप विवाहित हैं, अविवाहित, या विधवा/विधुर?",
            ProfileField::LandOwnership => "क्या आपके परिवार के पास खेती की ज़मीन है?",
            ProfileField::FamilySize => "आपके परिवार में कितने लोग हैं?",
        }
    } else {
        match field {
            ProfileField::Age => "How old are you?",
            ProfileField::Gender => "Are you male or female?",
            ProfileField::State => "Which state do you live in?",
            ProfileField::District => "Which district do you live in?",
            ProfileField::Occupation => {
                "What work do you do? For example farming, daily wage work, a \
                 shop, or a job."
            }
            ProfileField::IncomeBracket => {
                "Roughly how much does your family earn in a year?"
            }
            ProfileField::SocialCategory => {
                "Which category do you belong to: General, OBC, SC, or ST?"
            }
            ProfileField::BplCard => "Do you have a BPL (Below Poverty Line) ration card?",
            ProfileField::Disability => "Do you have a disability certificate?",
            ProfileField::MaritalStatus => "Are you married, single, or widowed?",
            ProfileField::LandOwnership => "Does your family own farm land?",
            ProfileField::FamilySize => "How many people are in your family?",
        }
    }
}

/// Terminal message when every question is spent and matching still
/// finds nothing confident.
pub fn no_scheme_match(language: Language) -> &'static str {
    if is_hindi(language) {
        "आपकी दी हुई जानकारी से मुझे कोई योजना साफ़ तौर पर मिलती नहीं दिखी। \
         आप नज़दीकी जन सेवा केंद्र (CSC) पर और योजनाएँ देख सकते हैं, या मुझसे \
         RTI आवेदन या लोन के बारे में पूछ सकते हैं।"
    } else {
        "From what you have told me, I could not find a scheme that clearly \
         fits. You can check more schemes at your nearest Common Service \
         Centre (CSC), or ask me about RTI applications or loans."
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Grievance desk questions and filing instructions
// ─────────────────────────────────────────────────────────────────────────

pub fn grievance_detail_question(language: Language) -> &'static str {
    if is_hindi(language) {
        "समस्या के बारे में थोड़ा और बताइए: क्या हुआ, कब से हो रहा है, और \
         आपने अब तक क्या किया।"
    } else {
        "Please tell me a little more about the problem: what happened, since \
         when, and what you have already tried."
    }
}

pub fn grievance_locality_question(language: Language) -> &'static str {
    if is_hindi(language) {
        "यह किस गाँव या मोहल्ले की बात है, और किस ज़िले में?"
    } else {
        "Which village or locality is this about, and in which district?"
    }
}

pub fn grievance_authority_question(language: Language) -> &'static str {
    if is_hindi(language) {
        "क्या आपको पता है यह शिकायत किस दफ़्तर या विभाग से जुड़ी है? न पता हो \
         तो 'नहीं' कह दीजिए।"
    } else {
        "Do you know which office or department this complaint concerns? If \
         not, just say 'no'."
    }
}

pub fn grievance_clarify_question(language: Language) -> &'static str {
    if is_hindi(language) {
        "सही आवेदन बनाने के लिए बताइए इनमें से क्या सबसे सही बैठता है: राशन \
         कार्ड, पेंशन, सड़क, पानी, बिजली, मनरेगा मज़दूरी, या कोई योजना लाभ जो \
         मिला नहीं।"
    } else {
        "To prepare the right application, tell me which of these fits best: \
         ration card, pension, road, water, electricity, MGNREGA wages, or a \
         scheme benefit you did not receive."
    }
}

/// How to file the drafted application, in the citizen's language. The
/// statutory fee line changes when a BPL card is on the profile.
pub fn filing_instructions(language: Language, bpl_holder: bool) -> String {
    if is_hindi(language) {
        let fee_line = if bpl_holder {
            "आवेदन शुल्क ₹10 है, लेकिन BPL कार्ड होने से आपका शुल्क माफ़ है। \
             कार्ड की कॉपी साथ लगाइए।"
                .to_string()
        } else {
            format!(
                "आवेदन शुल्क ₹{STANDARD_FEE_RUPEES} है (BPL कार्ड धारकों के लिए माफ़)।"
            )
        };
        format!(
            "यह आवेदन ऐसे दाखिल करें:\n\
             1. {fee_line}\n\
             2. rtionline.gov.in पर ऑनलाइन भेजें, डाक से भेजें, या जन सूचना \
             अधिकारी (PIO) के दफ़्तर में जाकर दें।\n\
             3. दफ़्तर को {RESPONSE_WINDOW_DAYS} दिन के अंदर जवाब देना होगा।\n\
             4. जवाब न मिले या गलत मिले तो उसी विभाग के प्रथम अपीलीय अधिकारी \
             के पास पहली अपील कर सकते हैं।"
        )
    } else {
        let fee_line = if bpl_holder {
            "The application fee is ₹10, but it is waived for you as a BPL \
             card holder. Attach a copy of the card."
                .to_string()
        } else {
            format!(
                "The application fee is ₹{STANDARD_FEE_RUPEES} (waived for BPL card holders)."
            )
        };
        format!(
            "How to file this application:\n\
             1. {fee_line}\n\
             2. File online at rtionline.gov.in, send it by post, or hand it \
             in at the Public Information Officer's office.\n\
             3. The office must reply within {RESPONSE_WINDOW_DAYS} days.\n\
             4. If there is no reply, or the reply is wrong, you can file a \
             first appeal with the same department's First Appellate Authority."
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Finance questions
// ─────────────────────────────────────────────────────────────────────────

/// The one follow-up the finance desk may ask.
pub fn rate_question(language: Language) -> &'static str {
    if is_hindi(language) {
        "इस लोन पर सालाना ब्याज दर क्या है? अगर दर हर महीने की है तो वही \
         बताइए।"
    } else {
        "What is the annual interest rate on this loan? If the rate is per \
         month, tell me that instead."
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Model system prompts (working language only)
// ─────────────────────────────────────────────────────────────────────────

/// Intent-and-extraction envelope contract.
pub const CLASSIFIER_SYSTEM_PROMPT: &str = "\
You read one message from an Indian citizen talking to a government-services \
assistant, with recent conversation for context. Reply with only a JSON \
object, no prose, shaped like:\n\
{\"intent\": \"...\", \"profile\": {...}, \"grievance\": {...}, \"stated\": [...]}\n\
- \"intent\": one of scheme_discovery, rti_grievance, financial_advice, \
continuation, unclear. Use continuation when the message answers the \
assistant's own previous question.\n\
- \"profile\": attributes the message reveals about the citizen. Allowed \
keys: age (number), gender (male|female|other), state (Indian state name), \
district, occupation (farmer|agricultural_labourer|daily_wage_labourer|\
street_vendor|self_employed|salaried|student|homemaker|unemployed|retired|\
other), income (annual rupees as a number, or a bracket name), \
social_category (general|obc|sc|st|minority), bpl_card (true|false), \
disability (true|false), marital_status (single|married|widowed|divorced), \
land_ownership (true|false), family_size (number). Omit anything the message \
does not reveal.\n\
- \"grievance\": {\"locality\": \"...\", \"authority\": \"...\", \
\"date_range\": \"...\", \"remedy\": \"...\"} when the message names the \
place a complaint is about, the office it concerns, the period it covers, \
or what the citizen wants done; omit keys the message does not give.\n\
- \"stated\": the profile keys the citizen said outright, as opposed to ones \
you inferred. Mentioning wheat sowing implies occupation=farmer but it is \
inferred; 'main kisan hoon' is stated.";

/// Plain-language scheme explanation contract.
pub const SCHEME_EXPLANATION_SYSTEM_PROMPT: &str = "\
You explain Indian government welfare schemes to a citizen who may have \
little formal education. Use simple words and short sentences. No \
bureaucratic vocabulary. For each scheme in the data, say what the citizen \
gets, then how to apply, in that order. Do not invent schemes, amounts, or \
conditions beyond the data given.";

/// Complaint-to-category labelling contract.
pub const GRIEVANCE_CATEGORY_SYSTEM_PROMPT: &str = "\
You label one citizen complaint with exactly one category from: \
ration_card_delay, pension_delay, road_repair, water_supply, \
scheme_benefit_not_received, electricity_issue, mgnrega_wage_delay, general. \
Reply with only a JSON object {\"category\": \"...\", \"confidence\": 0.0-1.0} \
where confidence is how sure you are the chosen category is right.";

/// Formal RTI application drafting contract.
pub const GRIEVANCE_DRAFT_SYSTEM_PROMPT: &str = "\
You draft an application under Section 6(1) of the Right to Information Act, \
2005, in formal English. Structure: addressee block (the Public Information \
Officer and department given), a subject line, a short factual statement of \
the applicant's problem, the numbered information requests given, a fee \
declaration (₹10 enclosed, or exemption claimed under Section 7(5) for a BPL \
applicant, as the data says), and a signature block with name, address, \
place, and date placeholders in square brackets. Use only the facts \
provided; translate the complaint faithfully into formal wording without \
exaggerating it.";

/// General money-question guidance contract.
pub const FINANCE_ADVICE_SYSTEM_PROMPT: &str = "\
You answer money questions for an Indian citizen who may have little \
financial background. Use simple words and short sentences. Prefer banks, \
post office schemes, and registered lenders over informal moneylenders. \
Never suggest sharing OTPs, PINs, or bank details with anyone. Where a \
government loan or savings scheme fits the question, name it. If an exact \
answer needs figures you were not given, say which figures are needed.";
